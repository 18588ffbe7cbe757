use serde::{Deserialize, Serialize};

use super::score::{Feedback, Mark, Score};
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSentence {
    pub words: Vec<String>,

    /// the word that carries the sentence stress
    pub correct: String,

    /// index of the currently marked word
    #[serde(default)]
    pub marked: Option<usize>,

    #[serde(default)]
    pub mark: Mark,
}

impl StressSentence {
    pub fn new(words: Vec<String>, correct: impl Into<String>) -> Self {
        Self {
            words,
            correct: correct.into(),
            marked: None,
            mark: Mark::None,
        }
    }

    pub fn from_text(text: &str, correct: impl Into<String>) -> Self {
        Self::new(
            text.split_whitespace().map(str::to_string).collect(),
            correct,
        )
    }
}

/// Sentence-stress marking: the learner marks exactly one word per
/// sentence; marking another word quietly moves the mark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StressMarkActivity {
    #[serde(default)]
    pub sentences: Vec<StressSentence>,

    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl StressMarkActivity {
    pub fn new(sentences: Vec<StressSentence>) -> Self {
        Self {
            sentences,
            feedback: None,
        }
    }

    /// Marks one word in a sentence, replacing any previous mark there.
    pub fn mark_word(&mut self, sentence: usize, word: usize) {
        if let Some(entry) = self.sentences.get_mut(sentence) {
            if word < entry.words.len() {
                entry.marked = Some(word);
            }
        }
    }

    pub fn unmark(&mut self, sentence: usize) {
        if let Some(entry) = self.sentences.get_mut(sentence) {
            entry.marked = None;
        }
    }

    pub fn check(&mut self) -> Score {
        let mut correct = 0;
        for sentence in &mut self.sentences {
            let marked_word = sentence.marked.and_then(|w| sentence.words.get(w));
            match marked_word {
                Some(word) => {
                    if normalize(word) == normalize(&sentence.correct) {
                        sentence.mark = Mark::Correct;
                        correct += 1;
                    } else {
                        sentence.mark = Mark::Incorrect;
                    }
                }
                // sentences with no marked word count against the score
                None => sentence.mark = Mark::None,
            }
        }

        let score = Score::new(correct, self.sentences.len());
        self.feedback = Some(Feedback::summary(score));
        score
    }

    pub fn reset(&mut self) {
        for sentence in &mut self.sentences {
            sentence.marked = None;
            sentence.mark = Mark::None;
        }
        self.feedback = None;
    }
}
