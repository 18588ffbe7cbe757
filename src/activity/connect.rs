use serde::{Deserialize, Serialize};

use super::score::{Feedback, Mark, Score};
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectPrompt {
    pub id: String,
    pub text: String,

    /// value of the answer this prompt should be linked to
    pub expected: String,

    /// value of the currently linked answer
    #[serde(default)]
    pub selected: Option<String>,

    #[serde(default)]
    pub mark: Mark,
}

impl ConnectPrompt {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            expected: expected.into(),
            selected: None,
            mark: Mark::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectAnswer {
    pub value: String,
    pub text: String,

    /// id of the prompt currently linked to this answer
    #[serde(default)]
    pub selected_by: Option<String>,
}

impl ConnectAnswer {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected_by: None,
        }
    }
}

/// Bipartite click-to-connect matching: each prompt links to at most one
/// answer and vice versa; establishing a link silently dissolves whatever
/// either endpoint was previously paired with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConnectActivity {
    #[serde(default)]
    pub prompts: Vec<ConnectPrompt>,

    #[serde(default)]
    pub answers: Vec<ConnectAnswer>,

    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl MatchingConnectActivity {
    pub fn new(prompts: Vec<ConnectPrompt>, answers: Vec<ConnectAnswer>) -> Self {
        Self {
            prompts,
            answers,
            feedback: None,
        }
    }

    pub fn link(&mut self, prompt: usize, answer: usize) {
        if prompt >= self.prompts.len() || answer >= self.answers.len() {
            return;
        }

        self.unlink(prompt);

        // steal the answer from whichever prompt held it
        if let Some(previous_id) = self.answers[answer].selected_by.clone() {
            if let Some(previous) = self.prompt_index(&previous_id) {
                self.unlink(previous);
            }
        }

        let value = self.answers[answer].value.clone();
        let id = self.prompts[prompt].id.clone();
        self.prompts[prompt].selected = Some(value);
        self.prompts[prompt].mark = Mark::None;
        self.answers[answer].selected_by = Some(id);
    }

    pub fn unlink(&mut self, prompt: usize) {
        let Some(entry) = self.prompts.get_mut(prompt) else {
            return;
        };
        entry.mark = Mark::None;
        if let Some(value) = entry.selected.take() {
            if let Some(answer) = self.answers.iter_mut().find(|a| a.value == value) {
                answer.selected_by = None;
            }
        }
    }

    fn prompt_index(&self, id: &str) -> Option<usize> {
        self.prompts.iter().position(|p| p.id == id)
    }

    pub fn check(&mut self) -> Score {
        let mut correct = 0;
        for prompt in &mut self.prompts {
            match &prompt.selected {
                Some(value) => {
                    if normalize(value) == normalize(&prompt.expected) {
                        prompt.mark = Mark::Correct;
                        correct += 1;
                    } else {
                        prompt.mark = Mark::Incorrect;
                    }
                }
                // unlinked prompts count against the score but carry no mark
                None => prompt.mark = Mark::None,
            }
        }

        let score = Score::new(correct, self.prompts.len());
        let message = if score.is_perfect() {
            String::from("Excellent! Every match is correct.")
        } else {
            format!(
                "You have {} of {} correct. Adjust and try again.",
                score.correct, score.total
            )
        };
        self.feedback = Some(Feedback::scored(score, message));
        score
    }

    pub fn reset(&mut self) {
        for prompt in &mut self.prompts {
            prompt.selected = None;
            prompt.mark = Mark::None;
        }
        for answer in &mut self.answers {
            answer.selected_by = None;
        }
        self.feedback = None;
    }
}
