use serde::{Deserialize, Serialize};

use super::score::{Feedback, Mark, Score};
use crate::normalize::normalize;

/// One typed-entry blank: unscramble sentences and gap-fill blanks share
/// this surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTextPrompt {
    /// visible instruction, e.g. the scrambled sentence or the gapped text
    #[serde(default)]
    pub prompt: String,

    /// canonical answer key
    pub answer: String,

    /// acceptable alternative answers
    #[serde(default)]
    pub alternates: Vec<String>,

    #[serde(default)]
    pub response: String,

    #[serde(default)]
    pub mark: Mark,
}

impl FreeTextPrompt {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
            alternates: Vec::new(),
            response: String::new(),
            mark: Mark::None,
        }
    }

    /// Parses an authored `answer|alternate|alternate` key into a prompt.
    pub fn from_answer_key(prompt: impl Into<String>, key: &str) -> Self {
        let mut parts = key.split('|').map(str::trim).filter(|p| !p.is_empty());
        let answer = parts.next().unwrap_or_default().to_string();
        let alternates = parts.map(str::to_string).collect();
        Self {
            prompt: prompt.into(),
            answer,
            alternates,
            response: String::new(),
            mark: Mark::None,
        }
    }

    pub fn with_alternates(mut self, alternates: Vec<String>) -> Self {
        self.alternates = alternates;
        self
    }

    fn is_correct(&self) -> bool {
        let answer = normalize(&self.answer);
        if answer.is_empty() {
            return false;
        }
        let value = normalize(&self.response);
        answer == value || self.alternates.iter().any(|alt| normalize(alt) == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeTextActivity {
    #[serde(default)]
    pub prompts: Vec<FreeTextPrompt>,

    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl FreeTextActivity {
    pub fn new(prompts: Vec<FreeTextPrompt>) -> Self {
        Self {
            prompts,
            feedback: None,
        }
    }

    /// Records the learner's current text for one blank; out-of-range
    /// indexes are ignored.
    pub fn enter_response(&mut self, index: usize, value: impl Into<String>) {
        if let Some(prompt) = self.prompts.get_mut(index) {
            prompt.response = value.into();
        }
    }

    pub fn check(&mut self) -> Score {
        let mut correct = 0;
        for prompt in &mut self.prompts {
            if prompt.is_correct() {
                prompt.mark = Mark::Correct;
                correct += 1;
            } else {
                prompt.mark = Mark::Incorrect;
            }
        }
        let score = Score::new(correct, self.prompts.len());
        self.feedback = Some(Feedback::summary(score));
        score
    }

    pub fn reset(&mut self) {
        for prompt in &mut self.prompts {
            prompt.response.clear();
            prompt.mark = Mark::None;
        }
        self.feedback = None;
    }
}
