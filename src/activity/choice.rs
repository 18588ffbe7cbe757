use serde::{Deserialize, Serialize};

use super::score::{Feedback, Mark, Score};
use crate::normalize::normalize;

/// One select-an-option prompt, shared by the dropdown surfaces (matching,
/// mc-grammar) and the radio quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePrompt {
    #[serde(default)]
    pub prompt: String,

    pub options: Vec<String>,

    /// stored correct value
    pub correct: String,

    #[serde(default)]
    pub selected: Option<String>,

    #[serde(default)]
    pub mark: Mark,
}

impl ChoicePrompt {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct: correct.into(),
            selected: None,
            mark: Mark::None,
        }
    }

    fn is_correct(&self) -> bool {
        match &self.selected {
            Some(value) => normalize(value) == normalize(&self.correct),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceActivity {
    #[serde(default)]
    pub prompts: Vec<ChoicePrompt>,

    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl ChoiceActivity {
    pub fn new(prompts: Vec<ChoicePrompt>) -> Self {
        Self {
            prompts,
            feedback: None,
        }
    }

    /// Records the learner's selection for one prompt; out-of-range indexes
    /// are ignored.
    pub fn select(&mut self, index: usize, value: impl Into<String>) {
        if let Some(prompt) = self.prompts.get_mut(index) {
            prompt.selected = Some(value.into());
        }
    }

    pub fn clear_selection(&mut self, index: usize) {
        if let Some(prompt) = self.prompts.get_mut(index) {
            prompt.selected = None;
        }
    }

    /// Dropdown surfaces mark unanswered prompts incorrect.
    pub fn check(&mut self) -> Score {
        self.check_with(true);
        let score = self.tally();
        self.feedback = Some(Feedback::summary(score));
        score
    }

    /// The radio quiz leaves unanswered prompts unmarked (they still count
    /// against the total) and reports a different summary line.
    pub fn check_radio(&mut self) -> Score {
        self.check_with(false);
        let score = self.tally();
        self.feedback = Some(Feedback::scored(
            score,
            format!("You scored {} out of {}.", score.correct, score.total),
        ));
        score
    }

    fn check_with(&mut self, mark_unanswered: bool) {
        for prompt in &mut self.prompts {
            prompt.mark = if prompt.is_correct() {
                Mark::Correct
            } else if prompt.selected.is_some() || mark_unanswered {
                Mark::Incorrect
            } else {
                Mark::None
            };
        }
    }

    fn tally(&self) -> Score {
        let correct = self
            .prompts
            .iter()
            .filter(|p| p.mark == Mark::Correct)
            .count();
        Score::new(correct, self.prompts.len())
    }

    pub fn reset(&mut self) {
        for prompt in &mut self.prompts {
            prompt.selected = None;
            prompt.mark = Mark::None;
        }
        self.feedback = None;
    }
}
