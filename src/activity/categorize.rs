use serde::{Deserialize, Serialize};

use super::score::{Feedback, Mark, Score};
use crate::normalize::normalize;

/// A movable token; `placement` points at the column it currently sits in,
/// `None` while it is in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryToken {
    pub label: String,

    /// category tag the token belongs to
    pub category: String,

    #[serde(default)]
    pub placement: Option<usize>,
}

impl CategoryToken {
    pub fn new(label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: category.into(),
            placement: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub label: String,

    /// tag tokens are matched against
    pub tag: String,

    #[serde(default)]
    pub mark: Mark,
}

impl CategoryColumn {
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
            mark: Mark::None,
        }
    }
}

/// Click-to-place categorization: every token belongs to exactly one
/// category column; columns accept any number of tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizationActivity {
    #[serde(default)]
    pub tokens: Vec<CategoryToken>,

    #[serde(default)]
    pub columns: Vec<CategoryColumn>,

    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl CategorizationActivity {
    pub fn new(tokens: Vec<CategoryToken>, columns: Vec<CategoryColumn>) -> Self {
        Self {
            tokens,
            columns,
            feedback: None,
        }
    }

    /// Places a token into a column; unknown indexes are ignored.
    pub fn place_token(&mut self, token: usize, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        if let Some(token) = self.tokens.get_mut(token) {
            token.placement = Some(column);
        }
    }

    pub fn return_to_bank(&mut self, token: usize) {
        if let Some(token) = self.tokens.get_mut(token) {
            token.placement = None;
        }
    }

    pub fn check(&mut self) -> Score {
        let mut correct = 0;
        for token in &self.tokens {
            let placed_tag = token.placement.and_then(|c| self.columns.get(c));
            if let Some(column) = placed_tag {
                if normalize(&token.category) == normalize(&column.tag) {
                    correct += 1;
                }
            }
        }

        for (index, column) in self.columns.iter_mut().enumerate() {
            let mut occupied = false;
            let mut all_match = true;
            for token in &self.tokens {
                if token.placement == Some(index) {
                    occupied = true;
                    if normalize(&token.category) != normalize(&column.tag) {
                        all_match = false;
                    }
                }
            }
            // a zone with nothing placed is always counted wrong
            column.mark = if occupied && all_match {
                Mark::Correct
            } else {
                Mark::Incorrect
            };
        }

        let score = Score::new(correct, self.tokens.len());
        self.feedback = Some(Feedback::scored(
            score,
            format!(
                "You correctly placed {} out of {} items.",
                score.correct, score.total
            ),
        ));
        score
    }

    pub fn reset(&mut self) {
        for token in &mut self.tokens {
            token.placement = None;
        }
        for column in &mut self.columns {
            column.mark = Mark::None;
        }
        self.feedback = None;
    }
}
