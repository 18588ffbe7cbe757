use serde::{Deserialize, Serialize};

use super::score::{Feedback, Mark, Score};
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropToken {
    pub label: String,

    /// comparison value; the visible label is used when absent
    #[serde(default)]
    pub value: Option<String>,

    /// zone index the token occupies, `None` while in the bank
    #[serde(default)]
    pub zone: Option<usize>,
}

impl DropToken {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            zone: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    fn effective_value(&self) -> &str {
        self.value.as_deref().unwrap_or(self.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    /// answer the placed token must carry
    pub answer: String,

    #[serde(default)]
    pub placeholder: String,

    /// token index currently filling the zone
    #[serde(default)]
    pub current: Option<usize>,

    #[serde(default)]
    pub mark: Mark,
}

impl DropZone {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            placeholder: String::new(),
            current: None,
            mark: Mark::None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// Table completion: single-token zones with displacement semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDropActivity {
    #[serde(default)]
    pub tokens: Vec<DropToken>,

    #[serde(default)]
    pub zones: Vec<DropZone>,

    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl TokenDropActivity {
    pub fn new(tokens: Vec<DropToken>, zones: Vec<DropZone>) -> Self {
        Self {
            tokens,
            zones,
            feedback: None,
        }
    }

    /// Drops a token into a zone. The zone's previous occupant returns to
    /// the bank, and the token leaves any zone it was already filling.
    pub fn place(&mut self, token: usize, zone: usize) {
        if token >= self.tokens.len() || zone >= self.zones.len() {
            return;
        }

        if let Some(previous) = self.zones[zone].current {
            if let Some(displaced) = self.tokens.get_mut(previous) {
                displaced.zone = None;
            }
        }

        if let Some(old_zone) = self.tokens[token].zone {
            if let Some(vacated) = self.zones.get_mut(old_zone) {
                vacated.current = None;
            }
        }

        self.zones[zone].current = Some(token);
        self.zones[zone].mark = Mark::None;
        self.tokens[token].zone = Some(zone);
    }

    /// Lifts a placed token back into the bank.
    pub fn lift(&mut self, token: usize) {
        let Some(entry) = self.tokens.get_mut(token) else {
            return;
        };
        if let Some(zone) = entry.zone.take() {
            if let Some(vacated) = self.zones.get_mut(zone) {
                vacated.current = None;
                vacated.mark = Mark::None;
            }
        }
    }

    /// Empties a zone, returning its occupant to the bank.
    pub fn clear_zone(&mut self, zone: usize) {
        let Some(entry) = self.zones.get_mut(zone) else {
            return;
        };
        entry.mark = Mark::None;
        if let Some(token) = entry.current.take() {
            if let Some(occupant) = self.tokens.get_mut(token) {
                occupant.zone = None;
            }
        }
    }

    pub fn check(&mut self) -> Score {
        let mut correct = 0;
        for zone in &mut self.zones {
            let occupant = zone.current.and_then(|t| self.tokens.get(t));
            match occupant {
                Some(token) => {
                    if normalize(token.effective_value()) == normalize(&zone.answer) {
                        zone.mark = Mark::Correct;
                        correct += 1;
                    } else {
                        zone.mark = Mark::Incorrect;
                    }
                }
                // empty zones count against the score but carry no mark
                None => zone.mark = Mark::None,
            }
        }

        let score = Score::new(correct, self.zones.len());
        let message = if score.is_perfect() {
            String::from("Great job! Every space is correct.")
        } else {
            format!(
                "You have {} of {} correct. Try again!",
                score.correct, score.total
            )
        };
        self.feedback = Some(Feedback::scored(score, message));
        score
    }

    pub fn reset(&mut self) {
        for zone in &mut self.zones {
            zone.current = None;
            zone.mark = Mark::None;
        }
        for token in &mut self.tokens {
            token.zone = None;
        }
        self.feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb_table() -> TokenDropActivity {
        TokenDropActivity::new(
            vec![
                DropToken::new("went"),
                DropToken::new("gone"),
                DropToken::new("going"),
            ],
            vec![
                DropZone::new("went").with_placeholder("past simple"),
                DropZone::new("gone").with_placeholder("past participle"),
            ],
        )
    }

    #[test]
    fn test_placement_and_check() {
        let mut activity = verb_table();
        activity.place(0, 0);
        activity.place(2, 1);

        let score = activity.check();
        assert_eq!(score, Score::new(1, 2));
        assert_eq!(activity.zones[0].mark, Mark::Correct);
        assert_eq!(activity.zones[1].mark, Mark::Incorrect);
        assert_eq!(
            activity.feedback.as_ref().unwrap().message,
            "You have 1 of 2 correct. Try again!"
        );
    }

    #[test]
    fn test_perfect_message() {
        let mut activity = verb_table();
        activity.place(0, 0);
        activity.place(1, 1);
        activity.check();
        assert_eq!(
            activity.feedback.as_ref().unwrap().message,
            "Great job! Every space is correct."
        );
    }

    #[test]
    fn test_displacement_returns_previous_token() {
        let mut activity = verb_table();
        activity.place(0, 0);
        activity.place(1, 0);

        assert_eq!(activity.zones[0].current, Some(1));
        assert_eq!(activity.tokens[0].zone, None);
        assert_eq!(activity.tokens[1].zone, Some(0));
    }

    #[test]
    fn test_moving_a_token_vacates_its_old_zone() {
        let mut activity = verb_table();
        activity.place(0, 0);
        activity.place(0, 1);

        assert_eq!(activity.zones[0].current, None);
        assert_eq!(activity.zones[1].current, Some(0));
    }

    #[test]
    fn test_empty_zone_counts_but_is_unmarked() {
        let mut activity = verb_table();
        activity.place(0, 0);

        let score = activity.check();
        assert_eq!(score, Score::new(1, 2));
        assert_eq!(activity.zones[1].mark, Mark::None);
    }

    #[test]
    fn test_lift_returns_token_to_bank() {
        let mut activity = verb_table();
        activity.place(0, 0);
        activity.lift(0);
        assert_eq!(activity.zones[0].current, None);
        assert_eq!(activity.tokens[0].zone, None);
    }

    #[test]
    fn test_value_fallback_to_label() {
        let mut activity = TokenDropActivity::new(
            vec![DropToken::new("Went").with_value("went")],
            vec![DropZone::new("went")],
        );
        activity.place(0, 0);
        assert!(activity.check().is_perfect());
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let fresh = verb_table();
        let mut activity = fresh.clone();
        activity.place(0, 1);
        activity.check();
        activity.reset();
        assert_eq!(activity, fresh);
    }
}
