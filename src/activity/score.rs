use serde::{Deserialize, Serialize};

/// Tally produced by checking one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

/// Visual state of one prompt's response surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    None,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTone {
    Success,
    Error,
}

/// Summary line written into an activity's feedback region after a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub tone: FeedbackTone,
}

impl Feedback {
    pub fn new(message: impl Into<String>, tone: FeedbackTone) -> Self {
        Self {
            message: message.into(),
            tone,
        }
    }

    /// The default summary line shared by most activity types.
    pub fn summary(score: Score) -> Self {
        Self::scored(
            score,
            format!("You have {} of {} correct.", score.correct, score.total),
        )
    }

    /// A custom message with the tone derived from the score.
    pub fn scored(score: Score, message: impl Into<String>) -> Self {
        let tone = if score.is_perfect() {
            FeedbackTone::Success
        } else {
            FeedbackTone::Error
        };
        Self::new(message, tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_feedback() {
        let perfect = Feedback::summary(Score::new(3, 3));
        assert_eq!(perfect.message, "You have 3 of 3 correct.");
        assert_eq!(perfect.tone, FeedbackTone::Success);

        let partial = Feedback::summary(Score::new(1, 2));
        assert_eq!(partial.message, "You have 1 of 2 correct.");
        assert_eq!(partial.tone, FeedbackTone::Error);
    }
}
