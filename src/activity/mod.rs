mod categorize;
mod choice;
mod connect;
mod free_text;
mod score;
mod stress;
mod token_drop;

pub use categorize::{CategorizationActivity, CategoryColumn, CategoryToken};
pub use choice::{ChoiceActivity, ChoicePrompt};
pub use connect::{ConnectAnswer, ConnectPrompt, MatchingConnectActivity};
pub use free_text::{FreeTextActivity, FreeTextPrompt};
pub use score::{Feedback, FeedbackTone, Mark, Score};
pub use stress::{StressMarkActivity, StressSentence};
pub use token_drop::{DropToken, DropZone, TokenDropActivity};

use serde::{Deserialize, Serialize};

/// The fixed set of scorable activity types a slide can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "unscramble")]
    Unscramble,
    #[serde(rename = "gap-fill")]
    GapFill,
    #[serde(rename = "matching")]
    Matching,
    #[serde(rename = "matching-connect")]
    MatchingConnect,
    #[serde(rename = "mc-grammar")]
    McGrammar,
    #[serde(rename = "mc-grammar-radio")]
    McGrammarRadio,
    #[serde(rename = "categorization")]
    Categorization,
    #[serde(rename = "stress-mark")]
    StressMark,
    #[serde(rename = "token-drop")]
    TokenDrop,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unscramble => "unscramble",
            Self::GapFill => "gap-fill",
            Self::Matching => "matching",
            Self::MatchingConnect => "matching-connect",
            Self::McGrammar => "mc-grammar",
            Self::McGrammarRadio => "mc-grammar-radio",
            Self::Categorization => "categorization",
            Self::StressMark => "stress-mark",
            Self::TokenDrop => "token-drop",
        }
    }
}

/// One interactive exercise and its full learner-facing state. Checking and
/// resetting never fail; activities with nothing in them simply score zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "activity")]
pub enum Activity {
    #[serde(rename = "unscramble")]
    Unscramble(FreeTextActivity),
    #[serde(rename = "gap-fill")]
    GapFill(FreeTextActivity),
    #[serde(rename = "matching")]
    Matching(ChoiceActivity),
    #[serde(rename = "matching-connect")]
    MatchingConnect(MatchingConnectActivity),
    #[serde(rename = "mc-grammar")]
    McGrammar(ChoiceActivity),
    #[serde(rename = "mc-grammar-radio")]
    McGrammarRadio(ChoiceActivity),
    #[serde(rename = "categorization")]
    Categorization(CategorizationActivity),
    #[serde(rename = "stress-mark")]
    StressMark(StressMarkActivity),
    #[serde(rename = "token-drop")]
    TokenDrop(TokenDropActivity),
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Unscramble(_) => ActivityKind::Unscramble,
            Self::GapFill(_) => ActivityKind::GapFill,
            Self::Matching(_) => ActivityKind::Matching,
            Self::MatchingConnect(_) => ActivityKind::MatchingConnect,
            Self::McGrammar(_) => ActivityKind::McGrammar,
            Self::McGrammarRadio(_) => ActivityKind::McGrammarRadio,
            Self::Categorization(_) => ActivityKind::Categorization,
            Self::StressMark(_) => ActivityKind::StressMark,
            Self::TokenDrop(_) => ActivityKind::TokenDrop,
        }
    }

    /// Scores every prompt, updates the per-prompt marks and the feedback
    /// line, and returns the tally.
    pub fn check(&mut self) -> Score {
        match self {
            Self::Unscramble(a) | Self::GapFill(a) => a.check(),
            Self::Matching(a) | Self::McGrammar(a) => a.check(),
            Self::McGrammarRadio(a) => a.check_radio(),
            Self::MatchingConnect(a) => a.check(),
            Self::Categorization(a) => a.check(),
            Self::StressMark(a) => a.check(),
            Self::TokenDrop(a) => a.check(),
        }
    }

    /// Returns every response surface and marker to the freshly created
    /// state.
    pub fn reset(&mut self) {
        match self {
            Self::Unscramble(a) | Self::GapFill(a) => a.reset(),
            Self::Matching(a) | Self::McGrammar(a) | Self::McGrammarRadio(a) => a.reset(),
            Self::MatchingConnect(a) => a.reset(),
            Self::Categorization(a) => a.reset(),
            Self::StressMark(a) => a.reset(),
            Self::TokenDrop(a) => a.reset(),
        }
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            Self::Unscramble(a) | Self::GapFill(a) => a.feedback.as_ref(),
            Self::Matching(a) | Self::McGrammar(a) | Self::McGrammarRadio(a) => {
                a.feedback.as_ref()
            }
            Self::MatchingConnect(a) => a.feedback.as_ref(),
            Self::Categorization(a) => a.feedback.as_ref(),
            Self::StressMark(a) => a.feedback.as_ref(),
            Self::TokenDrop(a) => a.feedback.as_ref(),
        }
    }
}
