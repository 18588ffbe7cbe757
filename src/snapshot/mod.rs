mod deck_state;
mod store;
mod workspace;

pub use deck_state::{DeckSnapshot, SNAPSHOT_VERSION};
pub use store::StateStore;
pub use workspace::{SlideState, WorkspaceSnapshot};

use thiserror::Error;

/// Persistence failures are split so hosts can tell a bad file apart from
/// bad content.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("deck state is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("deck state does not include slides")]
    MissingSlides,

    #[error("failed to serialize deck state: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to read deck state file: {0}")]
    Io(#[from] std::io::Error),
}
