use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SnapshotError;
use crate::deck::{Deck, Slide};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Presentation-surface snapshot: a versioned, flat list of opaque slide
/// payloads plus the index that was visible when it was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    pub version: u32,

    #[serde(rename = "currentSlideIndex", default)]
    pub current_slide_index: usize,

    pub slides: Vec<String>,
}

impl DeckSnapshot {
    /// Captures the deck as it is at the moment of the call.
    pub fn capture(deck: &Deck) -> Result<Self, SnapshotError> {
        let slides = deck
            .slides()
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<String>, _>>()
            .map_err(SnapshotError::Serialize)?;

        Ok(Self {
            version: SNAPSHOT_VERSION,
            current_slide_index: deck.active_index(),
            slides,
        })
    }

    /// Validates raw snapshot text. Not-JSON and JSON-without-a-slides-array
    /// fail with distinct, descriptive errors.
    pub fn parse(raw: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;

        let Some(slides) = value.get("slides").and_then(|s| s.as_array()) else {
            return Err(SnapshotError::MissingSlides);
        };

        let payloads = slides
            .iter()
            .filter_map(|entry| match entry {
                Value::String(payload) => Some(payload.clone()),
                // non-string entries never made it into a real snapshot
                _ => None,
            })
            .collect();

        let version = value
            .get("version")
            .and_then(|v| v.as_u64())
            .unwrap_or(SNAPSHOT_VERSION as u64) as u32;
        let current_slide_index = value
            .get("currentSlideIndex")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as usize;

        Ok(Self {
            version,
            current_slide_index,
            slides: payloads,
        })
    }

    /// Replaces the deck's slides with freshly materialized ones and
    /// restores the captured position, clamped to the new bounds.
    /// Payloads that no longer parse are skipped with a warning.
    pub fn apply(&self, deck: &mut Deck) {
        let slides: Vec<Slide> = self
            .slides
            .iter()
            .filter_map(|payload| match serde_json::from_str::<Slide>(payload) {
                Ok(slide) => Some(slide),
                Err(error) => {
                    log::warn!("Skipping slide payload that failed to parse: {}", error);
                    None
                }
            })
            .collect();

        deck.replace_slides(slides);
        if !deck.is_empty() {
            let requested = self.current_slide_index.min(deck.len() - 1);
            deck.show(requested as isize);
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Serialize)
    }

    /// The downloadable-file transport.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    /// Reads and validates a user-supplied snapshot file. Read failures
    /// surface as `Io`, bad content as `Parse`/`MissingSlides`.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }
}

/// Parses and applies in one step, leaving the deck untouched when the
/// text is not a valid snapshot.
pub fn load_into(deck: &mut Deck, raw: &str) -> Result<(), SnapshotError> {
    let snapshot = DeckSnapshot::parse(raw)?;
    snapshot.apply(deck);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::NavPolicy;

    fn deck_of(n: usize) -> Deck {
        let slides = (0..n)
            .map(|i| {
                Slide::new()
                    .with_title(format!("Slide {}", i + 1))
                    .with_content(format!("<p>body {}</p>", i + 1))
            })
            .collect();
        Deck::with_slides(NavPolicy::Wrap, slides)
    }

    #[test]
    fn test_round_trip_preserves_slides() {
        for n in [0usize, 1, 5] {
            let mut original = deck_of(n);
            if n > 0 {
                original.show(n as isize - 1);
            }

            let snapshot = DeckSnapshot::capture(&original).unwrap();
            let raw = snapshot.to_pretty_json().unwrap();

            let mut restored = Deck::new(NavPolicy::Wrap);
            load_into(&mut restored, &raw).unwrap();

            assert_eq!(restored.len(), original.len());
            for (a, b) in restored.slides().iter().zip(original.slides()) {
                assert_eq!(a.content, b.content);
                assert_eq!(a.title, b.title);
            }
            if n > 0 {
                assert_eq!(restored.active_index(), n - 1);
            }
        }
    }

    #[test]
    fn test_not_json_is_rejected_without_mutation() {
        let mut deck = deck_of(2);
        deck.show(1);

        let result = load_into(&mut deck, "not json");
        assert!(matches!(result, Err(SnapshotError::Parse(_))));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.active_index(), 1);
    }

    #[test]
    fn test_missing_slides_is_rejected_without_mutation() {
        let mut deck = deck_of(2);

        let result = load_into(&mut deck, "{}");
        assert!(matches!(result, Err(SnapshotError::MissingSlides)));
        assert_eq!(deck.len(), 2);

        let result = load_into(&mut deck, r#"{"slides": 4}"#);
        assert!(matches!(result, Err(SnapshotError::MissingSlides)));
    }

    #[test]
    fn test_unparseable_payloads_are_skipped() {
        let snapshot = DeckSnapshot {
            version: SNAPSHOT_VERSION,
            current_slide_index: 0,
            slides: vec![
                serde_json::to_string(&Slide::new().with_title("kept")).unwrap(),
                String::from("<div>not a slide record</div>"),
            ],
        };

        let mut deck = Deck::new(NavPolicy::Wrap);
        snapshot.apply(&mut deck);
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.slide(0).unwrap().title.as_deref(), Some("kept"));
    }

    #[test]
    fn test_restored_index_is_clamped() {
        let source = deck_of(5);
        let mut snapshot = DeckSnapshot::capture(&source).unwrap();
        snapshot.current_slide_index = 99;

        let mut deck = Deck::new(NavPolicy::Wrap);
        snapshot.apply(&mut deck);
        assert_eq!(deck.active_index(), 4);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deck-state.json");

        let snapshot = DeckSnapshot::capture(&deck_of(3)).unwrap();
        snapshot.write_to_file(&path).unwrap();

        let restored = DeckSnapshot::read_from_file(&path).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = DeckSnapshot::read_from_file("/no/such/deck-state.json");
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }
}
