use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::StateStore;
use super::SnapshotError;
use crate::deck::{Block, Deck};

/// Persisted per-slide authoring state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideState {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Authoring-surface snapshot: block state keyed by slide id plus the id
/// of the slide that was open. Deliberately not interchangeable with
/// `DeckSnapshot`; each host surface owns its own shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub slides: BTreeMap<String, SlideState>,

    #[serde(rename = "activeSlideId", default)]
    pub active_slide_id: Option<String>,
}

impl WorkspaceSnapshot {
    /// Captures block state for every slide, keyed by the slide's stable
    /// id. The active id falls back to the first slide when the pointer
    /// is unresolvable.
    pub fn capture(deck: &Deck) -> Self {
        let mut slides = BTreeMap::new();
        for (index, slide) in deck.slides().iter().enumerate() {
            slides.insert(
                slide.slide_id(index),
                SlideState {
                    blocks: slide.blocks.clone(),
                },
            );
        }

        let active_slide_id = deck
            .active_slide()
            .map(|slide| slide.slide_id(deck.active_index()))
            .or_else(|| deck.slide(0).map(|slide| slide.slide_id(0)));

        Self {
            slides,
            active_slide_id,
        }
    }

    /// Validates raw workspace text; requires a `slides` object.
    pub fn parse(raw: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
        if !value.get("slides").map_or(false, Value::is_object) {
            return Err(SnapshotError::MissingSlides);
        }
        serde_json::from_value(value).map_err(SnapshotError::Parse)
    }

    /// Applies stored block state to the slides the deck already has,
    /// matching by id, then navigates to the stored active slide (first
    /// slide when the id no longer resolves). Ids with no matching slide
    /// are ignored.
    pub fn apply(&self, deck: &mut Deck) {
        for index in 0..deck.len() {
            let Some(slide) = deck.slide_mut(index) else {
                continue;
            };
            let id = slide.slide_id(index);
            if let Some(state) = self.slides.get(&id) {
                slide.blocks = state.blocks.clone();
            }
        }

        if deck.is_empty() {
            return;
        }
        let target = self
            .active_slide_id
            .as_deref()
            .and_then(|wanted| {
                deck.slides()
                    .iter()
                    .enumerate()
                    .position(|(index, slide)| slide.slide_id(index) == wanted)
            })
            .unwrap_or(0);
        deck.show(target as isize);
    }

    pub fn to_pretty_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Serialize)
    }

    /// Mirrors the deck's current authoring state into the store; hosts
    /// call this after every mutating action.
    pub fn save_to_store(store: &StateStore, key: &str, deck: &Deck) -> Result<(), SnapshotError> {
        let snapshot = Self::capture(deck);
        store.save(key, &snapshot.to_pretty_json()?)
    }

    /// Restores from the store. `Ok(false)` means nothing was stored under
    /// the key; parse failures leave the deck untouched.
    pub fn load_from_store(
        store: &StateStore,
        key: &str,
        deck: &mut Deck,
    ) -> Result<bool, SnapshotError> {
        let Some(raw) = store.load(key)? else {
            return Ok(false);
        };
        Self::parse(&raw)?.apply(deck);
        Ok(true)
    }
}
