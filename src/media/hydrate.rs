use serde::{Deserialize, Serialize};

use super::search::ImageSearchClient;
use crate::deck::{Block, Deck, Slide};

/// Lifecycle of a remote image reference. `Failed` means the host shows
/// the placeholder visual instead of a broken image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationState {
    #[default]
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationSummary {
    pub hydrated: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl HydrationSummary {
    fn merge(&mut self, other: HydrationSummary) {
        self.hydrated += other.hydrated;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Resolves every pending remote image on the slide. Individual failures
/// move that image to the placeholder fallback and never abort the batch;
/// already-settled images are left alone.
pub fn hydrate_slide(client: &mut ImageSearchClient, slide: &mut Slide) -> HydrationSummary {
    let mut summary = HydrationSummary::default();

    for block in &mut slide.blocks {
        let Block::Image {
            src,
            alt,
            remote_query,
            hydration,
        } = block
        else {
            continue;
        };
        let Some(query) = remote_query.as_deref() else {
            continue;
        };
        if *hydration != HydrationState::Pending {
            summary.skipped += 1;
            continue;
        }

        match client.search(query) {
            Ok(Some(result)) => {
                *src = result.url;
                if alt.is_empty() {
                    *alt = result.alt;
                }
                *hydration = HydrationState::Success;
                summary.hydrated += 1;
            }
            Ok(None) => {
                log::warn!(
                    "Falling back to a placeholder background for remote image: {}",
                    query
                );
                *hydration = HydrationState::Failed;
                summary.failed += 1;
            }
            Err(error) => {
                log::warn!("Remote image hydration failed for {}: {:#}", query, error);
                *hydration = HydrationState::Failed;
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Hydrates the whole deck, visiting every slide before reporting back.
pub fn hydrate_deck(client: &mut ImageSearchClient, deck: &mut Deck) -> HydrationSummary {
    let mut summary = HydrationSummary::default();
    for index in 0..deck.len() {
        if let Some(slide) = deck.slide_mut(index) {
            summary.merge(hydrate_slide(client, slide));
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::NavPolicy;

    fn remote_image(query: &str) -> Block {
        Block::Image {
            src: String::new(),
            alt: String::new(),
            remote_query: Some(query.into()),
            hydration: HydrationState::Pending,
        }
    }

    #[test]
    fn test_batch_never_aborts_on_failure() {
        // no API key: every pending image falls back to the placeholder
        let mut client = ImageSearchClient::new(None);
        let mut slide = Slide::new().with_blocks(vec![
            remote_image("mountains"),
            remote_image("rivers"),
            Block::Text {
                name: String::new(),
                content: String::new(),
            },
        ]);

        let summary = hydrate_slide(&mut client, &mut slide);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.hydrated, 0);
        for block in &slide.blocks {
            if let Block::Image { hydration, .. } = block {
                assert_eq!(*hydration, HydrationState::Failed);
            }
        }
    }

    #[test]
    fn test_settled_images_are_skipped() {
        let mut client = ImageSearchClient::new(None);
        let mut slide = Slide::new().with_blocks(vec![Block::Image {
            src: String::from("https://example.test/a.jpg"),
            alt: String::from("a"),
            remote_query: Some(String::from("mountains")),
            hydration: HydrationState::Success,
        }]);

        let summary = hydrate_slide(&mut client, &mut slide);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_local_images_are_ignored() {
        let mut client = ImageSearchClient::new(None);
        let mut slide = Slide::new().with_blocks(vec![Block::Image {
            src: String::from("local.png"),
            alt: String::new(),
            remote_query: None,
            hydration: HydrationState::Pending,
        }]);

        let summary = hydrate_slide(&mut client, &mut slide);
        assert_eq!(summary, HydrationSummary::default());
    }

    #[test]
    fn test_deck_hydration_covers_every_slide() {
        let mut client = ImageSearchClient::new(None);
        let slides = vec![
            Slide::new().with_blocks(vec![remote_image("a")]),
            Slide::new().with_blocks(vec![remote_image("b")]),
        ];
        let mut deck = Deck::with_slides(NavPolicy::Wrap, slides);

        let summary = hydrate_deck(&mut client, &mut deck);
        assert_eq!(summary.failed, 2);
    }
}
