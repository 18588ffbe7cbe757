use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::deck::{Deck, Slide};

/// Rasterization collaborator: render one slide, hand back encoded image
/// bytes. The encoding/pagination strategy belongs to the implementor.
pub trait SlideRasterizer {
    fn rasterize(&mut self, slide: &Slide, index: usize) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub output_dir: PathBuf,
}

pub fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    if fs::metadata(output_dir).is_ok() {
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;
    Ok(())
}

/// Renders every slide in presentation order, one at a time, writing
/// `page-{n}.png` files. A slide that fails to rasterize aborts the export
/// with an error naming it; pages already written are left for inspection.
pub fn export_deck(
    deck: &Deck,
    rasterizer: &mut dyn SlideRasterizer,
    output_dir: &str,
) -> anyhow::Result<ExportSummary> {
    create_output_dir(output_dir).context("failed to create export directory")?;

    for (index, slide) in deck.slides().iter().enumerate() {
        let bytes = rasterizer
            .rasterize(slide, index)
            .with_context(|| format!("failed to rasterize slide {}", index + 1))?;

        let path = Path::new(output_dir).join(format!("page-{}.png", index + 1));
        fs::write(&path, bytes)
            .with_context(|| format!("failed to write page for slide {}", index + 1))?;
    }

    Ok(ExportSummary {
        pages: deck.len(),
        output_dir: PathBuf::from(output_dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::NavPolicy;

    struct StubRasterizer {
        rendered: Vec<usize>,
        fail_at: Option<usize>,
    }

    impl SlideRasterizer for StubRasterizer {
        fn rasterize(&mut self, _slide: &Slide, index: usize) -> anyhow::Result<Vec<u8>> {
            if self.fail_at == Some(index) {
                anyhow::bail!("renderer crashed");
            }
            self.rendered.push(index);
            Ok(vec![index as u8])
        }
    }

    fn deck_of(n: usize) -> Deck {
        Deck::with_slides(NavPolicy::Wrap, (0..n).map(|_| Slide::new()).collect())
    }

    #[test]
    fn test_export_renders_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("pdf").to_string_lossy().into_owned();

        let mut rasterizer = StubRasterizer {
            rendered: Vec::new(),
            fail_at: None,
        };
        let summary = export_deck(&deck_of(3), &mut rasterizer, &out).unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(rasterizer.rendered, vec![0, 1, 2]);
        for n in 1..=3 {
            assert!(Path::new(&out).join(format!("page-{}.png", n)).exists());
        }
    }

    #[test]
    fn test_failed_slide_is_named() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("pdf").to_string_lossy().into_owned();

        let mut rasterizer = StubRasterizer {
            rendered: Vec::new(),
            fail_at: Some(1),
        };
        let error = export_deck(&deck_of(3), &mut rasterizer, &out).unwrap_err();

        assert!(format!("{:#}", error).contains("slide 2"));
        assert_eq!(rasterizer.rendered, vec![0]);
    }

    #[test]
    fn test_export_replaces_stale_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("pdf").to_string_lossy().into_owned();
        create_output_dir(&out).unwrap();
        fs::write(Path::new(&out).join("stale.png"), b"old").unwrap();

        let mut rasterizer = StubRasterizer {
            rendered: Vec::new(),
            fail_at: None,
        };
        export_deck(&deck_of(1), &mut rasterizer, &out).unwrap();
        assert!(!Path::new(&out).join("stale.png").exists());
    }
}
