use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::media::HydrationState;

/// Authored content blocks making up a slide in the workspace surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text {
        #[serde(default)]
        name: String,
        #[serde(default)]
        content: String,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        alt: String,
        /// search query resolved during hydration
        #[serde(default, skip_serializing_if = "Option::is_none")]
        remote_query: Option<String>,
        #[serde(default)]
        hydration: HydrationState,
    },
    Module {
        #[serde(default)]
        template: String,
        activity: Activity,
    },
}

/// One screen of presented or authored content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// explicit stable id; a positional `slide-{n}` fallback applies when
    /// absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// short lesson-stage tag shown by the navigator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// opaque markup payload owned by the host surface
    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Stable identity: the explicit id when set, else `slide-{n}`
    /// (1-based) derived from the slide's position.
    pub fn slide_id(&self, index: usize) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => format!("slide-{}", index + 1),
        }
    }

    pub fn stage_label(&self, index: usize) -> String {
        match &self.stage {
            Some(stage) if !stage.trim().is_empty() => stage.clone(),
            _ => format!("Stage {}", index + 1),
        }
    }

    /// Navigator title: the explicit title, else the first named text
    /// block, else `Slide {n}`.
    pub fn title_label(&self, index: usize) -> String {
        if let Some(title) = &self.title {
            if !title.trim().is_empty() {
                return title.clone();
            }
        }
        for block in &self.blocks {
            if let Block::Text { name, .. } = block {
                if !name.trim().is_empty() {
                    return name.clone();
                }
            }
        }
        format!("Slide {}", index + 1)
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Module { activity, .. } => Some(activity),
            _ => None,
        })
    }

    pub fn activities_mut(&mut self) -> impl Iterator<Item = &mut Activity> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Module { activity, .. } => Some(activity),
            _ => None,
        })
    }

    /// Clears learner state on every embedded activity.
    pub fn reset_activities(&mut self) {
        for activity in self.activities_mut() {
            activity.reset();
        }
    }
}
