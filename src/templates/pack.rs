use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::Activity;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template pack: {0}")]
    Io(#[from] std::io::Error),

    #[error("template pack is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no template with id '{0}' in this pack")]
    UnknownTemplate(String),
}

/// Declarative activity definition shipped in a pack: an id, a menu label,
/// and the full activity (kind, prompts, answer keys) it stamps out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: String,
    pub label: String,

    #[serde(flatten)]
    pub activity: Activity,
}

impl ActivityTemplate {
    /// Stamps out a fresh activity: any learner state a pack author left
    /// in the definition is cleared.
    pub fn instantiate(&self) -> Activity {
        let mut activity = self.activity.clone();
        activity.reset();
        activity
    }
}

/// A set of templates authored together, loaded from disk or fetched from
/// a pack URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatePack {
    #[serde(default)]
    pub title: String,

    pub templates: Vec<ActivityTemplate>,
}

impl TemplatePack {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn find(&self, id: &str) -> Option<&ActivityTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Instantiates the named template, erroring with the id when absent.
    pub fn instantiate(&self, id: &str) -> Result<Activity, TemplateError> {
        self.find(id)
            .map(ActivityTemplate::instantiate)
            .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityKind, FreeTextActivity, FreeTextPrompt};

    const PACK_JSON: &str = r#"{
        "title": "Grammar starters",
        "templates": [
            {
                "id": "gap-fill-basic",
                "label": "Basic gap fill",
                "activity": "gap-fill",
                "prompts": [
                    {"prompt": "The ___ sat on the mat.", "answer": "cat", "response": "stale"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_pack() {
        let pack = TemplatePack::parse(PACK_JSON).unwrap();
        assert_eq!(pack.title, "Grammar starters");
        assert_eq!(pack.templates.len(), 1);
        assert_eq!(
            pack.templates[0].activity.kind(),
            ActivityKind::GapFill
        );
    }

    #[test]
    fn test_instantiate_clears_authored_state() {
        let pack = TemplatePack::parse(PACK_JSON).unwrap();
        let activity = pack.instantiate("gap-fill-basic").unwrap();
        let Activity::GapFill(inner) = activity else {
            panic!("wrong kind");
        };
        assert_eq!(inner.prompts[0].response, "");
    }

    #[test]
    fn test_unknown_template_id() {
        let pack = TemplatePack::parse(PACK_JSON).unwrap();
        let err = pack.instantiate("missing").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownTemplate(id) if id == "missing"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pack.json");

        let pack = TemplatePack {
            title: String::from("On disk"),
            templates: vec![ActivityTemplate {
                id: String::from("unscramble-1"),
                label: String::from("Unscramble"),
                activity: Activity::Unscramble(FreeTextActivity::new(vec![
                    FreeTextPrompt::new("sat cat the", "the cat sat"),
                ])),
            }],
        };
        std::fs::write(&path, serde_json::to_string_pretty(&pack).unwrap()).unwrap();

        let loaded = TemplatePack::load(&path).unwrap();
        assert_eq!(loaded, pack);
    }

    #[test]
    fn test_bad_pack_is_a_parse_error() {
        assert!(matches!(
            TemplatePack::parse("not a pack"),
            Err(TemplateError::Parse(_))
        ));
    }
}
