use std::fs;
use std::path::{Path, PathBuf};

use super::SnapshotError;

/// Keyed JSON persistence scoped to the local profile, the equivalent of
/// the browser's per-origin key/value storage. State survives restarts in
/// the same profile directory and is gone once that directory is cleared.
pub struct StateStore {
    base: PathBuf,
}

impl StateStore {
    pub fn new(base: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let base = base.into();
        if !base.exists() {
            fs::create_dir_all(&base)?;
        }
        Ok(Self { base })
    }

    pub fn base_path(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }

    pub fn save(&self, key: &str, state: &str) -> Result<(), SnapshotError> {
        fs::write(self.key_path(key), state)?;
        Ok(())
    }

    /// `Ok(None)` when nothing has been stored under the key.
    pub fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Removes a stored entry; false when there was nothing to remove.
    pub fn clear(&self, key: &str) -> Result<bool, SnapshotError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    pub fn keys(&self) -> Result<Vec<String>, SnapshotError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
