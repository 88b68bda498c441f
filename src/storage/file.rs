//! JSON file slot storage (native)
//!
//! The file holds a flat `{ "storage-key": "value" }` object so several
//! slots can share one file. A missing file reads as empty. Writes go through
//! a sibling temp file and a rename; a corrupt file is overwritten by the
//! next write.

use super::{StorageError, StorageResult};
use crate::config::SelectionConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load for a write: unparseable contents count as empty. The flag is
    /// set when the file on disk was corrupt and must be rewritten.
    fn load_for_write(&self) -> StorageResult<(BTreeMap<String, String>, bool)> {
        match self.load() {
            Ok(slots) => Ok((slots, false)),
            Err(StorageError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt selection file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(slots)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let (mut slots, _) = self.load_for_write()?;
        slots.insert(key.to_string(), value.to_string());
        self.save(&slots)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let (mut slots, corrupt) = self.load_for_write()?;
        if slots.remove(key).is_none() && !corrupt {
            return Ok(());
        }
        if slots.is_empty() {
            return std::fs::remove_file(&self.path).map_err(StorageError::from);
        }
        self.save(&slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nested/selection.json"));

        assert_eq!(storage.get("slot").unwrap(), None);
        storage.set("slot", "Phantom:A1").unwrap();
        storage.set("other", "x").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("Phantom:A1"));

        storage.remove("slot").unwrap();
        assert_eq!(storage.get("slot").unwrap(), None);
        assert_eq!(storage.get("other").unwrap().as_deref(), Some("x"));

        storage.remove("other").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("selection.json");
        std::fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(path);
        assert!(matches!(storage.get("slot"), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn write_replaces_corrupt_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("selection.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = FileStorage::new(&path);

        storage.set("slot", "Phantom:A1").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("Phantom:A1"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn remove_clears_corrupt_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("selection.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = FileStorage::new(&path);

        storage.remove("slot").unwrap();
        assert!(!path.exists());
        assert_eq!(storage.get("slot").unwrap(), None);
    }
}
