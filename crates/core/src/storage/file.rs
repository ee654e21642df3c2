//! File-backed snapshot store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling
//! file which is then renamed over the target, so readers never observe a
//! half-written snapshot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{validate_key, SnapshotStore, StorageError};

/// Snapshot store writing one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create the store, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;

        debug!(path = %target.display(), bytes = value.len(), "Snapshot written");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();

        assert!(store.load("lib").unwrap().is_none());
        store.save("lib", "[]").unwrap();
        assert_eq!(store.load("lib").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("lib.json").exists());
        assert!(!dir.path().join(".lib.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileSnapshotStore::new(&nested).unwrap();
        store.save("lib", "x").unwrap();
        assert!(nested.join("lib.json").exists());
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.save("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_separate_instances_share_files() {
        let dir = TempDir::new().unwrap();
        FileSnapshotStore::new(dir.path())
            .unwrap()
            .save("lib", "[1,2]")
            .unwrap();
        let reopened = FileSnapshotStore::new(dir.path()).unwrap();
        assert_eq!(reopened.load("lib").unwrap().as_deref(), Some("[1,2]"));
    }
}
