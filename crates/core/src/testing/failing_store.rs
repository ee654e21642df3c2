//! Snapshot store that always fails.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{SnapshotStore, StorageError};

/// A store whose reads and writes always fail, like a full or locked disk.
#[derive(Debug, Default)]
pub struct FailingSnapshotStore {
    save_attempts: AtomicUsize,
}

impl FailingSnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save` was called.
    pub fn save_attempts(&self) -> usize {
        self.save_attempts.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for FailingSnapshotStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "snapshot unreadable",
        )))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Io(io::Error::new(
            io::ErrorKind::StorageFull,
            "quota exceeded",
        )))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
