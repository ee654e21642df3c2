//! Key-value snapshot storage.
//!
//! The personal library is persisted as one serialized snapshot under a
//! single key. [`SnapshotStore`] abstracts where that snapshot lives so the
//! library can run against memory, plain files or SQLite.

mod file;
mod memory;
mod sqlite;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;
pub use sqlite::SqliteSnapshotStore;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

/// Errors raised while reading or writing snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid snapshot key: {0}")]
    InvalidKey(String),
}

/// Named snapshot storage, one string value per key.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the snapshot stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Build the snapshot store selected in configuration.
///
/// `config.path` is a data directory: the file backend writes one JSON file
/// per key into it, the SQLite backend keeps `snapshots.db` there.
pub fn create_snapshot_store(
    config: &StorageConfig,
) -> Result<Arc<dyn SnapshotStore>, StorageError> {
    let store: Arc<dyn SnapshotStore> = match config.backend {
        StorageBackend::File => Arc::new(FileSnapshotStore::new(&config.path)?),
        StorageBackend::Sqlite => {
            std::fs::create_dir_all(&config.path)?;
            Arc::new(SqliteSnapshotStore::new(&config.path.join("snapshots.db"))?)
        }
        StorageBackend::Memory => Arc::new(MemorySnapshotStore::new()),
    };

    info!(
        backend = store.backend_name(),
        path = %config.path.display(),
        "Snapshot store initialized"
    );
    Ok(store)
}

/// Keys become file names, so keep them to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
