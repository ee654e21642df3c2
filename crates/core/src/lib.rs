pub mod book;
pub mod config;
pub mod library;
pub mod metrics;
pub mod query;
pub mod search;
pub mod source;
pub mod storage;
pub mod testing;

pub use book::{infer_category, Book, BookId, Category};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    SearchConfig, ServerConfig, SourceBackend, SourceConfig, StorageBackend, StorageConfig,
};
pub use library::{LibraryError, LibraryState, DEFAULT_LIBRARY_KEY, DUPLICATE_NOTICE};
pub use query::{build_query, CategoryFilter, SearchQuery, DEFAULT_TERM};
pub use search::{
    SearchOrchestrator, SearchOutcome, SearchState, SearchView, EMPTY_MESSAGE, ERROR_MESSAGE,
};
pub use source::{
    create_source, sample_books, BookSource, GoogleBooksConfig, GoogleBooksSource, SourceError,
    StaticSource, StaticSourceConfig,
};
pub use storage::{
    create_snapshot_store, FileSnapshotStore, MemorySnapshotStore, SnapshotStore,
    SqliteSnapshotStore, StorageError,
};
