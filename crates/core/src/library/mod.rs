//! Personal library ("my books").
//!
//! An ordered, id-unique list of saved books. Every mutation rewrites the
//! whole list as one JSON snapshot in a [`SnapshotStore`]. Persistence
//! problems are logged and swallowed: the in-memory list stays
//! authoritative for the running process.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::book::{Book, BookId};
use crate::metrics;
use crate::storage::{SnapshotStore, StorageError};

/// Default snapshot key.
pub const DEFAULT_LIBRARY_KEY: &str = "myBooksLibrary";

/// Notice shown when a book is already saved.
pub const DUPLICATE_NOTICE: &str = "Este libro ya está en tu biblioteca.";

/// Errors from library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The book is already in the library; nothing was changed.
    #[error("Book already in library: {id}")]
    DuplicateEntry { id: BookId },

    #[error("Snapshot storage failed: {0}")]
    Persistence(#[from] StorageError),

    #[error("Snapshot is malformed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl LibraryError {
    /// Message suitable for showing to the user.
    pub fn notice(&self) -> String {
        match self {
            LibraryError::DuplicateEntry { .. } => DUPLICATE_NOTICE.to_string(),
            other => other.to_string(),
        }
    }
}

/// The saved-books collection and its snapshot binding.
pub struct LibraryState {
    books: Vec<Book>,
    store: Arc<dyn SnapshotStore>,
    key: String,
}

impl std::fmt::Debug for LibraryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryState")
            .field("books", &self.books.len())
            .field("store", &self.store.backend_name())
            .field("key", &self.key)
            .finish()
    }
}

impl LibraryState {
    /// Empty library bound to `key` in `store`. Nothing is read yet.
    pub fn new(store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        Self {
            books: Vec::new(),
            store,
            key: key.into(),
        }
    }

    /// Create the library and restore it from its last snapshot.
    pub fn open(store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        let mut library = Self::new(store, key);
        library.load_from_persistence();
        library
    }

    /// Replace the in-memory list with the stored snapshot.
    ///
    /// A missing snapshot leaves the library empty. An unreadable or
    /// malformed one is logged and also leaves it empty. Returns the number
    /// of books loaded.
    pub fn load_from_persistence(&mut self) -> usize {
        match self.read_snapshot() {
            Ok(Some(books)) => {
                self.books = books;
                info!(
                    key = %self.key,
                    backend = self.store.backend_name(),
                    count = self.books.len(),
                    "Library restored from snapshot"
                );
            }
            Ok(None) => {
                self.books.clear();
                debug!(key = %self.key, "No library snapshot found, starting empty");
            }
            Err(e) => {
                self.books.clear();
                metrics::PERSISTENCE_FAILURES
                    .with_label_values(&["load"])
                    .inc();
                error!(key = %self.key, error = %e, "Failed to load library snapshot");
            }
        }

        metrics::LIBRARY_SIZE.set(self.books.len() as i64);
        self.books.len()
    }

    fn read_snapshot(&self) -> Result<Option<Vec<Book>>, LibraryError> {
        let Some(raw) = self.store.load(&self.key)? else {
            return Ok(None);
        };

        let parsed: Vec<Book> = serde_json::from_str(&raw)?;

        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(parsed.len());
        for book in parsed {
            if seen.insert(book.id.clone()) {
                books.push(book);
            } else {
                warn!(id = %book.id, "Dropping duplicate entry from snapshot");
            }
        }

        Ok(Some(books))
    }

    /// Write the whole list to the store. Failures are logged, not returned.
    pub fn save_to_persistence(&self) {
        if let Err(e) = self.try_save() {
            metrics::PERSISTENCE_FAILURES
                .with_label_values(&["save"])
                .inc();
            error!(key = %self.key, error = %e, "Failed to save library snapshot");
        }
    }

    fn try_save(&self) -> Result<(), LibraryError> {
        let snapshot = serde_json::to_string(&self.books)?;
        self.store.save(&self.key, &snapshot)?;
        Ok(())
    }

    /// Append a book unless one with the same id is already saved.
    ///
    /// `Index(7)` and `Text("7")` count as the same id here, so every saved
    /// book stays addressable by its rendered id (see [`Self::find_id`]).
    pub fn add(&mut self, book: Book) -> Result<(), LibraryError> {
        if self.find_id(&book.id.to_string()).is_some() {
            metrics::LIBRARY_OPERATIONS
                .with_label_values(&["duplicate"])
                .inc();
            debug!(id = %book.id, "Book already in library");
            return Err(LibraryError::DuplicateEntry { id: book.id });
        }

        info!(id = %book.id, title = %book.title, "Adding book to library");
        self.books.push(book);
        self.after_mutation("add");
        Ok(())
    }

    /// Remove the book with `id`, if present, then persist.
    pub fn remove(&mut self, id: &BookId) -> Option<Book> {
        let removed = self
            .books
            .iter()
            .position(|b| &b.id == id)
            .map(|pos| self.books.remove(pos));

        match &removed {
            Some(book) => info!(id = %id, title = %book.title, "Removed book from library"),
            None => debug!(id = %id, "Remove of absent book ignored"),
        }

        self.after_mutation("remove");
        removed
    }

    fn after_mutation(&self, operation: &str) {
        metrics::LIBRARY_OPERATIONS
            .with_label_values(&[operation])
            .inc();
        metrics::LIBRARY_SIZE.set(self.books.len() as i64);
        self.save_to_persistence();
    }

    /// Saved books in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.books.iter().any(|b| &b.id == id)
    }

    /// Resolve an id given as text (e.g. a URL segment) against saved books.
    ///
    /// Numeric and textual ids print the same way, so matching on the
    /// rendered form finds `Index(7)` for `"7"` and `Text("7")` alike.
    pub fn find_id(&self, key: &str) -> Option<BookId> {
        self.books
            .iter()
            .find(|b| b.id.to_string() == key)
            .map(|b| b.id.clone())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
