//! Testing utilities and mock implementations.
//!
//! Mocks for the source and storage seams so the orchestrator, the library
//! and the HTTP layer can be exercised without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookfinder_core::testing::{fixtures, MockBookSource};
//!
//! let source = MockBookSource::new();
//! source.set_results(vec![fixtures::book("abc", "Dune")]).await;
//! ```

mod failing_store;
mod mock_book_source;

pub use failing_store::FailingSnapshotStore;
pub use mock_book_source::{MockBookSource, RecordedQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::book::{Book, BookId, Category};

    /// A book with a text id and reasonable defaults.
    pub fn book(id: &str, title: &str) -> Book {
        Book {
            id: BookId::Text(id.to_string()),
            title: title.to_string(),
            author: "Test Author".to_string(),
            year: "2001".to_string(),
            category: Category::Fiction,
            description: format!("A book called {}.", title),
            thumbnail: Some(format!("http://covers.test/{}.jpg", id)),
        }
    }

    /// A book with a numeric id.
    pub fn book_with_index(id: u64, title: &str) -> Book {
        Book {
            id: BookId::Index(id),
            thumbnail: None,
            ..book(&id.to_string(), title)
        }
    }

    /// A book filed under `category`.
    pub fn book_in(id: &str, title: &str, category: Category) -> Book {
        Book {
            category,
            ..book(id, title)
        }
    }
}
