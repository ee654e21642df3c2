//! In-memory source over a fixed book list.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{sample_books, BookSource, SourceError};
use crate::book::Book;
use crate::query::SearchQuery;

/// Static source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticSourceConfig {
    /// Artificial latency before answering, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    500
}

impl Default for StaticSourceConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

/// Source that filters a fixed list of books locally.
///
/// Matching is a case-insensitive substring test of the user's text against
/// title, author and description, combined with the category filter. Blank
/// text matches every book.
pub struct StaticSource {
    books: Vec<Book>,
    delay: Duration,
}

impl StaticSource {
    /// Static source over the built-in sample dataset.
    pub fn new(config: StaticSourceConfig) -> Self {
        Self::with_books(sample_books(), Duration::from_millis(config.delay_ms))
    }

    pub fn with_books(books: Vec<Book>, delay: Duration) -> Self {
        Self { books, delay }
    }
}

#[async_trait]
impl BookSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let needle = query.text.to_lowercase();
        let books: Vec<Book> = self
            .books
            .iter()
            .filter(|book| query.filter.matches(book.category))
            .filter(|book| book.haystack().contains(&needle))
            .cloned()
            .collect();

        debug!(
            text = %query.text,
            filter = %query.filter,
            count = books.len(),
            "Static search completed"
        );
        Ok(books)
    }
}
