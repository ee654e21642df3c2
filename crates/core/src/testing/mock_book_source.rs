//! Mock book source for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::book::Book;
use crate::query::SearchQuery;
use crate::source::{BookSource, SourceError};

/// A recorded search for test assertions.
pub type RecordedQuery = SearchQuery;

/// Mock implementation of the BookSource trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable results, optionally narrowed by the query filter
/// - Track queries for assertions
/// - Simulate failures and per-text delays
#[derive(Debug, Default)]
pub struct MockBookSource {
    /// Configured results.
    results: Arc<RwLock<Vec<Book>>>,
    /// Recorded queries, in call order.
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
    /// If set, the next search fails with this error.
    next_error: Arc<RwLock<Option<SourceError>>>,
    /// Delay applied to every search.
    delay: Arc<RwLock<Duration>>,
    /// Delay overrides keyed by trimmed query text.
    delays_by_text: Arc<RwLock<HashMap<String, Duration>>>,
    /// Apply the query's category filter to the configured results.
    apply_filter: Arc<RwLock<bool>>,
}

impl MockBookSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configured results.
    pub async fn set_results(&self, books: Vec<Book>) {
        *self.results.write().await = books;
    }

    /// Fail the next search with `error`.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every search by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Delay searches whose text equals `text`.
    pub async fn set_delay_for(&self, text: &str, delay: Duration) {
        self.delays_by_text
            .write()
            .await
            .insert(text.to_string(), delay);
    }

    /// Narrow results by the query's category filter.
    pub async fn set_apply_filter(&self, apply: bool) {
        *self.apply_filter.write().await = apply;
    }

    /// Queries received so far.
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    pub async fn search_count(&self) -> usize {
        self.queries.read().await.len()
    }
}

#[async_trait]
impl BookSource for MockBookSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, SourceError> {
        self.queries.write().await.push(query.clone());

        let delay = match self.delays_by_text.read().await.get(&query.text) {
            Some(delay) => *delay,
            None => *self.delay.read().await,
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let apply_filter = *self.apply_filter.read().await;
        let books = self
            .results
            .read()
            .await
            .iter()
            .filter(|b| !apply_filter || query.filter.matches(b.category))
            .cloned()
            .collect();

        Ok(books)
    }
}
