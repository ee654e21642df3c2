//! Search orchestration.
//!
//! Drives the Idle -> Loading -> Results / Empty / Error display state.
//! Every invocation takes the next sequence number when it enters Loading;
//! when the source answers, the result is only applied if no newer search
//! has started in the meantime. Older, slower answers are dropped instead of
//! overwriting what the user asked for last.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::types::{SearchOutcome, SearchState, SearchView};
use crate::metrics;
use crate::query::{CategoryFilter, SearchQuery, DEFAULT_TERM};
use crate::source::BookSource;

#[derive(Debug)]
struct Display {
    sequence: u64,
    text: String,
    filter: CategoryFilter,
    query: Option<String>,
    state: SearchState,
}

impl Display {
    fn view(&self) -> SearchView {
        SearchView {
            sequence: self.sequence,
            text: self.text.clone(),
            filter: self.filter,
            query: self.query.clone(),
            state: self.state.clone(),
        }
    }
}

/// Coordinates searches against one [`BookSource`].
pub struct SearchOrchestrator {
    source: Arc<dyn BookSource>,
    default_term: String,
    display: RwLock<Display>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self::with_default_term(source, DEFAULT_TERM)
    }

    pub fn with_default_term(source: Arc<dyn BookSource>, default_term: impl Into<String>) -> Self {
        Self {
            source,
            default_term: default_term.into(),
            display: RwLock::new(Display {
                sequence: 0,
                text: String::new(),
                filter: CategoryFilter::All,
                query: None,
                state: SearchState::Idle,
            }),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Current visible state.
    pub async fn view(&self) -> SearchView {
        self.display.read().await.view()
    }

    /// Search `raw` under the active filter.
    pub async fn search(&self, raw: &str) -> SearchOutcome {
        self.run(Some(raw), None).await
    }

    /// Make `filter` the active filter and search `raw` under it.
    pub async fn search_with_filter(&self, raw: &str, filter: CategoryFilter) -> SearchOutcome {
        self.run(Some(raw), Some(filter)).await
    }

    /// Switch the active filter and re-run the current text under it.
    pub async fn set_filter(&self, filter: CategoryFilter) -> SearchOutcome {
        debug!(filter = %filter, "Filter changed, re-running search");
        self.run(None, Some(filter)).await
    }

    /// Start a search. Missing text or filter is taken from the current
    /// display under the same write guard that claims the sequence number,
    /// so calls apply in the order they acquire the lock.
    async fn run(&self, raw: Option<&str>, filter: Option<CategoryFilter>) -> SearchOutcome {
        let (sequence, query) = {
            let mut current = self.display.write().await;
            let raw = raw.map(str::to_string).unwrap_or_else(|| current.text.clone());
            let filter = filter.unwrap_or(current.filter);
            let query = SearchQuery::with_default_term(&raw, filter, &self.default_term);

            current.sequence += 1;
            current.text = query.text.clone();
            current.filter = filter;
            current.query = Some(query.to_query_string());
            current.state = SearchState::Loading;
            (current.sequence, query)
        };

        info!(
            sequence,
            source = self.source.name(),
            query = %query.to_query_string(),
            "Search started"
        );

        let start = Instant::now();
        let result = self.source.search(&query).await;
        let elapsed = start.elapsed();

        let mut current = self.display.write().await;
        let latest = current.sequence;
        if latest != sequence {
            debug!(sequence, latest, "Discarding result of superseded search");
            metrics::record_search("superseded", elapsed);
            return SearchOutcome::Superseded { sequence, latest };
        }

        current.state = match result {
            Ok(books) if books.is_empty() => {
                debug!(sequence, "Search returned no results");
                SearchState::empty()
            }
            Ok(books) => {
                debug!(sequence, count = books.len(), "Search returned results");
                SearchState::Results { books }
            }
            Err(e) => {
                warn!(sequence, error = %e, "Search failed");
                SearchState::error()
            }
        };
        metrics::record_search(current.state.status(), elapsed);

        SearchOutcome::Displayed(current.view())
    }
}
