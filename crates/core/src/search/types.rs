//! Display-state types for the search orchestrator.

use serde::Serialize;

use crate::book::Book;
use crate::query::CategoryFilter;

/// Message shown when a search finds nothing.
pub const EMPTY_MESSAGE: &str = "No se han encontrado libros.";

/// Message shown when a search fails.
pub const ERROR_MESSAGE: &str =
    "Ha ocurrido un error al buscar libros. Inténtalo de nuevo más tarde.";

/// What the results area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchState {
    /// No search has run yet.
    Idle,
    /// A search is in flight; previous results are cleared.
    Loading,
    Results { books: Vec<Book> },
    Empty { message: String },
    Error { message: String },
}

impl SearchState {
    pub fn empty() -> Self {
        SearchState::Empty {
            message: EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn error() -> Self {
        SearchState::Error {
            message: ERROR_MESSAGE.to_string(),
        }
    }

    /// Short name of the state, matching the serialized `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading => "loading",
            SearchState::Results { .. } => "results",
            SearchState::Empty { .. } => "empty",
            SearchState::Error { .. } => "error",
        }
    }

    pub fn books(&self) -> &[Book] {
        match self {
            SearchState::Results { books } => books,
            _ => &[],
        }
    }
}

/// Snapshot of the orchestrator's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    /// Sequence number of the search that owns this view (0 before any).
    pub sequence: u64,
    /// Trimmed user text of the current search.
    pub text: String,
    pub filter: CategoryFilter,
    /// Final query string handed to the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(flatten)]
    pub state: SearchState,
}

/// Result of one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// This search was the latest when it finished; its result is shown.
    Displayed(SearchView),
    /// A newer search started while this one was in flight; its result was
    /// dropped.
    Superseded { sequence: u64, latest: u64 },
}

impl SearchOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded { .. })
    }
}
