//! Book data sources.
//!
//! A [`BookSource`] turns a [`SearchQuery`] into a list of [`Book`]s. Two
//! implementations exist: [`GoogleBooksSource`] queries the Google Books
//! volumes API, [`StaticSource`] filters a built-in dataset in memory. The
//! active one is picked once at startup.

mod dataset;
mod google_books;
mod static_source;

pub use dataset::sample_books;
pub use google_books::{GoogleBooksConfig, GoogleBooksSource};
pub use static_source::{StaticSource, StaticSourceConfig};

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::book::Book;
use crate::config::{SourceBackend, SourceConfig};
use crate::query::SearchQuery;

/// Errors a source can fail with.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure (connect, timeout, broken body).
    #[error("Request failed: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response payload could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl SourceError {
    /// Network-class failures: transport errors and non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, SourceError::Network(_) | SourceError::Status { .. })
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Parse(e.to_string())
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

/// A searchable provider of books.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Short backend name, used in logs and metrics.
    fn name(&self) -> &str;

    /// Run one search. An empty vector means "no results", not an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, SourceError>;
}

/// Build the source selected in configuration.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn BookSource>, SourceError> {
    match config.backend {
        SourceBackend::GoogleBooks => {
            info!(
                base_url = %config.google_books.base_url,
                "Using Google Books source"
            );
            Ok(Arc::new(GoogleBooksSource::new(config.google_books.clone())?))
        }
        SourceBackend::Static => {
            info!(
                delay_ms = config.static_dataset.delay_ms,
                "Using static dataset source"
            );
            Ok(Arc::new(StaticSource::new(config.static_dataset.clone())))
        }
    }
}
