//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search orchestration (outcomes, latency, superseded searches)
//! - Book sources (outbound requests)
//! - Personal library (mutations, size, persistence failures)

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

use crate::book::Book;
use crate::source::SourceError;

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bookfinder_searches_total", "Total searches run"),
        &["outcome"], // "results", "empty", "error", "superseded"
    )
    .unwrap()
});

/// Search duration in seconds, from Loading to a final state.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookfinder_search_duration_seconds",
            "Duration of searches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Source Metrics
// =============================================================================

/// Outbound source requests by source and result.
pub static SOURCE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookfinder_source_requests_total",
            "Total outbound book source requests",
        ),
        &["source", "result"], // result: "success", "network_error", "parse_error"
    )
    .unwrap()
});

/// Outbound source request duration in seconds.
pub static SOURCE_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookfinder_source_request_duration_seconds",
            "Duration of outbound book source requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Library Metrics
// =============================================================================

/// Library operations by kind.
pub static LIBRARY_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookfinder_library_operations_total",
            "Total personal library operations",
        ),
        &["operation"], // "add", "duplicate", "remove"
    )
    .unwrap()
});

/// Books currently in the personal library.
pub static LIBRARY_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("bookfinder_library_books", "Books in the personal library").unwrap()
});

/// Snapshot persistence failures by phase.
pub static PERSISTENCE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookfinder_persistence_failures_total",
            "Total library snapshot load/save failures",
        ),
        &["phase"], // "load", "save"
    )
    .unwrap()
});

// =============================================================================
// Helpers
// =============================================================================

/// Record a finished (or superseded) search.
pub fn record_search(outcome: &str, elapsed: Duration) {
    SEARCHES_TOTAL.with_label_values(&[outcome]).inc();
    SEARCH_DURATION
        .with_label_values(&[outcome])
        .observe(elapsed.as_secs_f64());
}

/// Record one outbound source request.
pub fn record_source_request(
    source: &str,
    result: &Result<Vec<Book>, SourceError>,
    elapsed: Duration,
) {
    let label = match result {
        Ok(_) => "success",
        Err(SourceError::Parse(_)) => "parse_error",
        Err(_) => "network_error",
    };
    SOURCE_REQUESTS.with_label_values(&[source, label]).inc();
    SOURCE_REQUEST_DURATION
        .with_label_values(&[source])
        .observe(elapsed.as_secs_f64());
}

/// All core metrics, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(SOURCE_REQUESTS.clone()),
        Box::new(SOURCE_REQUEST_DURATION.clone()),
        Box::new(LIBRARY_OPERATIONS.clone()),
        Box::new(LIBRARY_SIZE.clone()),
        Box::new(PERSISTENCE_FAILURES.clone()),
    ]
}
