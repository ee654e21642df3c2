//! Shared test fixture for API tests.
//!
//! Builds the real router over a [`MockBookSource`] and an in-memory
//! snapshot store, and drives it in-process with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bookfinder_core::{
    testing::MockBookSource, BookSource, Config, LibraryState, MemorySnapshotStore,
    SearchOrchestrator, SnapshotStore, DEFAULT_LIBRARY_KEY,
};
use bookfinder_server::state::AppState;

pub use bookfinder_core::testing::fixtures;

pub struct TestFixture {
    pub router: Router,
    pub source: Arc<MockBookSource>,
    pub store: Arc<MemorySnapshotStore>,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_store(MemorySnapshotStore::new()).await
    }

    /// Fixture whose library is restored from `store` at startup.
    pub async fn with_store(store: MemorySnapshotStore) -> Self {
        let source = Arc::new(MockBookSource::new());
        let store = Arc::new(store);

        let config = Config::default();
        let library = LibraryState::open(
            Arc::clone(&store) as Arc<dyn SnapshotStore>,
            DEFAULT_LIBRARY_KEY,
        );
        let orchestrator = Arc::new(SearchOrchestrator::with_default_term(
            Arc::clone(&source) as Arc<dyn BookSource>,
            config.search.default_term.clone(),
        ));

        let state = Arc::new(AppState::new(config, orchestrator, library));
        let router = bookfinder_server::api::create_router(state);

        Self {
            router,
            source,
            store,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// GET returning the raw body text (for non-JSON endpoints).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
