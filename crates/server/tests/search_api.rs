//! Integration tests for the search endpoints.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use bookfinder_core::{Category, CategoryFilter, SourceError};
use common::{fixtures, TestFixture};
use serde_json::json;

#[tokio::test]
async fn test_initial_view_is_idle() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/search").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "idle");
    assert_eq!(response.body["sequence"], 0);
    assert_eq!(response.body["filter"], "all");
}

#[tokio::test]
async fn test_search_returns_results() {
    let fixture = TestFixture::new().await;
    fixture
        .source
        .set_results(vec![
            fixtures::book("a", "Dune"),
            fixtures::book("b", "Dune Messiah"),
        ])
        .await;

    let response = fixture
        .post("/api/v1/search", json!({ "query": "  dune " }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "results");
    assert_eq!(response.body["sequence"], 1);
    assert_eq!(response.body["text"], "dune");
    assert_eq!(response.body["query"], "dune");
    assert_eq!(response.body["books"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["books"][0]["title"], "Dune");
}

#[tokio::test]
async fn test_empty_body_searches_default_term() {
    let fixture = TestFixture::new().await;
    fixture
        .source
        .set_results(vec![fixtures::book("a", "Anything")])
        .await;

    let response = fixture.post("/api/v1/search", json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["query"], "books");
    assert_eq!(response.body["text"], "");

    let queries = fixture.source.recorded_queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].term, "books");
}

#[tokio::test]
async fn test_no_results_shows_empty_message() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/search", json!({ "query": "zzzz" }))
        .await;

    assert_eq!(response.body["status"], "empty");
    assert_eq!(response.body["message"], "No se han encontrado libros.");
    assert!(response.body.get("books").is_none());
}

#[tokio::test]
async fn test_source_failure_shows_error_message() {
    let fixture = TestFixture::new().await;
    fixture
        .source
        .set_next_error(SourceError::Network("connection refused".to_string()))
        .await;

    let response = fixture
        .post("/api/v1/search", json!({ "query": "dune" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "error");
    assert_eq!(
        response.body["message"],
        "Ha ocurrido un error al buscar libros. Inténtalo de nuevo más tarde."
    );
}

#[tokio::test]
async fn test_search_with_filter_sets_active_filter() {
    let fixture = TestFixture::new().await;
    fixture.source.set_apply_filter(true).await;
    fixture
        .source
        .set_results(vec![
            fixtures::book_in("a", "Dune", Category::Fiction),
            fixtures::book_in("b", "Cosmos", Category::Science),
        ])
        .await;

    let response = fixture
        .post(
            "/api/v1/search",
            json!({ "query": "space", "filter": "science" }),
        )
        .await;

    assert_eq!(response.body["filter"], "science");
    assert_eq!(response.body["query"], "space subject:science");
    assert_eq!(response.body["books"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["books"][0]["title"], "Cosmos");

    // A later search without a filter keeps the active one
    let response = fixture
        .post("/api/v1/search", json!({ "query": "stars" }))
        .await;
    assert_eq!(response.body["filter"], "science");
    assert_eq!(response.body["query"], "stars subject:science");
}

#[tokio::test]
async fn test_unknown_filter_key_means_all() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/search", json!({ "query": "dune", "filter": "poetry" }))
        .await;

    assert_eq!(response.body["filter"], "all");
    assert_eq!(response.body["query"], "dune");
}

#[tokio::test]
async fn test_others_filter_adds_no_clause() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/search", json!({ "query": "dune", "filter": "others" }))
        .await;

    assert_eq!(response.body["filter"], "others");
    assert_eq!(response.body["query"], "dune");
}

#[tokio::test]
async fn test_filter_change_reruns_current_text() {
    let fixture = TestFixture::new().await;
    fixture
        .source
        .set_results(vec![fixtures::book("a", "Historia de Roma")])
        .await;

    fixture
        .post("/api/v1/search", json!({ "query": "roma" }))
        .await;

    let response = fixture
        .put("/api/v1/search/filter", json!({ "filter": "history" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sequence"], 2);
    assert_eq!(response.body["text"], "roma");
    assert_eq!(response.body["filter"], "history");
    assert_eq!(response.body["query"], "roma subject:history");

    let queries = fixture.source.recorded_queries().await;
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].filter, CategoryFilter::Only(Category::History));
}

#[tokio::test]
async fn test_superseded_search_answers_with_latest_view() {
    let fixture = TestFixture::new().await;
    fixture
        .source
        .set_results(vec![fixtures::book("a", "Anything")])
        .await;
    fixture
        .source
        .set_delay_for("slow", Duration::from_millis(300))
        .await;

    let slow = fixture.post("/api/v1/search", json!({ "query": "slow" }));
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        fixture
            .post("/api/v1/search", json!({ "query": "fast" }))
            .await
    };

    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(fast.body["sequence"], 2);
    assert_eq!(fast.body["text"], "fast");

    // The older call reports the newer search's view, not its own result
    assert_eq!(slow.body["sequence"], 2);
    assert_eq!(slow.body["text"], "fast");

    let current = fixture.get("/api/v1/search").await;
    assert_eq!(current.body["text"], "fast");
    assert_eq!(current.body["status"], "results");
}

#[tokio::test]
async fn test_list_categories_with_labels() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/categories").await;

    assert_eq!(response.status, StatusCode::OK);
    let categories = response.body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 5);
    assert!(categories
        .iter()
        .any(|c| c["key"] == "fantasy" && c["label"] == "Fantasía"));
    assert!(categories
        .iter()
        .any(|c| c["key"] == "others" && c["label"] == "Otros"));
}

#[tokio::test]
async fn test_health_and_config() {
    let fixture = TestFixture::new().await;

    let health = fixture.get("/api/v1/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let config = fixture.get("/api/v1/config").await;
    assert_eq!(config.status, StatusCode::OK);
    assert_eq!(config.body["source"]["backend"], "google_books");
    assert_eq!(
        config.body["source"]["google_books"]["api_key_configured"],
        false
    );
    assert!(config.body["source"]["google_books"].get("api_key").is_none());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture
        .post("/api/v1/search", json!({ "query": "dune" }))
        .await;

    let (status, body) = fixture.get_text("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("bookfinder_searches_total"));
    assert!(body.contains("bookfinder_http_requests_total"));
}
