//! Search endpoints.
//!
//! Every call answers with the orchestrator's current view. When a call's
//! own search was overtaken by a newer one, the view it returns belongs to
//! the newer search.

use axum::{extract::State, Json};
use bookfinder_core::{Category, CategoryFilter, SearchOutcome, SearchView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    /// Raw user text. Missing means an empty search.
    #[serde(default)]
    pub query: String,
    /// Category key; becomes the active filter when present.
    #[serde(default)]
    pub filter: Option<CategoryFilter>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub filter: CategoryFilter,
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search
pub async fn run_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchView> {
    let orchestrator = state.orchestrator();
    let outcome = match request.filter {
        Some(filter) => orchestrator.search_with_filter(&request.query, filter).await,
        None => orchestrator.search(&request.query).await,
    };
    Json(resolve(&state, outcome).await)
}

/// GET /api/v1/search
pub async fn get_search(State(state): State<Arc<AppState>>) -> Json<SearchView> {
    Json(state.orchestrator().view().await)
}

/// PUT /api/v1/search/filter
pub async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Json<SearchView> {
    let outcome = state.orchestrator().set_filter(request.filter).await;
    Json(resolve(&state, outcome).await)
}

/// GET /api/v1/categories
pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: Category::ALL
            .iter()
            .map(|c| CategoryInfo {
                key: c.as_str(),
                label: c.label(),
            })
            .collect(),
    })
}

async fn resolve(state: &AppState, outcome: SearchOutcome) -> SearchView {
    match outcome {
        SearchOutcome::Displayed(view) => view,
        SearchOutcome::Superseded { sequence, latest } => {
            debug!(sequence, latest, "Answering superseded search with current view");
            state.orchestrator().view().await
        }
    }
}
