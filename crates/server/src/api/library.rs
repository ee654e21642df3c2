use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookfinder_core::{Book, BookId, LibraryError, LibraryState};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OwnedRwLockWriteGuard;
use tracing::error;

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LibraryResponse {
    pub books: Vec<Book>,
    pub total: usize,
}

impl From<&LibraryState> for LibraryResponse {
    fn from(library: &LibraryState) -> Self {
        Self {
            books: library.list().to_vec(),
            total: library.len(),
        }
    }
}

/// GET /api/v1/library
pub async fn list_library(State(state): State<Arc<AppState>>) -> Json<LibraryResponse> {
    let library = state.library().read().await;
    Json(LibraryResponse::from(&*library))
}

/// POST /api/v1/library
///
/// Saves a book. A book whose id is already saved is rejected with 409
/// and the notice the user should see.
pub async fn add_book(State(state): State<Arc<AppState>>, Json(book): Json<Book>) -> Response {
    let result = mutate(&state, move |library| {
        library
            .add(book)
            .map(|()| LibraryResponse::from(&*library))
    })
    .await;

    match result {
        Ok(Ok(list)) => (StatusCode::CREATED, Json(list)).into_response(),
        Ok(Err(e @ LibraryError::DuplicateEntry { .. })) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse { error: e.notice() }),
        )
            .into_response(),
        Ok(Err(e)) => internal_error(e.to_string()),
        Err(response) => response,
    }
}

/// DELETE /api/v1/library/{id}
pub async fn remove_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let result = mutate(&state, move |library| {
        let id = library.find_id(&id).unwrap_or(BookId::Text(id));
        library.remove(&id);
        LibraryResponse::from(&*library)
    })
    .await;

    match result {
        Ok(list) => Json(list).into_response(),
        Err(response) => response,
    }
}

/// Run a library mutation on the blocking pool.
///
/// Mutations persist a snapshot through the store (file or SQLite), so they
/// hold the write guard off the async workers.
async fn mutate<T, F>(state: &AppState, f: F) -> Result<T, Response>
where
    F: FnOnce(&mut LibraryState) -> T + Send + 'static,
    T: Send + 'static,
{
    let mut library: OwnedRwLockWriteGuard<LibraryState> =
        Arc::clone(state.library()).write_owned().await;

    tokio::task::spawn_blocking(move || f(&mut *library))
        .await
        .map_err(|e| {
            error!(error = %e, "Library task failed");
            internal_error("Library task failed".to_string())
        })
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
