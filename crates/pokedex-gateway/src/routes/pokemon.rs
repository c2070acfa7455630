//! Catalog entry endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pokedex_core::{Entry, EntryId, EntryPatch, NewEntry, Pagination};

use super::blocking;
use crate::error::AppError;
use crate::AppState;

/// Catalog entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pokemon", post(handle_create).get(handle_list))
        .route(
            "/pokemon/:term",
            get(handle_find).patch(handle_update).delete(handle_remove),
        )
}

/// Create an entry.
async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let Json(input) = payload?;
    let catalog = state.catalog.clone();
    let entry = blocking(move || catalog.create(input)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List entries (`?limit=&offset=`).
async fn handle_list(
    State(state): State<AppState>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let Query(pagination) = pagination?;
    let catalog = state.catalog.clone();
    let entries = blocking(move || catalog.list(&pagination)).await?;
    Ok(Json(entries))
}

/// Find an entry by number, id, or name.
async fn handle_find(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Entry>, AppError> {
    let catalog = state.catalog.clone();
    let entry = blocking(move || catalog.find_one(&term)).await?;
    Ok(Json(entry))
}

/// Patch the entry resolved from the term.
async fn handle_update(
    State(state): State<AppState>,
    Path(term): Path<String>,
    payload: Result<Json<EntryPatch>, JsonRejection>,
) -> Result<Json<Entry>, AppError> {
    let Json(patch) = payload?;
    let catalog = state.catalog.clone();
    let entry = blocking(move || catalog.update(&term, patch)).await?;
    Ok(Json(entry))
}

/// Delete an entry. Only ids are accepted here, not numbers or names.
async fn handle_remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = EntryId::parse(&id)
        .ok_or_else(|| AppError::BadRequest(format!("{} is not a valid id", id)))?;
    let catalog = state.catalog.clone();
    blocking(move || catalog.remove(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
