//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::blocking;
use crate::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the store answers, "degraded" otherwise.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Number of stored entries, when the store answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog.clone();
    let entries = blocking(move || catalog.count()).await.ok();

    Json(HealthResponse {
        status: if entries.is_some() { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries,
    })
}
