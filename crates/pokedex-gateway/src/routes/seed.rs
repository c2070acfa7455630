//! Seed endpoint.

use axum::{extract::State, routing::get, Json, Router};
use pokedex_core::SeedReport;

use crate::error::AppError;
use crate::AppState;

/// Seed routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/seed", get(handle_seed))
}

/// Wipe the catalog and import the configured external page.
async fn handle_seed(State(state): State<AppState>) -> Result<Json<SeedReport>, AppError> {
    let report = state.seed.execute_seed().await?;
    Ok(Json(report))
}
