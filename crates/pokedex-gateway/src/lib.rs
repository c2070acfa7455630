//! Pokedex HTTP/JSON Gateway.
//!
//! This crate exposes the catalog and seed services over a REST API under
//! the `/api/v2` prefix, plus a `/health` probe.

pub mod config;
pub mod error;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::Router;
use pokedex_core::{CatalogFetcher, CatalogService, RecordStore, SeedService};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Prefix for all catalog routes.
pub const API_PREFIX: &str = "/api/v2";

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations.
    pub catalog: Arc<CatalogService>,
    /// Seeding from the external catalog.
    pub seed: Arc<SeedService>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state, wiring both services to the same store.
    pub fn new(
        store: Arc<dyn RecordStore>,
        fetcher: Arc<dyn CatalogFetcher>,
        config: GatewayConfig,
    ) -> Self {
        let catalog = CatalogService::new(store.clone(), &config.catalog_config());
        let seed = SeedService::new(store, fetcher, &config.seed_config());

        Self {
            catalog: Arc::new(catalog),
            seed: Arc::new(seed),
            config,
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(routes::pokemon::routes())
        .merge(routes::seed::routes());

    Router::new()
        .merge(routes::health::routes())
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
