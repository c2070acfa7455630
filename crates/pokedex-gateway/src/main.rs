//! Pokedex HTTP/JSON Gateway binary.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use clap::Parser;
use pokedex_core::{HttpFetcher, SledStore};
use pokedex_gateway::{create_router, AppState, Args, GatewayConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_gateway=info,pokedex_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line args
    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    info!(
        listen = %config.listen_addr,
        data_path = %config.data_path.display(),
        default_limit = config.default_limit,
        seed_url = %config.seed_url,
        "Starting Pokedex Gateway"
    );

    if config.default_limit == 0 {
        anyhow::bail!("default_limit must be at least 1");
    }

    // Open the catalog store
    let store = Arc::new(SledStore::open(config.store_config())?);
    info!(recovered = store.was_recovered(), "catalog store opened");

    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout)?);

    // Create application state
    let state = AppState::new(store.clone(), fetcher, config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Gateway listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.flush()?;
    info!("gateway shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
