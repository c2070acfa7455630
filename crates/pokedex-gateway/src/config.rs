//! Gateway configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pokedex_core::config::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_LIMIT, DEFAULT_SEED_URL};
use pokedex_core::{CatalogConfig, SeedConfig, StoreConfig};

/// Pokedex HTTP/JSON Gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "pokedex-gateway")]
#[command(about = "HTTP/JSON Gateway for the Pokedex catalog")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    pub listen: String,

    /// Path to the catalog data directory.
    #[arg(short, long, default_value = "./pokedex_data")]
    pub data_path: PathBuf,

    /// Page size for listing when the request omits `limit`.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub default_limit: usize,

    /// External catalog page imported by the seed endpoint.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    pub seed_url: String,

    /// Timeout (ms) for the seed fetch.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS * 1000)]
    pub fetch_timeout_ms: u64,

    /// Storage page cache capacity in megabytes.
    #[arg(long, default_value_t = 64)]
    pub cache_capacity_mb: u64,

    /// Background storage flush interval in milliseconds (0 disables it).
    #[arg(long, default_value_t = 1000)]
    pub flush_every_ms: u64,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Path to the catalog data directory.
    pub data_path: PathBuf,
    /// Default page size for listing.
    pub default_limit: usize,
    /// Seed source URL.
    pub seed_url: String,
    /// Timeout for the seed fetch.
    pub fetch_timeout: Duration,
    /// Storage page cache capacity in bytes.
    pub cache_capacity: u64,
    /// Background storage flush interval, if any.
    pub flush_every_ms: Option<u64>,
}

impl GatewayConfig {
    /// Storage settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_path)
            .with_cache_capacity(self.cache_capacity)
            .with_flush_every_ms(self.flush_every_ms)
    }

    /// Catalog service settings.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::default().with_default_limit(self.default_limit)
    }

    /// Seed service settings.
    pub fn seed_config(&self) -> SeedConfig {
        SeedConfig::default()
            .with_source_url(&self.seed_url)
            .with_fetch_timeout(self.fetch_timeout)
    }
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            data_path: args.data_path.clone(),
            default_limit: args.default_limit,
            seed_url: args.seed_url.clone(),
            fetch_timeout: Duration::from_millis(args.fetch_timeout_ms),
            cache_capacity: args.cache_capacity_mb.saturating_mul(1024 * 1024),
            flush_every_ms: Some(args.flush_every_ms).filter(|ms| *ms > 0),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            data_path: PathBuf::from("./pokedex_data"),
            default_limit: DEFAULT_LIMIT,
            seed_url: DEFAULT_SEED_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            cache_capacity: 64 * 1024 * 1024,
            flush_every_ms: Some(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["pokedex-gateway"]);
        let config = GatewayConfig::from(&args);

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.seed_url, DEFAULT_SEED_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
        assert_eq!(config.store_config().cache_capacity, 64 * 1024 * 1024);
        assert_eq!(config.store_config().flush_every_ms, Some(1000));
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "pokedex-gateway",
            "--listen",
            "127.0.0.1:9999",
            "--default-limit",
            "25",
            "--fetch-timeout-ms",
            "500",
        ]);
        let config = GatewayConfig::from(&args);

        assert_eq!(config.listen_addr, "127.0.0.1:9999");
        assert_eq!(config.catalog_config().default_limit, 25);
        assert_eq!(config.seed_config().fetch_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_storage_args() {
        let capacity = u64::MAX.to_string();
        let args = Args::parse_from([
            "pokedex-gateway",
            "--cache-capacity-mb",
            capacity.as_str(),
            "--flush-every-ms",
            "0",
        ]);
        let store = GatewayConfig::from(&args).store_config();

        assert_eq!(store.cache_capacity, u64::MAX);
        assert_eq!(store.flush_every_ms, None);
    }
}
