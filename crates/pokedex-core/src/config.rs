//! Service configuration.

use std::time::Duration;

/// Default page size for listing when the caller omits `limit`.
pub const DEFAULT_LIMIT: usize = 10;

/// Default source for seeding.
pub const DEFAULT_SEED_URL: &str = "https://pokeapi.co/api/v2/pokemon?limit=650";

/// Default timeout for the seed fetch in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Catalog service configuration. Read once at construction.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Page size used by `list` when the caller omits `limit`.
    pub default_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl CatalogConfig {
    /// Set the default page size.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.max(1);
        self
    }
}

/// Seed service configuration.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// URL of the external catalog page to import.
    pub source_url: String,

    /// Request timeout for the fetch.
    pub fetch_timeout: Duration,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SEED_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl SeedConfig {
    /// Set the source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
