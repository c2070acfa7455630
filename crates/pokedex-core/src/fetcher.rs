//! External catalog fetcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;

/// One named reference in an external catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeResult {
    pub name: String,
    pub url: String,
}

/// A page of the external catalog. Fields other than `results` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeResponse {
    pub results: Vec<PokeResult>,
}

/// Source of external catalog pages.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// GET `url` and decode it as a catalog page.
    async fn fetch_page(&self, url: &str) -> Result<PokeResponse, FetchError>;
}

/// HTTP fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PokeResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let page: PokeResponse = response.json().await?;
        debug!(url, results = page.results.len(), "fetched catalog page");
        Ok(page)
    }
}
