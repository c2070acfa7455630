//! Seed service: replace the catalog with a page from the external API.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::dto::NewEntry;
use crate::error::{SeedError, StoreError};
use crate::fetcher::{CatalogFetcher, PokeResult};
use crate::storage::RecordStore;

/// Acknowledgement returned by a successful seed.
pub const SEED_EXECUTED: &str = "seed executed";

/// Outcome of a seed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Acknowledgement message.
    pub message: &'static str,
    /// Number of entries inserted.
    pub inserted: usize,
}

/// Destructive bulk refresh of the catalog.
pub struct SeedService {
    store: Arc<dyn RecordStore>,
    fetcher: Arc<dyn CatalogFetcher>,
    source_url: String,
}

impl SeedService {
    /// Create a seed service over the catalog's store and a fetcher.
    pub fn new(
        store: Arc<dyn RecordStore>,
        fetcher: Arc<dyn CatalogFetcher>,
        config: &SeedConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            source_url: config.source_url.clone(),
        }
    }

    /// Delete every entry, then import the configured page in one atomic insert.
    ///
    /// The store stays empty if the fetch or the insert fails.
    pub async fn execute_seed(&self) -> Result<SeedReport, SeedError> {
        let removed = on_store(&self.store, |store| store.delete_many()).await?;
        info!(removed, "cleared catalog for seeding");

        let page = self.fetcher.fetch_page(&self.source_url).await.map_err(|err| {
            warn!(url = %self.source_url, error = %err, "seed fetch failed");
            err
        })?;

        let entries = page
            .results
            .iter()
            .map(to_new_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let inserted = on_store(&self.store, move |store| store.insert_many(entries))
            .await?
            .len();
        info!(inserted, "seed executed");

        Ok(SeedReport {
            message: SEED_EXECUTED,
            inserted,
        })
    }
}

/// Run a synchronous store call on the blocking thread pool.
async fn on_store<T, F>(store: &Arc<dyn RecordStore>, op: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&dyn RecordStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(store.as_ref())).await?
}

fn to_new_entry(result: &PokeResult) -> Result<NewEntry, SeedError> {
    Ok(NewEntry::new(
        catalog_number(&result.url)?,
        result.name.to_lowercase(),
    ))
}

/// Derive the catalog number from a reference URL.
///
/// Reads the segment before the trailing one, so
/// `https://pokeapi.co/api/v2/pokemon/25/` yields 25.
pub fn catalog_number(url: &str) -> Result<u32, SeedError> {
    url.rsplit('/')
        .nth(1)
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|no| *no > 0)
        .ok_or_else(|| SeedError::InvalidReference {
            url: url.to_string(),
        })
}
