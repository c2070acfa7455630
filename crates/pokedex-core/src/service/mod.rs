//! Catalog and seed services.

mod catalog;
mod seed;

pub use catalog::CatalogService;
pub use seed::{catalog_number, SeedReport, SeedService, SEED_EXECUTED};
