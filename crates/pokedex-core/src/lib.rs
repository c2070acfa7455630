//! Pokedex Core - Catalog storage, lookup, and seeding.
//!
//! This crate provides the catalog entry model, a sled-backed record store,
//! and the catalog and seed services built on top of it.

pub mod config;
pub mod dto;
pub mod entry;
pub mod error;
pub mod fetcher;
pub mod service;
pub mod storage;

pub use config::{CatalogConfig, SeedConfig};
pub use dto::{EntryPatch, NewEntry, Pagination};
pub use entry::{Entry, EntryId};
pub use error::{CatalogError, FetchError, SeedError, StoreError, ValidationError};
pub use fetcher::{CatalogFetcher, HttpFetcher, PokeResponse, PokeResult};
pub use service::{CatalogService, SeedReport, SeedService};
pub use storage::{Document, EntryFilter, RecordStore, SledStore, StoreConfig};
