//! Record store for catalog entries.
//!
//! The services talk to storage only through [`RecordStore`]; [`SledStore`]
//! is the sled-backed implementation, which keeps one tree for entry records
//! and two index trees (catalog number, name).

mod config;
mod record;
mod sled_store;

pub mod key;

pub use config::StoreConfig;
pub use record::{Document, Record};
pub use sled_store::SledStore;

use crate::dto::{EntryPatch, NewEntry};
use crate::entry::EntryId;
use crate::error::StoreError;

/// Equality filter for single-entry lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
    /// Match the catalog number.
    No(u32),
    /// Match the stored name exactly.
    Name(String),
}

/// Operations the catalog and seed services need from storage.
///
/// Implementations enforce catalog number uniqueness: any write that would
/// give two entries the same `no` fails with [`StoreError::Duplicate`] and
/// leaves the store unchanged.
pub trait RecordStore: Send + Sync {
    /// Insert one entry, assigning it a fresh ID.
    fn create(&self, entry: NewEntry) -> Result<Document, StoreError>;

    /// Find the first entry matching the filter.
    fn find_one(&self, filter: &EntryFilter) -> Result<Option<Document>, StoreError>;

    /// Find an entry by ID.
    fn find_by_id(&self, id: &EntryId) -> Result<Option<Document>, StoreError>;

    /// List entries in ascending `no` order, skipping `skip` and returning at most `limit`.
    fn find(&self, skip: usize, limit: usize) -> Result<Vec<Document>, StoreError>;

    /// Apply a patch to one entry. Returns the number of entries matched (0 or 1).
    fn update_one(&self, id: &EntryId, patch: &EntryPatch) -> Result<u64, StoreError>;

    /// Delete one entry. Returns the number of entries deleted (0 or 1).
    fn delete_one(&self, id: &EntryId) -> Result<u64, StoreError>;

    /// Delete every entry. Returns the number of entries deleted.
    fn delete_many(&self) -> Result<u64, StoreError>;

    /// Insert all entries atomically: either every entry is stored or none is.
    fn insert_many(&self, entries: Vec<NewEntry>) -> Result<Vec<Document>, StoreError>;

    /// Number of stored entries.
    fn count(&self) -> Result<usize, StoreError>;
}
