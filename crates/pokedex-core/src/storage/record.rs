//! Stored document types.

use rkyv::{Archive, Deserialize, Serialize};

use crate::entry::{Entry, EntryId};
use crate::error::StoreError;

/// Entry fields as persisted in the entries tree, keyed by entry ID.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct Record {
    /// Catalog number.
    pub no: u32,

    /// Lowercase name.
    pub name: String,

    /// Write counter, bumped on every update.
    pub version: u32,

    /// Creation timestamp in microseconds since Unix epoch.
    pub created_at: u64,
}

impl Record {
    /// Create a new record with the current timestamp.
    pub fn new(no: u32, name: String) -> Self {
        Self {
            no,
            name,
            version: 0,
            created_at: super::key::current_timestamp(),
        }
    }

    /// Serialize the record to bytes using rkyv.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Deserialize a record from bytes using rkyv.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        // sled values carry no alignment guarantee
        let mut aligned = rkyv::util::AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}

/// A stored entry together with its internal metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Entry ID (the key in the entries tree).
    pub id: EntryId,
    /// Persisted fields.
    pub record: Record,
}

impl Document {
    pub fn new(id: EntryId, record: Record) -> Self {
        Self { id, record }
    }
}

impl From<Document> for Entry {
    fn from(doc: Document) -> Self {
        Entry {
            id: doc.id,
            no: doc.record.no,
            name: doc.record.name,
        }
    }
}
