//! Catalog entry model as seen by callers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::EntryPatch;

/// Size of an entry ID in bytes (UUID).
pub const ENTRY_ID_SIZE: usize = 16;

/// Store-assigned identifier of a catalog entry.
///
/// Rendered as a hyphenated lowercase UUID. Any string that parses as a
/// UUID is a syntactically valid identifier, whether or not an entry with
/// that ID exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier, returning `None` if the string is not a valid ID.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::try_parse(s).ok().map(Self)
    }

    /// Rebuild an identifier from its raw key bytes.
    pub fn from_bytes(bytes: [u8; ENTRY_ID_SIZE]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Raw bytes used as the storage key.
    pub fn as_bytes(&self) -> &[u8; ENTRY_ID_SIZE] {
        self.0.as_bytes()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self)
    }
}

/// A catalog entry: `{ id, no, name }`.
///
/// Storage metadata (version counter, creation time) never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Catalog number, unique across entries.
    pub no: u32,
    /// Lowercase name.
    pub name: String,
}

impl Entry {
    /// Overlay the fields present in `patch` onto this entry.
    pub fn merged(mut self, patch: &EntryPatch) -> Self {
        if let Some(no) = patch.no {
            self.no = no;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        self
    }
}
