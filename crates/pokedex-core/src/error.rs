//! Core error types.

use sled::transaction::TransactionError;
use thiserror::Error;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another entry already holds this catalog number.
    #[error("duplicate catalog number: {no}")]
    Duplicate { no: u32 },

    /// Storage layer error.
    #[error("storage error: {0}")]
    Sled(#[from] sled::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Key decoding error.
    #[error("invalid key format")]
    InvalidKey,

    /// A store call moved off the async runtime panicked or was cancelled.
    #[error("blocking store task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl From<TransactionError<StoreError>> for StoreError {
    fn from(err: TransactionError<StoreError>) -> Self {
        match err {
            TransactionError::Abort(err) => err,
            TransactionError::Storage(err) => StoreError::Sled(err),
        }
    }
}

/// Rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced by the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Create or update would violate catalog number uniqueness.
    #[error("pokemon exists in db: no {no}")]
    DuplicateEntry { no: u32 },

    /// No entry matched the term by number, id, or name.
    #[error("no pokemon found with name, no or id: {term}")]
    NotFound { term: String },

    /// Delete target does not exist.
    #[error("pokemon with id {id} was not found")]
    InvalidRequest { id: String },

    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Any other store failure. The cause is logged, never returned.
    #[error("can't write pokemon, check server logs")]
    Internal,
}

/// Errors from the external catalog fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the remote API.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Errors from seeding. Collaborator failures pass through unwrapped.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Fetching the remote page failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Clearing or inserting failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A reference URL had no numeric segment before its trailing one.
    #[error("no catalog number in reference url: {url}")]
    InvalidReference { url: String },
}
