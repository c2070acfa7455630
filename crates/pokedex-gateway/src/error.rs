//! Error handling for the gateway.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pokedex_core::{CatalogError, SeedError};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Internal server error.
    #[error("{0}")]
    Internal(String),

    /// Bad request.
    #[error("{0}")]
    BadRequest(String),

    /// Not found.
    #[error("{0}")]
    NotFound(String),

    /// The external catalog failed or returned unusable data.
    #[error("{0}")]
    Upstream(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error flag.
    pub error: bool,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
        };

        let body = ErrorResponse {
            error: true,
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => AppError::NotFound(err.to_string()),
            CatalogError::DuplicateEntry { .. }
            | CatalogError::InvalidRequest { .. }
            | CatalogError::Validation(_) => AppError::BadRequest(err.to_string()),
            CatalogError::Internal => AppError::Internal(err.to_string()),
        }
    }
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        error!(error = %err, "seed failed");
        match err {
            SeedError::Fetch(_) | SeedError::InvalidReference { .. } => {
                AppError::Upstream(err.to_string())
            }
            SeedError::Store(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JoinError> for AppError {
    fn from(err: JoinError) -> Self {
        error!(error = %err, "blocking handler task failed");
        AppError::Internal(CatalogError::Internal.to_string())
    }
}
