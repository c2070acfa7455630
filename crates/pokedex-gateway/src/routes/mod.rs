//! HTTP route handlers.

pub mod health;
pub mod pokemon;
pub mod seed;

use crate::error::AppError;

/// Run a synchronous catalog call on the blocking thread pool.
pub(crate) async fn blocking<T, E, F>(op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    E: Into<AppError> + Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    tokio::task::spawn_blocking(op).await?.map_err(Into::into)
}
