//! HTTP handlers

pub mod health;
pub mod page;
pub mod predict;
pub mod log;
pub mod model;

use crate::AppResult;

/// Run file and inference work off the async workers
pub(crate) async fn blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}
