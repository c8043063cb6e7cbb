use async_trait::async_trait;
use crate::status::StatusRecord;

pub mod errors;
pub mod fetcher;
mod models;

pub use errors::{FetchError, FetchErrorKind, FetchStage};
pub use fetcher::StatusFetcher;

/// Anything able to report the current per-context statuses of the tracked branch.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_statuses(&self) -> Result<Vec<StatusRecord>, FetchError>;
}
