use tenordash_core::CoreError;
use thiserror::Error;

/// Failures talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(String),
    #[error("timed out after {secs}s connecting to the document store")]
    ConnectTimeout { secs: u64 },
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Failures surfaced by [`crate::get_user_rankings`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// Rejected before the store was touched.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),
    #[error("failed to load rankings: {0}")]
    Upstream(#[from] StoreError),
}
