//! Engine-level error types.

use thiserror::Error;

/// Errors that abort the entry flow.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Listing the user's repositories failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] fetcher::FetchError),

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}
