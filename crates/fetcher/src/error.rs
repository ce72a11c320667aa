//! Fetch-level error type.

use thiserror::Error;

/// Errors returned while listing a user's repositories.
///
/// None of these are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, or reading the body.
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// `base_url` cannot have a path appended to it.
    #[error("invalid GitHub API base url: {0}")]
    InvalidBaseUrl(String),

    /// The username cannot name a single path segment.
    #[error("invalid GitHub username {0:?}")]
    InvalidUsername(String),

    /// The API answered with a non-success status.
    #[error("GitHub API returned {status} for page {page}: {body}")]
    Status {
        page: u32,
        status: u16,
        body: String,
    },

    /// The page body did not have the expected shape.
    #[error("failed to decode repository page {page}: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}
