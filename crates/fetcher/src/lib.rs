//! `fetcher` crate — pages through a GitHub user's repository listing.
//!
//! The paging loop lives on the [`RepoSource`] trait; [`GitHubClient`] is the
//! HTTP implementation and [`mock::MockSource`] the in-memory test double.

pub mod api;
pub mod client;
pub mod error;
pub mod mock;
pub mod traits;

pub use client::{FetcherConfig, GitHubClient};
pub use error::FetchError;
pub use traits::{RepoSource, PER_PAGE};
