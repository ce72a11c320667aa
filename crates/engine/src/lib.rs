//! `engine` crate — the fetch → store → report flow.
//!
//! Runs a [`fetcher::RepoSource`] to completion, hands the batch to a
//! [`Catalog`] and turns query results into printable sentences. Nothing here
//! touches the terminal.

pub mod catalog;
pub mod error;
pub mod import;
pub mod report;

pub use catalog::Catalog;
pub use error::EngineError;
pub use import::{import_user, store_batch, ImportOutcome};
pub use report::{describe, export_pretty, NO_DATA};

#[cfg(test)]
mod engine_tests;
