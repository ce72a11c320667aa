//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("invalid database name '{name}': {reason}")]
    InvalidDatabaseName { name: String, reason: &'static str },

    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// `add_data` was given no records; nothing was written.
    #[error("invalid input: no repositories to insert")]
    EmptyBatch,

    /// `add_data` was given records from more than one author.
    #[error("invalid input: batch mixes authors '{expected}' and '{found}'")]
    MixedAuthors { expected: String, found: String },

    /// The batch length does not fit the `repos_count` column.
    #[error("invalid input: {0} repositories exceed the repos_count column")]
    BatchTooLarge(usize),
}
