//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models. The shared record type lives in the
//! `records` crate.

use records::RepositoryRecord;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted author row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub user_id: i32,
    pub name: String,
    /// Size of the batch this row was created with.
    pub repos_count: i32,
    pub url: String,
}

// ---------------------------------------------------------------------------
// repositories
// ---------------------------------------------------------------------------

/// A persisted repository row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RepositoryRow {
    pub repo_id: i32,
    pub title: String,
    pub author_id: i32,
    pub language: Option<String>,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks_count: i64,
    pub url: String,
}

// ---------------------------------------------------------------------------
// repositories JOIN users
// ---------------------------------------------------------------------------

/// A repository row joined with its author, as returned by the read queries.
#[derive(Debug, Clone, FromRow)]
pub struct RepositoryWithAuthorRow {
    pub title: String,
    pub author: String,
    pub author_url: String,
    pub language: Option<String>,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks_count: i64,
    pub url: String,
}

impl From<RepositoryWithAuthorRow> for RepositoryRecord {
    fn from(row: RepositoryWithAuthorRow) -> Self {
        Self {
            name: row.title,
            author: row.author,
            author_url: row.author_url,
            language: row.language,
            stargazers_count: row.stargazers_count,
            watchers_count: row.watchers_count,
            forks_count: row.forks_count,
            url: row.url,
        }
    }
}
