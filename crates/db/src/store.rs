//! `Store` — an owned handle on one repostats database.

use std::fmt;

use records::RepositoryRecord;
use tracing::{info, instrument};

use crate::config::normalize_database_name;
use crate::models::UserRow;
use crate::pool::{create_pool, ensure_database, run_migrations};
use crate::repository::{repositories, users};
use crate::{DbError, DbPool, StoreConfig};

/// Owns the connection pool for one database.
///
/// Every `open` builds an independent store; lifetime is managed by the
/// caller, who should finish with [`Store::close`].
pub struct Store {
    pool: DbPool,
    database: String,
}

impl Store {
    /// Create the database if needed, connect to it and apply the schema.
    ///
    /// Opening a database that already holds data leaves the data untouched.
    ///
    /// # Errors
    /// `DbError::InvalidDatabaseName` for names that are not plain
    /// identifiers, and connection or migration failures.
    #[instrument(skip(config), fields(database = %config.database))]
    pub async fn open(config: &StoreConfig) -> Result<Self, DbError> {
        let database = normalize_database_name(&config.database)?;
        ensure_database(config, &database).await?;

        let pool = create_pool(config.connect_options(&database)?, config.max_connections).await?;
        run_migrations(&pool).await?;

        Ok(Self { pool, database })
    }

    /// Name of the connected database, lower-cased.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Store one author's repositories.
    ///
    /// Inserts one author row (name and URL from the first record,
    /// `repos_count` = batch length), then one repository row per record
    /// linked to the author's generated id. Everything happens in one
    /// transaction; on any error nothing is committed.
    ///
    /// Returns the new author's `user_id`.
    ///
    /// # Errors
    /// `DbError::EmptyBatch` for an empty slice, `DbError::MixedAuthors`
    /// when the records do not share one author and `DbError::BatchTooLarge`
    /// when the count overflows `repos_count`. None of these write anything.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn add_data(&self, records: &[RepositoryRecord]) -> Result<i32, DbError> {
        let (first, repos_count) = check_batch(records)?;

        // Dropping `tx` on an early return rolls the batch back.
        let mut tx = self.pool.begin().await?;

        let author =
            users::insert_user(&mut *tx, &first.author, repos_count, &first.author_url).await?;
        for record in records {
            repositories::insert_repository(&mut *tx, author.user_id, record).await?;
        }

        tx.commit().await?;

        info!(
            "Stored {} repositories for {} (user_id={})",
            records.len(),
            author.name,
            author.user_id
        );
        Ok(author.user_id)
    }

    /// The repository with the largest stars + watchers + forks, if any.
    pub async fn most_popular(&self) -> Result<Option<RepositoryRecord>, DbError> {
        let row = repositories::most_popular(&self.pool).await?;
        Ok(row.map(RepositoryRecord::from))
    }

    /// The first repository titled exactly `title`, if any.
    pub async fn find_by_name(&self, title: &str) -> Result<Option<RepositoryRecord>, DbError> {
        let row = repositories::find_by_title(&self.pool, title).await?;
        Ok(row.map(RepositoryRecord::from))
    }

    /// Every stored repository with its author, in insertion order.
    pub async fn export_json(&self) -> Result<Vec<RepositoryRecord>, DbError> {
        let rows = repositories::list_with_authors(&self.pool).await?;
        Ok(rows.into_iter().map(RepositoryRecord::from).collect())
    }

    /// Every author row, in insertion order.
    ///
    /// Not used by the import flow; the integration tests read it to check
    /// which author each batch was linked to.
    pub async fn authors(&self) -> Result<Vec<UserRow>, DbError> {
        users::list_users(&self.pool).await
    }

    /// Release the store's connections.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// The batch's first record and its length as a `repos_count` value.
fn check_batch(records: &[RepositoryRecord]) -> Result<(&RepositoryRecord, i32), DbError> {
    let first = records.first().ok_or(DbError::EmptyBatch)?;
    if let Some(other) = records.iter().find(|r| r.author != first.author) {
        return Err(DbError::MixedAuthors {
            expected: first.author.clone(),
            found: other.author.clone(),
        });
    }
    Ok((first, repos_count(records.len())?))
}

fn repos_count(len: usize) -> Result<i32, DbError> {
    i32::try_from(len).map_err(|_| DbError::BatchTooLarge(len))
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "database {}", self.database)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}
