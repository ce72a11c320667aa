//! Fetch a user's repositories and store them.
//!
//! The fetch runs to completion (every page) before the catalog is touched.

use std::future::Future;

use fetcher::RepoSource;
use records::RepositoryRecord;
use tracing::{info, instrument, warn};

use crate::{Catalog, EngineError};

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// An author row and `repositories` repository rows were written.
    Imported { user_id: i32, repositories: usize },
    /// The user has no public repositories; nothing was written.
    Empty,
}

/// Fetch every page of `username`'s repositories, then open the catalog and
/// store them as one batch.
///
/// `open` runs only after the last page has arrived, so a failed fetch never
/// touches the database. The opened catalog is handed back for the queries
/// that follow.
///
/// A user without repositories is not an error: the store rejects the empty
/// batch, nothing is written and [`ImportOutcome::Empty`] is returned.
///
/// # Errors
/// Fetch failures, failures opening the catalog, and database failures other
/// than the empty batch.
#[instrument(skip(source, open))]
pub async fn import_user<S, C, F, Fut, E>(
    source: &S,
    username: &str,
    open: F,
) -> Result<(C, ImportOutcome), EngineError>
where
    S: RepoSource + ?Sized,
    C: Catalog,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C, E>>,
    E: Into<EngineError>,
{
    let records = source.fetch_all(username).await?;
    let catalog = match open().await {
        Ok(catalog) => catalog,
        Err(e) => return Err(e.into()),
    };
    let outcome = store_batch(&catalog, username, &records).await?;
    Ok((catalog, outcome))
}

/// Store an already fetched batch for `username`.
///
/// Same empty-batch handling as [`import_user`].
///
/// # Errors
/// Database failures other than the empty batch.
#[instrument(skip(catalog, records), fields(count = records.len()))]
pub async fn store_batch<C>(
    catalog: &C,
    username: &str,
    records: &[RepositoryRecord],
) -> Result<ImportOutcome, EngineError>
where
    C: Catalog + ?Sized,
{
    match catalog.add_data(records).await {
        Ok(user_id) => {
            info!("Imported {} repositories for {}", records.len(), username);
            Ok(ImportOutcome::Imported {
                user_id,
                repositories: records.len(),
            })
        }
        Err(db::DbError::EmptyBatch) => {
            warn!("{} has no repositories; nothing stored", username);
            Ok(ImportOutcome::Empty)
        }
        Err(e) => Err(e.into()),
    }
}
