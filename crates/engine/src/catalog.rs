//! The `Catalog` trait — the store operations the entry flow relies on.

use async_trait::async_trait;
use db::{DbError, Store};
use records::RepositoryRecord;

/// Persistence seam between the flow and the database.
///
/// Implemented for [`db::Store`] and for shared references to any catalog;
/// tests use an in-memory catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Store one author's batch and return the author's id.
    async fn add_data(&self, records: &[RepositoryRecord]) -> Result<i32, DbError>;

    async fn most_popular(&self) -> Result<Option<RepositoryRecord>, DbError>;

    async fn find_by_name(&self, title: &str) -> Result<Option<RepositoryRecord>, DbError>;

    async fn export_json(&self) -> Result<Vec<RepositoryRecord>, DbError>;
}

#[async_trait]
impl Catalog for Store {
    async fn add_data(&self, records: &[RepositoryRecord]) -> Result<i32, DbError> {
        Store::add_data(self, records).await
    }

    async fn most_popular(&self) -> Result<Option<RepositoryRecord>, DbError> {
        Store::most_popular(self).await
    }

    async fn find_by_name(&self, title: &str) -> Result<Option<RepositoryRecord>, DbError> {
        Store::find_by_name(self, title).await
    }

    async fn export_json(&self) -> Result<Vec<RepositoryRecord>, DbError> {
        Store::export_json(self).await
    }
}

#[async_trait]
impl<T: Catalog + ?Sized> Catalog for &T {
    async fn add_data(&self, records: &[RepositoryRecord]) -> Result<i32, DbError> {
        (**self).add_data(records).await
    }

    async fn most_popular(&self) -> Result<Option<RepositoryRecord>, DbError> {
        (**self).most_popular().await
    }

    async fn find_by_name(&self, title: &str) -> Result<Option<RepositoryRecord>, DbError> {
        (**self).find_by_name(title).await
    }

    async fn export_json(&self) -> Result<Vec<RepositoryRecord>, DbError> {
        (**self).export_json().await
    }
}
