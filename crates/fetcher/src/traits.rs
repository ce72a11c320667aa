//! The `RepoSource` trait — one page of a user's repositories at a time.

use async_trait::async_trait;
use records::RepositoryRecord;
use tracing::{debug, info, instrument};

use crate::FetchError;

/// Fixed page size requested from the listing endpoint.
pub const PER_PAGE: u32 = 100;

/// Anything that can list a user's repositories page by page.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetch page `page` (1-based) of `username`'s repositories.
    ///
    /// An empty vector means there are no further pages.
    async fn fetch_page(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError>;

    /// Fetch every page, starting at 1, until one comes back empty.
    ///
    /// Pages are requested strictly one after another. There is no upper
    /// bound besides the empty page.
    #[instrument(skip(self))]
    async fn fetch_all(&self, username: &str) -> Result<Vec<RepositoryRecord>, FetchError> {
        let mut repositories = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(username, page).await?;
            if batch.is_empty() {
                debug!(page, "empty page, stopping");
                break;
            }
            debug!(page, count = batch.len(), "fetched page");
            repositories.extend(batch);
            page += 1;
        }

        info!(
            "Fetched {} repositories for {} in {} page(s)",
            repositories.len(),
            username,
            page - 1
        );
        Ok(repositories)
    }
}
