//! `MockSource` — a test double for `RepoSource`.
//!
//! Serves pre-built pages from memory and records every page requested, so
//! tests of the paging loop and of the entry flow need no HTTP server.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use records::RepositoryRecord;

use crate::{FetchError, RepoSource};

/// Behaviour injected into `MockSource` at construction time.
pub enum MockBehaviour {
    /// Serve these pages in order; anything past the end is empty.
    Pages(Vec<Vec<RepositoryRecord>>),
    /// Fail every request with `FetchError::Status` carrying this status.
    FailStatus(u16),
}

/// A mock source that records every `(username, page)` it is asked for.
pub struct MockSource {
    pub behaviour: MockBehaviour,
    pub calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockSource {
    /// Create a mock that serves the given pages.
    pub fn with_pages(pages: Vec<Vec<RepositoryRecord>>) -> Self {
        Self {
            behaviour: MockBehaviour::Pages(pages),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock for a user with no repositories.
    pub fn empty() -> Self {
        Self::with_pages(Vec::new())
    }

    /// Create a mock whose every request fails.
    pub fn failing(status: u16) -> Self {
        Self {
            behaviour: MockBehaviour::FailStatus(status),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pages requested so far, in call order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, page)| *page)
            .collect()
    }

    /// Number of page requests made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Build `count` records owned by `author`, named `{prefix}-{i}`.
pub fn sample_records(author: &str, prefix: &str, count: usize) -> Vec<RepositoryRecord> {
    (0..count)
        .map(|i| RepositoryRecord {
            name: format!("{prefix}-{i}"),
            author: author.to_string(),
            author_url: format!("https://github.com/{author}"),
            language: Some("Rust".to_string()),
            stargazers_count: i as i64,
            watchers_count: i as i64,
            forks_count: 0,
            url: format!("https://github.com/{author}/{prefix}-{i}"),
        })
        .collect()
}

#[async_trait]
impl RepoSource for MockSource {
    async fn fetch_page(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError> {
        self.calls.lock().unwrap().push((username.to_string(), page));

        match &self.behaviour {
            MockBehaviour::Pages(pages) => Ok(page
                .checked_sub(1)
                .and_then(|index| pages.get(index as usize))
                .cloned()
                .unwrap_or_default()),
            MockBehaviour::FailStatus(status) => Err(FetchError::Status {
                page,
                status: *status,
                body: "mock failure".to_string(),
            }),
        }
    }
}
