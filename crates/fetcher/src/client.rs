//! HTTP implementation of [`RepoSource`] against the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use records::RepositoryRecord;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use tracing::debug;

use crate::api::decode_page;
use crate::{FetchError, RepoSource, PER_PAGE};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// API root. May carry a path prefix, e.g. `https://ghe.example.com/api/v3`.
    pub base_url: String,
    /// Sent as `Authorization: token <token>` when present.
    pub token: Option<String>,
    pub user_agent: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            user_agent: concat!("repostats/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

/// Lists repositories through `GET /users/{username}/repos`.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    config: FetcherConfig,
}

impl GitHubClient {
    /// Build the underlying HTTP client.
    ///
    /// # Errors
    /// `FetchError::InvalidBaseUrl` if `base_url` is not an http(s) URL, and
    /// `FetchError::Http` if the TLS backend cannot be initialised.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// `{base}/users/{username}/repos` with the username percent-encoded as a
    /// single path segment.
    fn listing_url(&self, username: &str) -> Result<Url, FetchError> {
        if username.is_empty() || username == "." || username == ".." {
            return Err(FetchError::InvalidUsername(username.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        Ok(url)
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn fetch_page(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError> {
        let url = self.listing_url(username)?;
        debug!("GET {} page={}", url, page);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[("per_page", PER_PAGE), ("page", page)]);

        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.bytes().await?;
        decode_page(&body).map_err(|source| FetchError::Decode { page, source })
    }
}
