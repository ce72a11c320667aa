//! Wire shape of the GitHub repository listing.
//!
//! Only the fields the record needs are declared; serde ignores the rest.

use records::RepositoryRecord;
use serde::Deserialize;

/// Owner object nested in every listing entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOwner {
    pub login: String,
    pub html_url: String,
}

/// One entry of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub name: String,
    pub owner: ApiOwner,
    /// `null` when GitHub could not detect a language.
    pub language: Option<String>,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks_count: i64,
    pub html_url: String,
}

impl From<ApiRepository> for RepositoryRecord {
    fn from(repo: ApiRepository) -> Self {
        Self {
            name: repo.name,
            author: repo.owner.login,
            author_url: repo.owner.html_url,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            watchers_count: repo.watchers_count,
            forks_count: repo.forks_count,
            url: repo.html_url,
        }
    }
}

/// Decode one page body into records.
pub fn decode_page(body: &[u8]) -> Result<Vec<RepositoryRecord>, serde_json::Error> {
    let page: Vec<ApiRepository> = serde_json::from_slice(body)?;
    Ok(page.into_iter().map(RepositoryRecord::from).collect())
}
