//! `records` crate — the repository record shared by the fetcher, the store
//! and the entry flow.
//!
//! A [`RepositoryRecord`] is what the fetcher produces from one entry of the
//! GitHub listing, and also what the store hands back from its read queries
//! (with the author fields taken from the joined `users` row).

use std::fmt;

use serde::{Deserialize, Serialize};

/// One repository's metadata.
///
/// Serialises to a JSON object with exactly these eight keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name (stored as `repositories.title`).
    pub name: String,
    /// Owner login.
    pub author: String,
    /// Owner profile URL.
    pub author_url: String,
    /// Primary language, if GitHub detected one.
    pub language: Option<String>,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks_count: i64,
    /// Repository HTML URL.
    pub url: String,
}

impl RepositoryRecord {
    /// Stars + watchers + forks; the ordering key of the most-popular query.
    pub fn popularity(&self) -> i64 {
        self.stargazers_count + self.watchers_count + self.forks_count
    }
}

/// Human-readable sentence describing the repository.
impl fmt::Display for RepositoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} ({}) by {} ({}), written in {} with {} stars, {} watchers and {} forks",
            self.name,
            self.url,
            self.author,
            self.author_url,
            self.language.as_deref().unwrap_or("an unspecified language"),
            self.stargazers_count,
            self.watchers_count,
            self.forks_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(language: Option<&str>) -> RepositoryRecord {
        RepositoryRecord {
            name: "ripgrep".into(),
            author: "BurntSushi".into(),
            author_url: "https://github.com/BurntSushi".into(),
            language: language.map(str::to_owned),
            stargazers_count: 40,
            watchers_count: 2,
            forks_count: 7,
            url: "https://github.com/BurntSushi/ripgrep".into(),
        }
    }

    #[test]
    fn popularity_sums_the_three_counters() {
        assert_eq!(sample(None).popularity(), 49);
    }

    #[test]
    fn display_names_every_field() {
        let text = sample(Some("Rust")).to_string();
        assert_eq!(
            text,
            "Repository ripgrep (https://github.com/BurntSushi/ripgrep) by BurntSushi \
             (https://github.com/BurntSushi), written in Rust with 40 stars, 2 watchers and 7 forks"
        );
    }

    #[test]
    fn display_without_language() {
        let text = sample(None).to_string();
        assert!(text.contains("written in an unspecified language"));
    }

    #[test]
    fn serialises_with_the_eight_export_keys() {
        let value = serde_json::to_value(sample(None)).expect("serialise");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "author",
                "author_url",
                "forks_count",
                "language",
                "name",
                "stargazers_count",
                "url",
                "watchers_count",
            ]
        );
        assert!(value["language"].is_null());
    }
}
