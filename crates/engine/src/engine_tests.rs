//! Tests for the entry flow.
//!
//! These use `MockSource` and an in-memory catalog so no HTTP server or
//! Postgres connection is required. The store's own behaviour against a
//! live database is covered in `crates/db/tests/`.

use std::future::{ready, Ready};
use std::sync::Mutex;

use async_trait::async_trait;
use db::DbError;
use fetcher::mock::{sample_records, MockSource};
use fetcher::PER_PAGE;
use records::RepositoryRecord;

use crate::{
    describe, export_pretty, import_user, store_batch, Catalog, EngineError, ImportOutcome, NO_DATA,
};

// ---------------------------------------------------------------------------
// In-memory catalog with the store's semantics.
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryCatalog {
    /// (user_id, name, url)
    users: Mutex<Vec<(i32, String, String)>>,
    /// (author_id, record)
    repositories: Mutex<Vec<(i32, RepositoryRecord)>>,
}

impl MemoryCatalog {
    fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn joined(&self) -> Vec<RepositoryRecord> {
        let users = self.users.lock().unwrap();
        self.repositories
            .lock()
            .unwrap()
            .iter()
            .map(|(author_id, record)| {
                let (_, name, url) = users
                    .iter()
                    .find(|(id, _, _)| id == author_id)
                    .expect("author row exists");
                RepositoryRecord {
                    author: name.clone(),
                    author_url: url.clone(),
                    ..record.clone()
                }
            })
            .collect()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn add_data(&self, records: &[RepositoryRecord]) -> Result<i32, DbError> {
        let first = records.first().ok_or(DbError::EmptyBatch)?;
        let mut users = self.users.lock().unwrap();
        let user_id = users.len() as i32 + 1;
        users.push((user_id, first.author.clone(), first.author_url.clone()));
        self.repositories
            .lock()
            .unwrap()
            .extend(records.iter().map(|r| (user_id, r.clone())));
        Ok(user_id)
    }

    async fn most_popular(&self) -> Result<Option<RepositoryRecord>, DbError> {
        let mut best: Option<RepositoryRecord> = None;
        for record in self.joined() {
            if best.as_ref().map_or(true, |b| record.popularity() > b.popularity()) {
                best = Some(record);
            }
        }
        Ok(best)
    }

    async fn find_by_name(&self, title: &str) -> Result<Option<RepositoryRecord>, DbError> {
        Ok(self.joined().into_iter().find(|r| r.name == title))
    }

    async fn export_json(&self) -> Result<Vec<RepositoryRecord>, DbError> {
        Ok(self.joined())
    }
}

/// Opener that hands out a shared reference to `catalog`.
fn shared<'a>(
    catalog: &'a MemoryCatalog,
) -> impl FnOnce() -> Ready<Result<&'a MemoryCatalog, DbError>> + 'a {
    move || ready(Ok(catalog))
}

// ============================================================
// import_user
// ============================================================

#[tokio::test]
async fn import_stores_every_fetched_page() {
    let pages: Vec<_> = (0..2)
        .map(|p| sample_records("octocat", &format!("p{p}"), PER_PAGE as usize))
        .collect();
    let source = MockSource::with_pages(pages);
    let catalog = MemoryCatalog::default();

    let (_, outcome) = import_user(&source, "octocat", shared(&catalog))
        .await
        .expect("import succeeds");

    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            user_id: 1,
            repositories: 200
        }
    );
    assert_eq!(source.requested_pages(), vec![1, 2, 3]);
    assert_eq!(catalog.user_count(), 1);
    assert_eq!(catalog.export_json().await.unwrap().len(), 200);
}

#[tokio::test]
async fn catalog_is_opened_after_the_last_page() {
    let source = MockSource::with_pages(vec![
        sample_records("octocat", "a", 3),
        sample_records("octocat", "b", 3),
    ]);
    let catalog = MemoryCatalog::default();

    let (opened, _) = import_user(&source, "octocat", || {
        assert_eq!(source.requested_pages(), vec![1, 2, 3]);
        ready(Ok::<_, DbError>(&catalog))
    })
    .await
    .expect("import succeeds");

    assert_eq!(opened.user_count(), 1);
}

#[tokio::test]
async fn user_without_repositories_creates_no_author() {
    let source = MockSource::empty();
    let catalog = MemoryCatalog::default();

    let (_, outcome) = import_user(&source, "nobody", shared(&catalog))
        .await
        .expect("empty user is not an error");

    assert_eq!(outcome, ImportOutcome::Empty);
    assert_eq!(catalog.user_count(), 0);
}

#[tokio::test]
async fn fetch_failure_never_opens_the_catalog() {
    let source = MockSource::failing(403);
    let catalog = MemoryCatalog::default();
    let mut opened = false;

    let err = import_user(&source, "octocat", || {
        opened = true;
        ready(Ok::<_, DbError>(&catalog))
    })
    .await
    .expect_err("fetch failure propagates");

    assert!(matches!(err, EngineError::Fetch(_)));
    assert!(!opened);
    assert_eq!(catalog.user_count(), 0);
}

#[tokio::test]
async fn open_failure_propagates() {
    let source = MockSource::with_pages(vec![sample_records("octocat", "r", 1)]);

    let err = import_user(&source, "octocat", || {
        ready(Err::<MemoryCatalog, _>(DbError::InvalidConfig("server down".into())))
    })
    .await
    .expect_err("open failure propagates");

    assert!(matches!(err, EngineError::Database(DbError::InvalidConfig(_))));
}

#[tokio::test]
async fn other_database_errors_propagate() {
    #[derive(Debug)]
    struct Rejecting;

    #[async_trait]
    impl Catalog for Rejecting {
        async fn add_data(&self, records: &[RepositoryRecord]) -> Result<i32, DbError> {
            Err(DbError::MixedAuthors {
                expected: records[0].author.clone(),
                found: "someone-else".into(),
            })
        }
        async fn most_popular(&self) -> Result<Option<RepositoryRecord>, DbError> {
            Ok(None)
        }
        async fn find_by_name(&self, _: &str) -> Result<Option<RepositoryRecord>, DbError> {
            Ok(None)
        }
        async fn export_json(&self) -> Result<Vec<RepositoryRecord>, DbError> {
            Ok(Vec::new())
        }
    }

    let source = MockSource::with_pages(vec![sample_records("octocat", "r", 2)]);
    let err = import_user(&source, "octocat", || ready(Ok::<_, DbError>(Rejecting)))
        .await
        .expect_err("must propagate");
    assert!(matches!(err, EngineError::Database(DbError::MixedAuthors { .. })));
}

#[tokio::test]
async fn second_import_gets_its_own_author() {
    let catalog = MemoryCatalog::default();

    import_user(
        &MockSource::with_pages(vec![sample_records("alice", "a", 2)]),
        "alice",
        shared(&catalog),
    )
    .await
    .expect("alice");
    let (_, outcome) = import_user(
        &MockSource::with_pages(vec![sample_records("bob", "b", 1)]),
        "bob",
        shared(&catalog),
    )
    .await
    .expect("bob");

    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            user_id: 2,
            repositories: 1
        }
    );
    let found = catalog.find_by_name("b-0").await.unwrap().expect("row");
    assert_eq!(found.author, "bob");
}

#[tokio::test]
async fn store_batch_of_nothing_is_empty() {
    let catalog = MemoryCatalog::default();
    let outcome = store_batch(&catalog, "nobody", &[]).await.expect("not an error");
    assert_eq!(outcome, ImportOutcome::Empty);
    assert_eq!(catalog.user_count(), 0);
}

// ============================================================
// report
// ============================================================

#[tokio::test]
async fn most_popular_is_described() {
    let catalog = MemoryCatalog::default();
    let source = MockSource::with_pages(vec![sample_records("octocat", "r", 5)]);
    import_user(&source, "octocat", shared(&catalog))
        .await
        .expect("import");

    let top = catalog.most_popular().await.unwrap();
    let text = describe(top.as_ref());

    // sample_records gives record i popularity 2*i.
    assert!(text.starts_with("Repository r-4 (https://github.com/octocat/r-4) by octocat"));
    assert!(text.ends_with("4 stars, 4 watchers and 0 forks"));
}

#[test]
fn missing_result_uses_the_fallback() {
    assert_eq!(describe(None), NO_DATA);
}

#[test]
fn export_is_a_json_array_of_records() {
    let records = sample_records("octocat", "r", 2);
    let text = export_pretty(&records).expect("serialise");
    assert!(text.starts_with('['));
    assert!(text.contains("\"author_url\": \"https://github.com/octocat\""));
    assert!(text.contains("\"name\": \"r-1\""));
}
