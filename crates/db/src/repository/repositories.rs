//! Repository row operations and the three read queries.
//!
//! Every read joins `repositories` to `users` so the author fields come from
//! the author row, not from the fetched data.

use records::RepositoryRecord;
use sqlx::{PgConnection, PgPool};

use crate::{
    models::{RepositoryRow, RepositoryWithAuthorRow},
    DbError,
};

/// Insert one repository row owned by `author_id`.
pub async fn insert_repository(
    conn: &mut PgConnection,
    author_id: i32,
    record: &RepositoryRecord,
) -> Result<RepositoryRow, DbError> {
    let row = sqlx::query_as::<_, RepositoryRow>(
        r#"
        INSERT INTO repositories
            (title, author_id, language, stargazers_count, watchers_count, forks_count, url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING repo_id, title, author_id, language,
                  stargazers_count, watchers_count, forks_count, url
        "#,
    )
    .bind(record.name.as_str())
    .bind(author_id)
    .bind(record.language.as_deref())
    .bind(record.stargazers_count)
    .bind(record.watchers_count)
    .bind(record.forks_count)
    .bind(record.url.as_str())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

/// The repository with the largest stars + watchers + forks.
///
/// Ties go to the earliest inserted row.
pub async fn most_popular(pool: &PgPool) -> Result<Option<RepositoryWithAuthorRow>, DbError> {
    let row = sqlx::query_as::<_, RepositoryWithAuthorRow>(
        r#"
        SELECT r.title, u.name AS author, u.url AS author_url, r.language,
               r.stargazers_count, r.watchers_count, r.forks_count, r.url
        FROM repositories r
        JOIN users u ON r.author_id = u.user_id
        ORDER BY (r.stargazers_count + r.watchers_count + r.forks_count) DESC, r.repo_id ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// First repository (by insertion order) whose title equals `title` exactly.
pub async fn find_by_title(
    pool: &PgPool,
    title: &str,
) -> Result<Option<RepositoryWithAuthorRow>, DbError> {
    let row = sqlx::query_as::<_, RepositoryWithAuthorRow>(
        r#"
        SELECT r.title, u.name AS author, u.url AS author_url, r.language,
               r.stargazers_count, r.watchers_count, r.forks_count, r.url
        FROM repositories r
        JOIN users u ON r.author_id = u.user_id
        WHERE r.title = $1
        ORDER BY r.repo_id ASC
        LIMIT 1
        "#,
    )
    .bind(title)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Every repository joined with its author, in insertion order.
pub async fn list_with_authors(pool: &PgPool) -> Result<Vec<RepositoryWithAuthorRow>, DbError> {
    let rows = sqlx::query_as::<_, RepositoryWithAuthorRow>(
        r#"
        SELECT r.title, u.name AS author, u.url AS author_url, r.language,
               r.stargazers_count, r.watchers_count, r.forks_count, r.url
        FROM repositories r
        JOIN users u ON r.author_id = u.user_id
        ORDER BY r.repo_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
