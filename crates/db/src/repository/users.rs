//! Author row operations.

use sqlx::{PgConnection, PgPool};

use crate::{models::UserRow, DbError};

/// Insert an author row and return it with its generated `user_id`.
pub async fn insert_user(
    conn: &mut PgConnection,
    name: &str,
    repos_count: i32,
    url: &str,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (name, repos_count, url)
        VALUES ($1, $2, $3)
        RETURNING user_id, name, repos_count, url
        "#,
    )
    .bind(name)
    .bind(repos_count)
    .bind(url)
    .fetch_one(conn)
    .await?;

    Ok(row)
}

/// Return all author rows in insertion order.
///
/// Backs [`crate::Store::authors`]; only the integration tests call it.
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT user_id, name, repos_count, url FROM users ORDER BY user_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
