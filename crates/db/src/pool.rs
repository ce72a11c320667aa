//! Database creation, Postgres connection pool and schema migrations.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use tracing::{debug, info};

use crate::{DbError, StoreConfig};

/// Type alias for the pool owned by a [`crate::Store`].
pub type DbPool = PgPool;

/// SQLSTATE raised by `CREATE DATABASE` when the name is taken.
const DUPLICATE_DATABASE: &str = "42P04";

/// SQLSTATE raised instead of `42P04` when a concurrent `CREATE DATABASE`
/// for the same name commits first (`pg_database_datname_index`).
const UNIQUE_VIOLATION: &str = "23505";

/// Create `database` on the configured server unless it already exists.
///
/// `database` must already have passed
/// [`crate::config::normalize_database_name`]. Returns `true` when the
/// database was created by this call.
pub async fn ensure_database(config: &StoreConfig, database: &str) -> Result<bool, DbError> {
    let options = config.connect_options(&config.maintenance_database)?;
    let mut conn = PgConnection::connect_with(&options).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(database)
            .fetch_one(&mut conn)
            .await?;

    let created = if exists {
        false
    } else {
        create_database(&mut conn, database).await?
    };

    conn.close().await?;

    if created {
        info!("Created database {}", database);
    } else {
        debug!("Database {} already exists", database);
    }
    Ok(created)
}

/// Issue `CREATE DATABASE` on `conn`.
///
/// A name that is already taken, including by a creator racing this one,
/// yields `Ok(false)` instead of an error.
pub async fn create_database(conn: &mut PgConnection, database: &str) -> Result<bool, DbError> {
    // CREATE DATABASE cannot be prepared; send it as a simple query.
    let statement = format!(r#"CREATE DATABASE "{database}""#);
    match conn.execute(statement.as_str()).await {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(e))
            if matches!(
                e.code().as_deref(),
                Some(DUPLICATE_DATABASE | UNIQUE_VIOLATION)
            ) =>
        {
            debug!("Database {} was created concurrently", database);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a new connection pool for the given options.
///
/// `max_connections` controls the pool ceiling.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<DbPool, DbError> {
    info!("Connecting to database (max_connections={})", max_connections);
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Run embedded SQLx migrations located in `./migrations` (relative to the
/// workspace root at build time).
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
