use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::error::Result;

pub type DbPool = Pool<Sqlite>;

/// Opens the count database with the default pool size.
pub async fn connect(database_url: &str) -> Result<DbPool> {
    connect_with(database_url, 5).await
}

/// In-memory databases live per connection, so callers using `sqlite::memory:` should pass a
/// single connection.
pub async fn connect_with(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Run database migrations embedded at compile-time.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
