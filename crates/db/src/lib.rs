pub mod models;

use std::str::FromStr;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Handle to the SQLite pool, constructed once at startup and injected
/// into every route handler.
#[derive(Clone)]
pub struct DBService {
    pub pool: Pool<Sqlite>,
}

impl DBService {
    pub async fn new(database_url: &str) -> Result<Self, anyhow::Error> {
        // foreign_keys must be on for the budget item cascade to fire.
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("database ready at {database_url}");
        Ok(Self { pool })
    }

    /// Private in-memory database for tests. A single connection keeps the
    /// database alive for the lifetime of the pool.
    pub async fn new_in_memory() -> Result<Self, anyhow::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}
