use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Handle to the watchlist database. Cheap to clone; all clones share one
/// connection pool.
#[derive(Clone)]
pub struct WatchlistDb {
    pool: SqlitePool,
}

impl WatchlistDb {
    /// Open (creating if missing) the database at `database_url` and apply
    /// the schema.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    /// In-memory database, for tests and ephemeral runs.
    pub async fn memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    async fn init_schema(&self) -> Result<()> {
        for stmt in schema_statements(include_str!("../../../schema.sql")) {
            sqlx::query(&stmt).execute(&self.pool).await?;
        }

        tracing::debug!("Watchlist schema applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Split a schema file into executable statements. sqlx runs one statement
/// at a time, so the file is split on ';' — comment lines are dropped first
/// because their prose may contain semicolons too.
fn schema_statements(schema: &str) -> Vec<String> {
    let sql: String = schema
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(String::from)
        .collect()
}
