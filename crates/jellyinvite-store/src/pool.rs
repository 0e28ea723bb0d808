//! SQLite connection pool
//!
//! File databases run in WAL mode with up to five connections. The
//! in-memory variant keeps a single connection, since every SQLite memory
//! database is private to the connection that opened it. Both apply the
//! embedded schema before the pool is handed out.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use jellyinvite_core::config::DatabaseConfig;

use crate::StoreError;

const SCHEMA: &str = include_str!("migrations/20261019_initial.sql");

const FILE_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool of SQLite connections with the jellyinvite schema applied
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Opens (creating if needed) the database file at `db_path`
    ///
    /// # Errors
    /// `ConnectionFailed` if the directory or file cannot be opened,
    /// `MigrationFailed` if the schema cannot be applied
    pub async fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::ConnectionFailed(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let db = Self::open(options, FILE_CONNECTIONS, &db_path.display().to_string()).await?;
        tracing::info!(path = %db_path.display(), "Opened database");
        Ok(db)
    }

    /// Opens the database named by the `database` config section
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        Self::new(&config.path).await
    }

    /// Opens a private in-memory database, used by tests
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new().filename(":memory:");
        Self::open(options, 1, ":memory:").await
    }

    async fn open(
        options: SqliteConnectOptions,
        max_connections: u32,
        label: &str,
    ) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(format!("cannot open {label}: {e}")))?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::MigrationFailed(format!("{label}: {e}")))?;

        tracing::debug!(database = label, max_connections, "Schema ready");
        Ok(Self { pool })
    }

    /// The underlying sqlx pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
