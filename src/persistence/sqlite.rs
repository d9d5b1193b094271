//! SQLite implementation of the persistence layer.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::session::Session;
use crate::config::BlogConfig;
use crate::error::BlogError;

const SCHEMA: &str = include_str!("schema.sql");

/// Connection settings for [`PostStore::connect`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// SQLite connection string, e.g. `sqlite://blog.db` (relative) or
    /// `sqlite::memory:`. Three slashes make the path absolute.
    pub url: String,
    /// Pool size for file-backed databases.
    pub max_connections: u32,
    /// Timeout for acquiring a pooled connection.
    pub connect_timeout: Duration,
}

impl StoreOptions {
    /// Options for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// In-memory databases live and die with a single connection.
    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl From<&BlogConfig> for StoreOptions {
    fn from(config: &BlogConfig) -> Self {
        Self {
            url: config.database_url.clone(),
            max_connections: config.database_max_connections,
            connect_timeout: config.connect_timeout(),
        }
    }
}

/// SQLite-backed post storage using `sqlx::SqlitePool`.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    /// Opens (creating if missing) the database and ensures the schema
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] if the URL is malformed, the
    /// database cannot be opened, or schema creation fails.
    pub async fn connect(options: &StoreOptions) -> Result<Self, BlogError> {
        let mut connect_options = SqliteConnectOptions::from_str(&options.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool_options = SqlitePoolOptions::new().acquire_timeout(options.connect_timeout);
        let pool_options = if options.is_in_memory() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
            pool_options.max_connections(options.max_connections.max(1))
        };

        let pool = pool_options.connect_with(connect_options).await?;
        let store = Self { pool };
        store.ensure_schema().await?;

        tracing::debug!(url = %options.url, "post store ready");
        Ok(store)
    }

    /// Creates the `posts` table if it does not exist. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), BlogError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Opens a scoped session (one transaction).
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] if no connection can be acquired or
    /// the transaction cannot be started.
    pub async fn begin(&self) -> Result<Session, BlogError> {
        let tx = self.pool.begin().await?;
        Ok(Session::new(tx))
    }

    /// Opens a session that holds the write lock from its first statement
    /// (`BEGIN IMMEDIATE`).
    ///
    /// Any session that reads before it writes must start here: SQLite
    /// cannot upgrade a deferred read into a write while another writer is
    /// committing, and fails with `database is locked` instead of waiting
    /// on the busy timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] if no connection can be acquired or
    /// the write lock is not granted within the busy timeout.
    pub async fn begin_write(&self) -> Result<Session, BlogError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(Session::new(tx))
    }

    /// Round-trips a trivial query to check the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn ping(&self) -> Result<(), BlogError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// Closes every pooled connection. Later calls fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
