//! SQLite-backed datastore
//!
//! Owns the connection pool and the schema bootstrap; the write and read
//! paths live in the `write` and `read` submodules, the dictionary upserts
//! in `dictionary`. The pool handed out by [`SqlDatastoreConfig`] is the
//! only shared mutable resource in the crate.

mod dictionary;
mod read;
mod schema;
mod write;

use super::Datastore;
use crate::model::{DataPointSet, MetricQuery, QueryGroup};
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Configuration for [`SqlDatastore`].
///
/// Passed explicitly to [`SqlDatastore::connect`] and owned by the instance;
/// there is no process-wide active datastore.
#[derive(Debug, Clone)]
pub struct SqlDatastoreConfig {
    /// Database file path; `None` selects a private in-memory database
    pub path: Option<PathBuf>,
    /// Maximum pooled connections for file-backed databases
    pub max_connections: u32,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl SqlDatastoreConfig {
    /// File-backed database at the given path (created if missing)
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Private in-memory database, for development and testing
    pub fn in_memory() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("database path cannot be empty".to_string()));
            }
        }
        if self.max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SqlDatastoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            // SQLite permits limited write concurrency; a single connection
            // avoids persistent "database is locked" failures under
            // concurrent batch writers.
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite-backed [`Datastore`]
pub struct SqlDatastore {
    pool: SqlitePool,
}

impl SqlDatastore {
    /// Open the database described by `config` and bootstrap the schema.
    ///
    /// Fails fast on invalid configuration before any connection is opened.
    pub async fn connect(config: SqlDatastoreConfig) -> Result<Self> {
        config.validate()?;

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);

        let connect_options = match &config.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .foreign_keys(true)
                    .busy_timeout(config.busy_timeout)
            }
            None => {
                // Each connection to ":memory:" is its own database, so an
                // in-memory store pins exactly one connection for its whole
                // lifetime.
                pool_options = pool_options
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                SqliteConnectOptions::new()
                    .in_memory(true)
                    .foreign_keys(true)
                    .busy_timeout(config.busy_timeout)
            }
        };

        let pool = pool_options.connect_with(connect_options).await?;

        let store = Self { pool };
        store.create_schema().await?;

        info!(
            path = %config
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ":memory:".to_string()),
            "datastore ready"
        );
        Ok(store)
    }

    async fn create_schema(&self) -> Result<()> {
        for statement in schema::CREATE_SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Datastore for SqlDatastore {
    async fn put_data_points(&self, set: &DataPointSet) -> Result<()> {
        write::put_data_points(&self.pool, set).await
    }

    async fn query(&self, query: &MetricQuery) -> Result<Vec<QueryGroup>> {
        read::query(&self.pool, query).await
    }

    async fn metric_names(&self) -> Result<Vec<String>> {
        read::metric_names(&self.pool).await
    }

    async fn tag_names(&self) -> Result<Vec<String>> {
        read::tag_names(&self.pool).await
    }

    async fn tag_values(&self) -> Result<Vec<String>> {
        read::tag_values(&self.pool).await
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
