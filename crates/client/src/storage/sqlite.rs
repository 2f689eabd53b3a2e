use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::Mutex;

use super::{SessionStorage, StorageError, WriteBatch};

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Url(String),
}

/// SQLite-backed session storage that survives restarts.
///
/// The pool is opened lazily on first use and capped at one connection, so
/// writes are serialized and `sqlite::memory:` keeps a single database.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    location: Location,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteStorage {
    /// Storage in a database file, created (with parent directories) on
    /// first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_location(Location::File(path.into()))
    }

    /// Storage at a SQLite connection URL, e.g. `sqlite::memory:`.
    pub fn connect_url(url: impl Into<String>) -> Self {
        Self::with_location(Location::Url(url.into()))
    }

    fn with_location(location: Location) -> Self {
        Self {
            location,
            pool: Arc::new(Mutex::new(None)),
        }
    }

    async fn pool(&self) -> anyhow::Result<SqlitePool> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        let options = match &self.location {
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create session directory at {parent:?}")
                    })?;
                }
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
            }
            Location::Url(url) => SqliteConnectOptions::from_str(url)
                .with_context(|| format!("invalid SQLite URL {url:?}"))?
                .create_if_missing(true),
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open session database at {:?}", self.location))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_entries (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create session_entries table")?;

        tracing::debug!(location = ?self.location, "session database ready");
        *guard = Some(pool.clone());
        Ok(pool)
    }
}

#[async_trait]
impl SessionStorage for SqliteStorage {
    async fn load(&self, keys: &[&str]) -> Result<BTreeMap<String, String>, StorageError> {
        let pool = self.pool().await?;

        // One statement, one snapshot: never interleaves with a batch commit.
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM session_entries")
                .fetch_all(&pool)
                .await
                .context("failed to read session entries")?;

        Ok(rows
            .into_iter()
            .filter(|(key, _)| keys.contains(&key.as_str()))
            .collect())
    }

    async fn apply(&self, batch: WriteBatch) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }
        let pool = self.pool().await?;

        let mut tx = pool
            .begin()
            .await
            .context("failed to begin session transaction")?;

        for key in &batch.removals {
            sqlx::query("DELETE FROM session_entries WHERE key = ?1")
                .bind(key)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("failed to remove session key {key:?}"))?;
        }

        for (key, value) in &batch.writes {
            sqlx::query(
                r#"
                INSERT INTO session_entries (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to write session key {key:?}"))?;
        }

        tx.commit()
            .await
            .context("failed to commit session transaction")?;
        Ok(())
    }
}
