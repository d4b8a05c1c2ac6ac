//! Durable client-local storage.
//!
//! A single SQLite key/value table holding JSON documents: the auth token,
//! the cart, and display preferences. Scoped to one data directory.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

/// Persisted keys.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth.token";
    pub const CART: &str = "cart";
    pub const THEME: &str = "prefs.theme";
    pub const INSTALL_PROMPT_DISMISSED_AT: &str = "prefs.install_prompt_dismissed_at";
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Open (creating if needed) the store at `path`.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory at {parent:?}"))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open local store at {path:?}"))?;

        Self::init(pool).await
    }

    /// Throwaway store for tests and `--ephemeral` style runs.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("invalid in-memory sqlite url")?;
        // One long-lived connection: the database disappears with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("failed to open in-memory store")?;

        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key        TEXT PRIMARY KEY NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create kv table")?;

        Ok(Self { pool })
    }

    /// Wait for pending writes and close the pool. Later calls fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn get<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let row = sqlx::query(
            r#"
            SELECT value
            FROM kv
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to read {key} from local store"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let data: String = row.try_get("value")?;
        let value = serde_json::from_str(&data)
            .with_context(|| format!("failed to deserialize stored {key}"))?;
        Ok(Some(value))
    }

    pub async fn put<T>(&self, key: &str, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize {key} for local store"))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&payload)
        .bind(&now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write {key} to local store"))?;

        tracing::debug!(key, "stored");
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM kv
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to remove {key} from local store"))?;

        Ok(())
    }
}
