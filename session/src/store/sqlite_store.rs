//! SQLiteTokenStore
//! --------------------
//! Durable backing for [`TokenStore`]: a single `local_storage` table of
//! string keys and values, so the refresh token survives restarts of the
//! client.
use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::{debug, instrument};

use super::TokenStore;

/// SQLite-based persistence backend for client tokens.
///
///   - schema creation on open
///   - upsert semantics (`set`)
///   - idempotent removal (`remove`)
pub struct SQLiteTokenStore {
    pool: SqlitePool,
}

impl SQLiteTokenStore {
    /// Wraps an existing pool and ensures the schema exists.
    pub async fn from_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Open (creating if missing) the database at `url`, e.g.
    /// `sqlite://users-client.db`.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        if !url.starts_with("sqlite:") {
            anyhow::bail!("token store url must use the sqlite scheme, got {}", url);
        }

        let opts = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid token store url {}", url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to open token store {}", url))?;

        debug!(url, "token store opened");
        Self::from_pool(pool).await
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create local_storage table")?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TokenStore for SQLiteTokenStore {
    #[instrument(skip(self), target = "token_store", level = "debug")]
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    #[instrument(skip(self, value), target = "token_store", level = "debug")]
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value;
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip(self), target = "token_store", level = "debug")]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
