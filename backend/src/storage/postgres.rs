use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::KeyValueStore;
use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

/// Collections persisted as JSONB documents in a single `collections` table
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a connection pool from the storage configuration
    pub async fn connect(config: &StorageConfig) -> anyhow::Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .context("storage.database_url is required for the postgres backend")?;

        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await?;

        Ok(Self::new(db))
    }

    /// Create the `collections` table if it does not exist yet
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for PgStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let value = sqlx::query_scalar::<_, Value>("SELECT value FROM collections WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO collections (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await
        .map_err(storage_error)?;

        tracing::debug!("Stored collection {}", key);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Connectivity failures are reported as an unavailable store
fn storage_error(error: sqlx::Error) -> AppError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::StorageError(error.to_string())
        }
        other => AppError::DatabaseError(other),
    }
}
