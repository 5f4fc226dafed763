use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{MemoryStore, PgStore, Store};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::migrate;

pub async fn connect_pool(config: &AppConfig) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::configuration("DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!(
        "✅ Connected to PostgreSQL (max {} connections)",
        config.database_max_connections
    );
    Ok(pool)
}

/// Picks the backend from configuration: PostgreSQL when `DATABASE_URL` is
/// set (schema applied on connect), the in-memory store otherwise.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>> {
    if config.database_url.is_none() {
        tracing::warn!("⚠️ DATABASE_URL not set, records will only live in memory");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = connect_pool(config).await?;
    migrate::run(&pool).await?;
    Ok(Arc::new(PgStore::new(pool)))
}
