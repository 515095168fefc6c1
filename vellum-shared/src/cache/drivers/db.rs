//! Database cache driver
//!
//! Entries live in two Postgres tables:
//!
//! ```sql
//! CREATE TABLE cache_items (
//!     path       TEXT PRIMARY KEY,
//!     payload    TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! CREATE TABLE cache_item_tags (
//!     tag  TEXT NOT NULL,
//!     path TEXT NOT NULL
//! );
//! ```
//!
//! Tag invalidation joins through `cache_item_tags`; full clears delete both
//! tables outright.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::debug;

use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;
use crate::config::DatabaseConfig;

/// Postgres-backed cache driver
#[derive(Debug, Clone)]
pub struct DbDriver {
    pool: PgPool,
}

impl DbDriver {
    /// Connect to the database; failure means the backend is absent from this
    /// environment and the factory will skip it.
    pub async fn connect(config: &DatabaseConfig) -> CacheResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Postgres: {}", e)))?;

        debug!("Database cache driver connected");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by embedding applications and tests)
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CacheDriver for DbDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Db
    }

    async fn clear_all(&self) -> CacheResult<()> {
        sqlx::query("DELETE FROM cache_item_tags")
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to clear cache tags: {}", e)))?;
        sqlx::query("DELETE FROM cache_items")
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to clear cache items: {}", e)))?;

        debug!("Database cache cleared");
        Ok(())
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        sqlx::query("DELETE FROM cache_item_tags WHERE path = $1")
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to clear item tags: {}", e)))?;
        let result = sqlx::query("DELETE FROM cache_items WHERE path = $1")
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to clear item: {}", e)))?;

        debug!(
            path = path,
            rows = result.rows_affected(),
            "Database item invalidated"
        );
        Ok(())
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        let result = sqlx::query(
            "DELETE FROM cache_items \
             WHERE path IN (SELECT path FROM cache_item_tags WHERE tag = $1)",
        )
        .bind(tag)
        .execute(&self.pool)
        .await
        .map_err(|e| CacheError::Backend(format!("Failed to clear tagged items: {}", e)))?;
        sqlx::query("DELETE FROM cache_item_tags WHERE tag = $1")
            .bind(tag)
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to clear tag index: {}", e)))?;

        debug!(
            tag = tag,
            rows = result.rows_affected(),
            "Database tag invalidated"
        );
        Ok(())
    }
}
