//! Redis cache driver
//!
//! Uses `redis::aio::ConnectionManager` for async multiplexed connections.
//! Full clears iterate the key prefix with SCAN (never KEYS) so a busy
//! server is not blocked; the rest of the keyspace is untouched.
//! Requires the `cache-redis` feature flag.

use tracing::debug;

use super::{item_key, redact_url, tag_key};
use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;
use crate::config::RedisConfig;

/// Redis-backed cache driver using ConnectionManager
#[derive(Clone)]
pub struct RedisDriver {
    connection_manager: redis::aio::ConnectionManager,
    prefix: String,
}

impl std::fmt::Debug for RedisDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDriver")
            .field("connection_manager", &"ConnectionManager")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl RedisDriver {
    /// Connect to Redis; failure means the backend is absent from this
    /// environment and the factory will skip it.
    pub async fn connect(config: &RedisConfig, prefix: &str) -> CacheResult<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let connection_manager = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        debug!(url = %redact_url(&config.url), "Redis cache driver connected");

        Ok(Self {
            connection_manager,
            prefix: prefix.to_string(),
        })
    }
}

impl CacheDriver for RedisDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Redis
    }

    async fn clear_all(&self) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        let pattern = format!("{}:*", self.prefix);
        let mut deleted: u64 = 0;
        let mut cursor: u64 = 0;

        // SCAN iterates without blocking the server
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::Backend(format!("Redis SCAN failed: {}", e)))?;

            if !keys.is_empty() {
                let count: u64 = redis::cmd("DEL")
                    .arg(&keys)
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| {
                        CacheError::Backend(format!("Redis DEL (batch) failed: {}", e))
                    })?;
                deleted += count;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        debug!(pattern = %pattern, deleted = deleted, "Redis cache cleared");
        Ok(())
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        let key = item_key(&self.prefix, path);

        redis::cmd("DEL")
            .arg(&key)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis DEL failed: {}", e)))?;

        debug!(key = %key, "Redis item invalidated");
        Ok(())
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        let tag_key = tag_key(&self.prefix, tag);

        let members: Vec<String> = redis::cmd("SMEMBERS")
            .arg(&tag_key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis SMEMBERS failed: {}", e)))?;

        if !members.is_empty() {
            let keys: Vec<String> = members
                .iter()
                .map(|path| item_key(&self.prefix, path))
                .collect();
            redis::cmd("DEL")
                .arg(&keys)
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| CacheError::Backend(format!("Redis DEL (tag members) failed: {}", e)))?;
        }

        redis::cmd("DEL")
            .arg(&tag_key)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis DEL (tag) failed: {}", e)))?;

        debug!(tag = tag, members = members.len(), "Redis tag invalidated");
        Ok(())
    }
}
