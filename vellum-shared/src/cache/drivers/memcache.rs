//! Memcache cache driver
//!
//! Legacy deployments talk to memcached through the synchronous `memcache`
//! client instead of the async one; sites pick whichever matches their
//! infrastructure. Unlike [`super::memcached`], this client exposes a server
//! flush, so a full clear flushes the instance (the legacy deployments
//! dedicate the instance to the CMS). Tag invalidation reads the
//! `{prefix}:tag:{tag}` listing the CMS maintains. Requires the
//! `cache-memcache` feature flag.

use tracing::debug;

use super::{item_key, tag_key};
use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;
use crate::config::MemcacheConfig;

/// Memcache-backed cache driver using the synchronous client
#[derive(Clone)]
pub struct MemcacheDriver {
    client: memcache::Client,
    prefix: String,
}

impl std::fmt::Debug for MemcacheDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemcacheDriver")
            .field("client", &"Client")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl MemcacheDriver {
    /// Connect to memcache; failure means the backend is absent from this
    /// environment and the factory will skip it.
    pub fn connect(config: &MemcacheConfig, prefix: &str) -> CacheResult<Self> {
        let client = memcache::connect(config.server.as_str()).map_err(|e| {
            CacheError::Connection(format!("Failed to connect to memcache: {}", e))
        })?;

        // The client connects lazily; probe so an unreachable server is
        // detected here rather than mid-clear.
        client
            .version()
            .map_err(|e| CacheError::Connection(format!("Memcache server unreachable: {}", e)))?;

        debug!(server = %config.server, "Memcache cache driver connected");

        Ok(Self {
            client,
            prefix: prefix.to_string(),
        })
    }
}

impl CacheDriver for MemcacheDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Memcache
    }

    async fn clear_all(&self) -> CacheResult<()> {
        self.client
            .flush()
            .map_err(|e| CacheError::Backend(format!("Memcache flush failed: {}", e)))?;

        debug!("Memcache cache flushed");
        Ok(())
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        let key = item_key(&self.prefix, path);
        self.client
            .delete(&key)
            .map_err(|e| CacheError::Backend(format!("Memcache delete failed: {}", e)))?;

        debug!(path = path, "Memcache item invalidated");
        Ok(())
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        let tag_key = tag_key(&self.prefix, tag);

        let listing: Option<String> = self
            .client
            .get(&tag_key)
            .map_err(|e| CacheError::Backend(format!("Memcache get failed: {}", e)))?;

        let members: Vec<String> = match listing {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                CacheError::Backend(format!("Corrupt cache listing {}: {}", tag_key, e))
            })?,
            None => return Ok(()),
        };

        for path in &members {
            self.client
                .delete(&item_key(&self.prefix, path))
                .map_err(|e| CacheError::Backend(format!("Memcache delete failed: {}", e)))?;
        }
        self.client
            .delete(&tag_key)
            .map_err(|e| CacheError::Backend(format!("Memcache delete failed: {}", e)))?;

        debug!(tag = tag, members = members.len(), "Memcache tag invalidated");
        Ok(())
    }
}
