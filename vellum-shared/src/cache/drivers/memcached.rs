//! Memcached cache driver
//!
//! Uses the async-memcached client. The memcached protocol cannot enumerate
//! keys and the client exposes no flush, so the CMS keeps bookkeeping keys
//! alongside the entries: `{prefix}:index` holds a JSON array of live item
//! paths and `{prefix}:tags` a JSON array of live tag names. Full clears walk
//! that bookkeeping; deletes of keys that already expired are ignored.
//! Requires the `cache-memcached` feature flag.

use std::sync::Arc;

use async_memcached::Client;
use tokio::sync::Mutex;
use tracing::debug;

use super::{item_key, redact_url, tag_key};
use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;
use crate::config::MemcachedConfig;

/// Memcached-backed cache driver
pub struct MemcachedDriver {
    client: Arc<Mutex<Client>>,
    prefix: String,
}

impl std::fmt::Debug for MemcachedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemcachedDriver")
            .field("client", &"Client")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl Clone for MemcachedDriver {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            prefix: self.prefix.clone(),
        }
    }
}

impl MemcachedDriver {
    /// Connect to memcached; failure means the backend is absent from this
    /// environment and the factory will skip it.
    pub async fn connect(config: &MemcachedConfig, prefix: &str) -> CacheResult<Self> {
        let client = Client::new(&config.url).await.map_err(|e| {
            CacheError::Connection(format!("Failed to connect to memcached: {}", e))
        })?;

        debug!(url = %redact_url(&config.url), "Memcached cache driver connected");

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
            prefix: prefix.to_string(),
        })
    }

    fn index_key(&self) -> String {
        format!("{}:index", self.prefix)
    }

    fn tags_key(&self) -> String {
        format!("{}:tags", self.prefix)
    }

    /// Read a bookkeeping key holding a JSON array of strings
    async fn read_listing(&self, client: &mut Client, key: &str) -> CacheResult<Vec<String>> {
        let value = client
            .get(key)
            .await
            .map_err(|e| CacheError::Backend(format!("Memcached GET failed: {}", e)))?;

        match value {
            Some(value) => serde_json::from_slice(&value.data)
                .map_err(|e| CacheError::Backend(format!("Corrupt cache listing {}: {}", key, e))),
            None => Ok(Vec::new()),
        }
    }
}

impl CacheDriver for MemcachedDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Memcached
    }

    async fn clear_all(&self) -> CacheResult<()> {
        let mut client = self.client.lock().await;

        let paths = self.read_listing(&mut client, &self.index_key()).await?;
        for path in &paths {
            let _ = client.delete(&item_key(&self.prefix, path)).await;
        }
        let _ = client.delete(&self.index_key()).await;

        let tags = self.read_listing(&mut client, &self.tags_key()).await?;
        for tag in &tags {
            let _ = client.delete(&tag_key(&self.prefix, tag)).await;
        }
        let _ = client.delete(&self.tags_key()).await;

        debug!(
            items = paths.len(),
            tags = tags.len(),
            "Memcached cache cleared"
        );
        Ok(())
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        let mut client = self.client.lock().await;

        // Delete of a missing key reports an error, which is fine
        let _ = client.delete(&item_key(&self.prefix, path)).await;

        debug!(path = path, "Memcached item invalidated");
        Ok(())
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        let mut client = self.client.lock().await;
        let tag_key = tag_key(&self.prefix, tag);

        let members = self.read_listing(&mut client, &tag_key).await?;
        for path in &members {
            let _ = client.delete(&item_key(&self.prefix, path)).await;
        }
        let _ = client.delete(&tag_key).await;

        debug!(tag = tag, members = members.len(), "Memcached tag invalidated");
        Ok(())
    }
}

// Integration tests require a running Memcached instance (behind test-services)
#[cfg(all(test, feature = "test-services"))]
mod integration {
    use super::*;
    use tracing::warn;

    fn test_memcached_config() -> MemcachedConfig {
        MemcachedConfig {
            url: std::env::var("MEMCACHED_URL")
                .unwrap_or_else(|_| "tcp://localhost:11211".to_string()),
        }
    }

    async fn connect_or_skip(prefix: &str) -> Option<MemcachedDriver> {
        match MemcachedDriver::connect(&test_memcached_config(), prefix).await {
            Ok(driver) => Some(driver),
            Err(e) => {
                warn!("Skipping Memcached test (not available): {}", e);
                None
            }
        }
    }

    async fn seed(driver: &MemcachedDriver, paths: &[&str], tags: &[(&str, &[&str])]) {
        let mut client = driver.client.lock().await;
        for path in paths {
            client
                .set(
                    &item_key(&driver.prefix, path),
                    "payload".as_bytes(),
                    Some(60),
                    None,
                )
                .await
                .unwrap();
        }
        let index = serde_json::to_string(paths).unwrap();
        client
            .set(&driver.index_key(), index.as_bytes(), Some(60), None)
            .await
            .unwrap();
        for (tag, members) in tags {
            let listing = serde_json::to_string(members).unwrap();
            client
                .set(
                    &tag_key(&driver.prefix, tag),
                    listing.as_bytes(),
                    Some(60),
                    None,
                )
                .await
                .unwrap();
        }
        let names: Vec<&str> = tags.iter().map(|(tag, _)| *tag).collect();
        let listing = serde_json::to_string(&names).unwrap();
        client
            .set(&driver.tags_key(), listing.as_bytes(), Some(60), None)
            .await
            .unwrap();
    }

    async fn exists(driver: &MemcachedDriver, path: &str) -> bool {
        let mut client = driver.client.lock().await;
        client
            .get(&item_key(&driver.prefix, path))
            .await
            .unwrap()
            .is_some()
    }

    #[tokio::test]
    async fn test_memcached_clear_all_walks_the_index() {
        let prefix = format!("vellum:test:{}", uuid::Uuid::new_v4());
        let Some(driver) = connect_or_skip(&prefix).await else {
            return;
        };

        seed(
            &driver,
            &["local/foo", "local/bar"],
            &[("news", &["local/foo"])],
        )
        .await;

        driver.clear_all().await.unwrap();

        assert!(!exists(&driver, "local/foo").await);
        assert!(!exists(&driver, "local/bar").await);
    }

    #[tokio::test]
    async fn test_memcached_clear_tag_removes_members_only() {
        let prefix = format!("vellum:test:{}", uuid::Uuid::new_v4());
        let Some(driver) = connect_or_skip(&prefix).await else {
            return;
        };

        seed(
            &driver,
            &["local/foo", "other/baz"],
            &[("news", &["local/foo"])],
        )
        .await;

        driver.clear_tag("news").await.unwrap();

        assert!(!exists(&driver, "local/foo").await);
        assert!(exists(&driver, "other/baz").await);

        driver.clear_all().await.unwrap();
    }
}
