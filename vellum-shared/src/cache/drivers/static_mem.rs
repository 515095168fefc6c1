//! In-process static memory cache driver
//!
//! Backed by a moka cache plus a tag index. Like the original static cache
//! this state lives and dies with the process, so clearing it from the
//! administration CLI only touches the CLI's own instance; it exists so the
//! same invalidation surface works when the CMS embeds the library.

use std::sync::Arc;

use dashmap::DashMap;

use crate::cache::errors::CacheResult;
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;

/// In-process cache with tag-aware invalidation
#[derive(Clone)]
pub struct StaticDriver {
    entries: moka::future::Cache<String, String>,
    tags: Arc<DashMap<String, Vec<String>>>,
}

impl std::fmt::Debug for StaticDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticDriver")
            .field("entry_count", &self.entries.entry_count())
            .field("tag_count", &self.tags.len())
            .finish()
    }
}

impl StaticDriver {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            entries: moka::future::Cache::builder()
                .max_capacity(max_capacity)
                .build(),
            tags: Arc::new(DashMap::new()),
        }
    }

    /// Store an entry under `path`, registering it with each of `tags`.
    pub async fn insert(&self, path: &str, payload: &str, tags: &[&str]) {
        self.entries
            .insert(path.to_string(), payload.to_string())
            .await;
        for tag in tags {
            self.tags
                .entry((*tag).to_string())
                .or_default()
                .push(path.to_string());
        }
    }

    pub async fn get(&self, path: &str) -> Option<String> {
        self.entries.get(path).await
    }
}

impl CacheDriver for StaticDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Static
    }

    async fn clear_all(&self) -> CacheResult<()> {
        self.entries.invalidate_all();
        self.tags.clear();
        Ok(())
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        self.entries.invalidate(path).await;
        Ok(())
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        if let Some((_, members)) = self.tags.remove(tag) {
            for path in members {
                self.entries.invalidate(&path).await;
            }
        }
        Ok(())
    }
}
