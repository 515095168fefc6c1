//! Cache factory
//!
//! Builds driver instances for a validated driver selection. A backend that
//! is not configured, cannot be reached, or was compiled out is an
//! environment fact, not a user error: the factory logs it and leaves the
//! driver out so the command clears what it can. Output order always matches
//! input order for reproducible reporting.

use std::future::Future;

use tracing::{debug, warn};

use super::driver::Driver;
use super::drivers::{ApcDriver, DbDriver, DummyDriver, FileDriver, StaticDriver};
use super::registry::DriverKind;
use super::traits::CacheDriver;
use crate::config::CacheConfig;

#[cfg(feature = "cache-memcache")]
use super::drivers::MemcacheDriver;

#[cfg(feature = "cache-memcached")]
use super::drivers::MemcachedDriver;

#[cfg(feature = "cache-redis")]
use super::drivers::RedisDriver;

/// Construction seam between the orchestrator and the concrete backends.
///
/// The orchestrator only ever asks a factory for drivers, so tests can hand
/// it recording doubles instead of live connections.
pub trait DriverFactory {
    type Driver: CacheDriver;

    /// Build a driver instance per requested kind, in order, silently
    /// omitting the ones unavailable in this environment.
    fn build(&self, kinds: &[DriverKind]) -> impl Future<Output = Vec<Self::Driver>> + Send;
}

/// Config-driven factory over the real backends
#[derive(Debug, Clone)]
pub struct CacheFactory {
    config: CacheConfig,
}

impl CacheFactory {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    async fn build_driver(&self, kind: DriverKind) -> Option<Driver> {
        match kind {
            DriverKind::File => Some(Driver::File(FileDriver::new(
                self.config.file.directory.clone(),
            ))),
            DriverKind::Db => self.build_db().await,
            DriverKind::Static => Some(Driver::Static(StaticDriver::new(
                self.config.static_mem.max_capacity,
            ))),
            DriverKind::Apc => {
                if ApcDriver::available(&self.config.apc.directory) {
                    Some(Driver::Apc(ApcDriver::new(self.config.apc.directory.clone())))
                } else {
                    debug!(
                        directory = %self.config.apc.directory.display(),
                        "No APC shared-memory segment, skipping the apc cache driver"
                    );
                    None
                }
            }
            DriverKind::Memcache => self.build_memcache().await,
            DriverKind::Memcached => self.build_memcached().await,
            DriverKind::Redis => self.build_redis().await,
            DriverKind::Dummy => Some(Driver::Dummy(DummyDriver::new())),
        }
    }

    async fn build_db(&self) -> Option<Driver> {
        let db_config = match &self.config.db {
            Some(c) => c,
            None => {
                debug!("No [cache.db] configuration, skipping the db cache driver");
                return None;
            }
        };

        match DbDriver::connect(db_config).await {
            Ok(driver) => Some(Driver::Db(Box::new(driver))),
            Err(error) => {
                warn!(%error, "Failed to connect to Postgres, skipping the db cache driver");
                None
            }
        }
    }

    #[cfg(feature = "cache-redis")]
    async fn build_redis(&self) -> Option<Driver> {
        let redis_config = match &self.config.redis {
            Some(c) => c,
            None => {
                debug!("No [cache.redis] configuration, skipping the redis cache driver");
                return None;
            }
        };

        match RedisDriver::connect(redis_config, &self.config.key_prefix).await {
            Ok(driver) => Some(Driver::Redis(Box::new(driver))),
            Err(error) => {
                warn!(%error, "Failed to connect to Redis, skipping the redis cache driver");
                None
            }
        }
    }

    #[cfg(not(feature = "cache-redis"))]
    async fn build_redis(&self) -> Option<Driver> {
        warn!("Redis driver requested but the 'cache-redis' feature is not enabled, skipping");
        None
    }

    #[cfg(feature = "cache-memcached")]
    async fn build_memcached(&self) -> Option<Driver> {
        let memcached_config = match &self.config.memcached {
            Some(c) => c,
            None => {
                debug!("No [cache.memcached] configuration, skipping the memcached cache driver");
                return None;
            }
        };

        match MemcachedDriver::connect(memcached_config, &self.config.key_prefix).await {
            Ok(driver) => Some(Driver::Memcached(Box::new(driver))),
            Err(error) => {
                warn!(%error, "Failed to connect to Memcached, skipping the memcached cache driver");
                None
            }
        }
    }

    #[cfg(not(feature = "cache-memcached"))]
    async fn build_memcached(&self) -> Option<Driver> {
        warn!("Memcached driver requested but the 'cache-memcached' feature is not enabled, skipping");
        None
    }

    #[cfg(feature = "cache-memcache")]
    async fn build_memcache(&self) -> Option<Driver> {
        let memcache_config = match &self.config.memcache {
            Some(c) => c,
            None => {
                debug!("No [cache.memcache] configuration, skipping the memcache cache driver");
                return None;
            }
        };

        match MemcacheDriver::connect(memcache_config, &self.config.key_prefix) {
            Ok(driver) => Some(Driver::Memcache(Box::new(driver))),
            Err(error) => {
                warn!(%error, "Failed to connect to Memcache, skipping the memcache cache driver");
                None
            }
        }
    }

    #[cfg(not(feature = "cache-memcache"))]
    async fn build_memcache(&self) -> Option<Driver> {
        warn!("Memcache driver requested but the 'cache-memcache' feature is not enabled, skipping");
        None
    }
}

impl DriverFactory for CacheFactory {
    type Driver = Driver;

    async fn build(&self, kinds: &[DriverKind]) -> Vec<Driver> {
        let mut drivers = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if let Some(driver) = self.build_driver(*kind).await {
                drivers.push(driver);
            }
        }
        drivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApcCacheConfig, FileCacheConfig};

    fn local_config(file_dir: &std::path::Path, apc_dir: &std::path::Path) -> CacheConfig {
        CacheConfig {
            file: FileCacheConfig {
                directory: file_dir.to_path_buf(),
            },
            apc: ApcCacheConfig {
                directory: apc_dir.to_path_buf(),
            },
            ..CacheConfig::default()
        }
    }

    fn built_kinds(drivers: &[Driver]) -> Vec<DriverKind> {
        drivers.iter().map(CacheDriver::kind).collect()
    }

    #[tokio::test]
    async fn test_unconfigured_backends_are_silently_omitted() {
        let file_dir = tempfile::tempdir().unwrap();
        let apc_dir = tempfile::tempdir().unwrap();
        let factory = CacheFactory::new(local_config(file_dir.path(), apc_dir.path()));

        let drivers = factory.build(&DriverKind::ALL).await;

        // No db/memcache/memcached/redis sections configured; everything
        // local is present, in canonical order.
        assert_eq!(
            built_kinds(&drivers),
            vec![
                DriverKind::File,
                DriverKind::Static,
                DriverKind::Apc,
                DriverKind::Dummy,
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_apc_segment_is_silently_omitted() {
        let file_dir = tempfile::tempdir().unwrap();
        let apc_dir = file_dir.path().join("missing-segment");
        let factory = CacheFactory::new(local_config(file_dir.path(), &apc_dir));

        let drivers = factory.build(&DriverKind::ALL).await;

        assert!(!built_kinds(&drivers).contains(&DriverKind::Apc));
    }

    #[tokio::test]
    async fn test_output_preserves_input_order() {
        let file_dir = tempfile::tempdir().unwrap();
        let apc_dir = tempfile::tempdir().unwrap();
        let factory = CacheFactory::new(local_config(file_dir.path(), apc_dir.path()));

        let drivers = factory
            .build(&[DriverKind::Dummy, DriverKind::File])
            .await;

        assert_eq!(
            built_kinds(&drivers),
            vec![DriverKind::Dummy, DriverKind::File]
        );
    }

    #[cfg(feature = "cache-redis")]
    #[tokio::test]
    async fn test_unreachable_redis_is_silently_omitted() {
        let file_dir = tempfile::tempdir().unwrap();
        let apc_dir = tempfile::tempdir().unwrap();
        let mut config = local_config(file_dir.path(), apc_dir.path());
        config.redis = Some(crate::config::RedisConfig {
            url: "not-a-redis-url".to_string(),
        });
        let factory = CacheFactory::new(config);

        let drivers = factory.build(&[DriverKind::Redis]).await;
        assert!(drivers.is_empty());
    }
}
