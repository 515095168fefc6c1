//! Unified cache driver enum
//!
//! Enum dispatch over the concrete backends: the factory hands these out and
//! callers go through the capability trait with no vtable. Network-backed
//! variants are boxed to keep the enum small.

use super::drivers::{ApcDriver, DbDriver, DummyDriver, FileDriver, StaticDriver};
use super::errors::CacheResult;
use super::registry::DriverKind;
use super::traits::CacheDriver;

#[cfg(feature = "cache-memcache")]
use super::drivers::MemcacheDriver;

#[cfg(feature = "cache-memcached")]
use super::drivers::MemcachedDriver;

#[cfg(feature = "cache-redis")]
use super::drivers::RedisDriver;

/// One constructed cache backend
#[derive(Debug, Clone)]
pub enum Driver {
    File(FileDriver),
    Db(Box<DbDriver>),
    Static(StaticDriver),
    Apc(ApcDriver),

    #[cfg(feature = "cache-memcache")]
    Memcache(Box<MemcacheDriver>),

    #[cfg(feature = "cache-memcached")]
    Memcached(Box<MemcachedDriver>),

    #[cfg(feature = "cache-redis")]
    Redis(Box<RedisDriver>),

    Dummy(DummyDriver),
}

impl CacheDriver for Driver {
    fn kind(&self) -> DriverKind {
        match self {
            Self::File(d) => d.kind(),
            Self::Db(d) => d.kind(),
            Self::Static(d) => d.kind(),
            Self::Apc(d) => d.kind(),
            #[cfg(feature = "cache-memcache")]
            Self::Memcache(d) => d.kind(),
            #[cfg(feature = "cache-memcached")]
            Self::Memcached(d) => d.kind(),
            #[cfg(feature = "cache-redis")]
            Self::Redis(d) => d.kind(),
            Self::Dummy(d) => d.kind(),
        }
    }

    async fn clear_all(&self) -> CacheResult<()> {
        match self {
            Self::File(d) => d.clear_all().await,
            Self::Db(d) => d.clear_all().await,
            Self::Static(d) => d.clear_all().await,
            Self::Apc(d) => d.clear_all().await,
            #[cfg(feature = "cache-memcache")]
            Self::Memcache(d) => d.clear_all().await,
            #[cfg(feature = "cache-memcached")]
            Self::Memcached(d) => d.clear_all().await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(d) => d.clear_all().await,
            Self::Dummy(d) => d.clear_all().await,
        }
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        match self {
            Self::File(d) => d.clear_item(path).await,
            Self::Db(d) => d.clear_item(path).await,
            Self::Static(d) => d.clear_item(path).await,
            Self::Apc(d) => d.clear_item(path).await,
            #[cfg(feature = "cache-memcache")]
            Self::Memcache(d) => d.clear_item(path).await,
            #[cfg(feature = "cache-memcached")]
            Self::Memcached(d) => d.clear_item(path).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(d) => d.clear_item(path).await,
            Self::Dummy(d) => d.clear_item(path).await,
        }
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        match self {
            Self::File(d) => d.clear_tag(tag).await,
            Self::Db(d) => d.clear_tag(tag).await,
            Self::Static(d) => d.clear_tag(tag).await,
            Self::Apc(d) => d.clear_tag(tag).await,
            #[cfg(feature = "cache-memcache")]
            Self::Memcache(d) => d.clear_tag(tag).await,
            #[cfg(feature = "cache-memcached")]
            Self::Memcached(d) => d.clear_tag(tag).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(d) => d.clear_tag(tag).await,
            Self::Dummy(d) => d.clear_tag(tag).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enum_delegates_to_the_wrapped_driver() {
        let driver = Driver::Dummy(DummyDriver::new());
        assert_eq!(driver.kind(), DriverKind::Dummy);
        driver.clear_all().await.unwrap();
        driver.clear_item("module/key").await.unwrap();
        driver.clear_tag("news").await.unwrap();
    }

    #[tokio::test]
    async fn test_static_variant_invalidates_through_the_enum() {
        let inner = StaticDriver::new(10);
        inner.insert("module/key", "payload", &[]).await;

        let driver = Driver::Static(inner.clone());
        assert_eq!(driver.kind(), DriverKind::Static);
        driver.clear_item("module/key").await.unwrap();

        assert!(inner.get("module/key").await.is_none());
    }
}
