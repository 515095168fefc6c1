//! No-op cache driver
//!
//! Every operation succeeds and touches nothing. Configured by sites that
//! want the cache surface without any storage behind it.

use crate::cache::errors::CacheResult;
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;

#[derive(Debug, Clone, Copy, Default)]
pub struct DummyDriver;

impl DummyDriver {
    pub fn new() -> Self {
        Self
    }
}

impl CacheDriver for DummyDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Dummy
    }

    async fn clear_all(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn clear_item(&self, _path: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn clear_tag(&self, _tag: &str) -> CacheResult<()> {
        Ok(())
    }
}
