//! Cache driver capability contract

use std::future::Future;

use super::errors::CacheResult;
use super::registry::DriverKind;

/// Trait implemented by every cache backend driver.
///
/// A driver can wipe its whole namespace or invalidate a single item path or
/// tag. Selective invalidation is a no-op success when nothing matches; it is
/// never allowed to degrade into a full clear.
pub trait CacheDriver: Send + Sync {
    /// Which registered driver this instance is
    fn kind(&self) -> DriverKind;

    /// Remove every entry owned by this backend.
    ///
    /// An `Err` marks this driver's clear as failed; callers report it and
    /// keep going with the remaining drivers.
    fn clear_all(&self) -> impl Future<Output = CacheResult<()>> + Send;

    /// Invalidate the entry stored under `path`, if any
    fn clear_item(&self, path: &str) -> impl Future<Output = CacheResult<()>> + Send;

    /// Invalidate every entry carrying `tag`, if any
    fn clear_tag(&self, tag: &str) -> impl Future<Output = CacheResult<()>> + Send;
}
