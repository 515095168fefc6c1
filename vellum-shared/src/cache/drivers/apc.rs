//! APC-style shared-memory cache driver
//!
//! The web runtime keeps this cache in a shared-memory directory (typically
//! under `/dev/shm`) using the same layout as the file driver. When that
//! segment directory does not exist the backend is simply absent from the
//! current environment and the factory skips it.

use std::path::{Path, PathBuf};

use super::file;
use crate::cache::errors::CacheResult;
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;

/// Cache driver over the runtime's shared-memory segment directory
#[derive(Debug, Clone)]
pub struct ApcDriver {
    root: PathBuf,
}

impl ApcDriver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Whether the shared-memory segment exists in this environment
    pub fn available(root: &Path) -> bool {
        root.is_dir()
    }
}

impl CacheDriver for ApcDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Apc
    }

    async fn clear_all(&self) -> CacheResult<()> {
        file::clear_root(&self.root)
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        file::remove_item(&self.root, path)
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        file::remove_tag(&self.root, tag)
    }
}
