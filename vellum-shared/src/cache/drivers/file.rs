//! Filesystem cache driver
//!
//! On-disk layout (shared with the APC driver, which mounts the same format
//! on a shared-memory directory):
//!
//! ```text
//! <root>/data/<path>   cached payload, one file per item path
//! <root>/tags/<tag>    member item paths, one per line
//! ```
//!
//! A missing root or subdirectory is an empty backend, not an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::registry::DriverKind;
use crate::cache::traits::CacheDriver;

/// Cache driver over a plain directory tree
#[derive(Debug, Clone)]
pub struct FileDriver {
    root: PathBuf,
}

impl FileDriver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CacheDriver for FileDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::File
    }

    async fn clear_all(&self) -> CacheResult<()> {
        clear_root(&self.root)
    }

    async fn clear_item(&self, path: &str) -> CacheResult<()> {
        remove_item(&self.root, path)
    }

    async fn clear_tag(&self, tag: &str) -> CacheResult<()> {
        remove_tag(&self.root, tag)
    }
}

pub(crate) fn data_dir(root: &Path) -> PathBuf {
    root.join("data")
}

pub(crate) fn tags_dir(root: &Path) -> PathBuf {
    root.join("tags")
}

/// Resolve a slash-separated name under `base`, refusing segments that would
/// escape it. Names the application never stored resolve to nothing, so a
/// refused name is a no-op rather than an error.
fn resolve(base: &Path, name: &str) -> Option<PathBuf> {
    let mut resolved = base.to_path_buf();
    for segment in name.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        resolved.push(segment);
    }
    Some(resolved)
}

pub(crate) fn clear_root(root: &Path) -> CacheResult<()> {
    for dir in [data_dir(root), tags_dir(root)] {
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(CacheError::Backend(format!(
                    "Failed to clear {}: {}",
                    dir.display(),
                    e
                )))
            }
        }
    }
    Ok(())
}

pub(crate) fn remove_item(root: &Path, path: &str) -> CacheResult<()> {
    let Some(file) = resolve(&data_dir(root), path) else {
        debug!(path = path, "Ignoring item path that escapes the cache root");
        return Ok(());
    };
    remove_file_if_present(&file)
}

pub(crate) fn remove_tag(root: &Path, tag: &str) -> CacheResult<()> {
    let Some(tag_file) = resolve(&tags_dir(root), tag) else {
        debug!(tag = tag, "Ignoring tag name that escapes the cache root");
        return Ok(());
    };

    let members = match fs::read_to_string(&tag_file) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(CacheError::Backend(format!(
                "Failed to read tag {}: {}",
                tag_file.display(),
                e
            )))
        }
    };

    for path in members.lines().map(str::trim).filter(|p| !p.is_empty()) {
        remove_item(root, path)?;
    }

    remove_file_if_present(&tag_file)
}

fn remove_file_if_present(file: &Path) -> CacheResult<()> {
    match fs::remove_file(file) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CacheError::Backend(format!(
            "Failed to remove {}: {}",
            file.display(),
            e
        ))),
    }
}
