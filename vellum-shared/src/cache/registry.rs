//! Driver registry
//!
//! `DriverKind` is the closed set of cache driver identifiers the CMS knows
//! about. Requests are validated against it before any backend is touched,
//! and the effective driver set always iterates in the canonical declared
//! order so output and log ordering are reproducible across runs.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::errors::{CacheError, CacheResult};

/// Identifier for one of the registered cache backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DriverKind {
    File,
    Db,
    Static,
    Apc,
    Memcache,
    Memcached,
    Redis,
    Dummy,
}

impl DriverKind {
    /// All known drivers, in canonical declared order
    pub const ALL: [DriverKind; 8] = [
        DriverKind::File,
        DriverKind::Db,
        DriverKind::Static,
        DriverKind::Apc,
        DriverKind::Memcache,
        DriverKind::Memcached,
        DriverKind::Redis,
        DriverKind::Dummy,
    ];

    /// The wire-level token for this driver
    pub fn as_str(self) -> &'static str {
        match self {
            DriverKind::File => "file",
            DriverKind::Db => "db",
            DriverKind::Static => "static",
            DriverKind::Apc => "apc",
            DriverKind::Memcache => "memcache",
            DriverKind::Memcached => "memcached",
            DriverKind::Redis => "redis",
            DriverKind::Dummy => "dummy",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(DriverKind::File),
            "db" => Ok(DriverKind::Db),
            "static" => Ok(DriverKind::Static),
            "apc" => Ok(DriverKind::Apc),
            "memcache" => Ok(DriverKind::Memcache),
            "memcached" => Ok(DriverKind::Memcached),
            "redis" => Ok(DriverKind::Redis),
            "dummy" => Ok(DriverKind::Dummy),
            other => Err(CacheError::UnknownDrivers(other.to_string())),
        }
    }
}

/// Validate a requested driver subset against the registry.
///
/// An empty request means "all drivers". Any unrecognized token rejects the
/// whole request; otherwise the result is the intersection of requested and
/// known drivers, in canonical order regardless of input order. Duplicates
/// collapse.
pub fn validate(requested: &[String]) -> CacheResult<Vec<DriverKind>> {
    if requested.is_empty() {
        return Ok(DriverKind::ALL.to_vec());
    }

    let mut wanted = HashSet::new();
    let mut unknown = Vec::new();
    for token in requested {
        match token.parse::<DriverKind>() {
            Ok(kind) => {
                wanted.insert(kind);
            }
            Err(_) => unknown.push(token.as_str()),
        }
    }

    if !unknown.is_empty() {
        return Err(CacheError::UnknownDrivers(unknown.join(", ")));
    }

    Ok(DriverKind::ALL
        .iter()
        .copied()
        .filter(|kind| wanted.contains(kind))
        .collect())
}
