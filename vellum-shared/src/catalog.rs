//! Display-string catalog
//!
//! The CMS resolves user-facing strings through a language catalog; the
//! admin tools only need the slice of it that names drivers and the closing
//! status line. Unknown keys fall back to the key itself, matching the CMS
//! lookup behavior.

use std::collections::HashMap;

use crate::cache::DriverKind;

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let mut entries = HashMap::new();
        for (key, value) in [
            ("driver.file", "File"),
            ("driver.db", "Database"),
            ("driver.static", "Static"),
            ("driver.apc", "APC"),
            ("driver.memcache", "Memcache"),
            ("driver.memcached", "Memcached"),
            ("driver.redis", "Redis"),
            ("driver.dummy", "Dummy"),
            ("cache.cleared", "Cache cleared."),
        ] {
            entries.insert(key.to_string(), value.to_string());
        }
        Self { entries }
    }
}

impl Catalog {
    /// Look up a catalog key, falling back to the key itself
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Display name for a cache driver
    pub fn driver_name(&self, kind: DriverKind) -> &str {
        let key = match kind {
            DriverKind::File => "driver.file",
            DriverKind::Db => "driver.db",
            DriverKind::Static => "driver.static",
            DriverKind::Apc => "driver.apc",
            DriverKind::Memcache => "driver.memcache",
            DriverKind::Memcached => "driver.memcached",
            DriverKind::Redis => "driver.redis",
            DriverKind::Dummy => "driver.dummy",
        };
        self.lookup(key)
    }

    /// Override or add a catalog entry
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_driver_has_a_display_name() {
        let catalog = Catalog::default();
        for kind in DriverKind::ALL {
            let name = catalog.driver_name(kind);
            assert!(!name.is_empty());
            assert!(!name.starts_with("driver."), "missing entry for {kind}");
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_the_key() {
        let catalog = Catalog::default();
        assert_eq!(catalog.lookup("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut catalog = Catalog::default();
        catalog.set("driver.db", "MySQL");
        assert_eq!(catalog.driver_name(DriverKind::Db), "MySQL");
    }
}
