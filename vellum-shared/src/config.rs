//! Configuration
//!
//! TOML configuration with `${VAR}` / `${VAR:-default}` environment
//! substitution and fail-fast validation. Every backend section is optional;
//! an absent section means the corresponding driver is not part of this
//! deployment and the factory skips it. With no config file at all the
//! defaults describe a purely local deployment (file, static, apc when the
//! segment exists, dummy).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Config file the CLI looks for when no explicit path is given
pub const DEFAULT_CONFIG_PATH: &str = "vellum.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration for the administration tools
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Cache driver configuration
    pub cache: CacheConfig,
    /// CMS database, used by template administration
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Namespace prefix shared by the keyed network backends
    pub key_prefix: String,
    pub file: FileCacheConfig,
    pub apc: ApcCacheConfig,
    #[serde(rename = "static")]
    pub static_mem: StaticCacheConfig,
    pub db: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
    pub memcache: Option<MemcacheConfig>,
    pub memcached: Option<MemcachedConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: "vellum:cache".to_string(),
            file: FileCacheConfig::default(),
            apc: ApcCacheConfig::default(),
            static_mem: StaticCacheConfig::default(),
            db: None,
            redis: None,
            memcache: None,
            memcached: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub directory: PathBuf,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("cache"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApcCacheConfig {
    /// Shared-memory segment directory maintained by the web runtime
    pub directory: PathBuf,
}

impl Default for ApcCacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/dev/shm/vellum-cache"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticCacheConfig {
    pub max_capacity: u64,
}

impl Default for StaticCacheConfig {
    fn default() -> Self {
        Self { max_capacity: 10_000 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemcacheConfig {
    pub server: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemcachedConfig {
    pub url: String,
}

impl AdminConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default file
    /// is used when present, otherwise the built-in defaults apply.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from_path(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let contents = substitute_env_vars(&contents);

        let config: AdminConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.cache.key_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "cache.key_prefix must not be empty".to_string(),
            ));
        }
        if self.cache.static_mem.max_capacity == 0 {
            return Err(ConfigError::Invalid(
                "cache.static.max_capacity must be greater than zero".to_string(),
            ));
        }
        for (section, url) in [
            ("cache.db.url", self.cache.db.as_ref().map(|c| &c.url)),
            ("cache.redis.url", self.cache.redis.as_ref().map(|c| &c.url)),
            (
                "cache.memcache.server",
                self.cache.memcache.as_ref().map(|c| &c.server),
            ),
            (
                "cache.memcached.url",
                self.cache.memcached.as_ref().map(|c| &c.url),
            ),
            ("database.url", self.database.as_ref().map(|c| &c.url)),
        ] {
            if let Some(url) = url {
                if url.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{section} must not be empty"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Replace `${VAR}` and `${VAR:-default}` occurrences with environment
/// values. A variable that is unset and has no default keeps its
/// placeholder so validation surfaces it.
fn substitute_env_vars(content: &str) -> String {
    let mut result = String::new();
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        let Some(end_offset) = rest[start..].find('}') else {
            break;
        };
        let end = start + end_offset;

        result.push_str(&rest[..start]);
        let full_expr = &rest[start + 2..end];

        let (var_name, default_value) = match full_expr.find(":-") {
            Some(sep) => (&full_expr[..sep], Some(&full_expr[sep + 2..])),
            None => (full_expr, None),
        };

        match std::env::var(var_name) {
            Ok(value) => result.push_str(&value),
            Err(_) => match default_value {
                Some(default) => result.push_str(default),
                None => {
                    warn!(
                        variable = var_name,
                        "Environment variable not set, leaving placeholder"
                    );
                    result.push_str(&rest[start..=end]);
                }
            },
        }

        rest = &rest[end + 1..];
    }

    result.push_str(rest);
    result
}
