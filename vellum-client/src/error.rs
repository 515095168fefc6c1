//! # Client Error Types
//!
//! Unified error handling for CLI operations. Library modules keep their own
//! error enums; this aggregates them at the binary boundary.

use thiserror::Error;
use vellum_shared::cache::CacheError;
use vellum_shared::config::ConfigError;
use vellum_shared::templates::TemplateError;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_errors_convert() {
        let err: ClientError = CacheError::UnknownDrivers("bogus".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Cache error: Invalid driver(s) specified: bogus"
        );
    }
}
