//! Cache error types

use thiserror::Error;

/// Errors that can occur during cache administration
#[derive(Debug, Error)]
pub enum CacheError {
    /// A requested driver token is not part of the known driver set
    #[error("Invalid driver(s) specified: {0}")]
    UnknownDrivers(String),

    /// Failed to connect to a cache backend
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// Generic backend error during a clear operation
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
