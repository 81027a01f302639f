//! Error types for the query cache
//!
//! Covers the cache's own lookup surface. Failures of a wrapped computation are
//! never converted: `get_or_compute` returns them to the caller unchanged.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors reported by cache lookups and explicit eviction.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No entry exists for the key
    #[error("No cache entry for key {0}")]
    NotFound(String),

    /// The entry's TTL had elapsed; it was removed on access
    #[error("Cache entry expired for key {0}")]
    Expired(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache lookup operations.
pub type Result<T> = std::result::Result<T, CacheError>;
