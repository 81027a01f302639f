//! Cache Module
//!
//! Provides in-memory memoization of query results with TTL expiration and
//! deterministic fingerprint keys.

mod entry;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::QueryCache;

// == Public Constants ==
/// Length in bytes of a cache key fingerprint (SHA-256 digest)
pub const FINGERPRINT_LEN: usize = 32;
