//! Cache Entry Module
//!
//! Defines the structure for individual cached results. An entry records only the
//! value and the instant it was stored; freshness is judged against the TTL each
//! caller supplies.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single cached result with its insertion timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored result
    pub value: V,
    /// Instant the value was stored
    pub inserted_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `inserted_at`.
    pub fn new(value: V, inserted_at: DateTime<Utc>) -> Self {
        Self { value, inserted_at }
    }

    // == Age ==
    /// Returns how long the entry has been stored as of `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.inserted_at
    }

    // == Is Expired ==
    /// Checks whether the entry is stale for a caller using `ttl`.
    ///
    /// Boundary condition: an entry is expired when its age is greater than or
    /// equal to the TTL, so once the full TTL has elapsed the entry is
    /// immediately stale. A zero TTL therefore treats every entry as stale.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        // A TTL beyond chrono's range can never be exceeded by a real age.
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        self.age(now) >= ttl
    }

    // == Time To Live ==
    /// Returns the remaining freshness window under `ttl`, zero if expired.
    pub fn ttl_remaining(&self, now: DateTime<Utc>, ttl: Duration) -> Duration {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        ttl.checked_sub(&self.age(now))
            .and_then(|remaining| remaining.to_std().ok())
            .unwrap_or(Duration::ZERO)
    }
}
