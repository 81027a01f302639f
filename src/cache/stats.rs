//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, expirations, and the
//! number of authoritative computations executed.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from the cache
    pub hits: u64,
    /// Number of lookups that found no fresh entry
    pub misses: u64,
    /// Number of entries removed because their TTL had elapsed
    pub expirations: u64,
    /// Number of times the wrapped computation was executed
    pub computes: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expiration ==
    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Record Compute ==
    /// Increments the compute counter.
    pub fn record_compute(&mut self) {
        self.computes += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
