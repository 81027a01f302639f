//! Cache Store Module
//!
//! Main cache engine: a mutex-guarded map from query fingerprints to timestamped
//! results, with lazy TTL expiration. The lock guards only lookups and stores,
//! never the wrapped computation, so a slow computation for one key does not
//! serialize access to unrelated keys.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheStats};
use crate::clock::{Clock, SystemClock};
use crate::error::CacheError;

// == Inner State ==
/// Map and counters guarded together by the cache lock.
#[derive(Debug)]
struct CacheInner<V> {
    /// Fingerprint-to-entry storage
    entries: HashMap<CacheKey, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
}

// == Query Cache ==
/// Expiring query-result cache shared by concurrent callers.
///
/// Results are keyed by a deterministic fingerprint of (operation, parameters).
/// Stale entries are removed lazily when a lookup touches them; [`QueryCache::purge_expired`]
/// exists for explicit sweeps. Each instance owns its state, so tests construct
/// isolated caches and inject their own [`Clock`].
#[derive(Debug)]
pub struct QueryCache<V> {
    inner: Mutex<CacheInner<V>>,
    clock: Arc<dyn Clock>,
}

impl<V> QueryCache<V> {
    // == Constructor ==
    /// Creates an empty cache using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            clock,
        }
    }

    // == Lock ==
    /// Acquires the cache lock.
    ///
    /// The guarded sections only perform whole-entry inserts and removes, so the
    /// map is consistent even if a previous holder panicked; recover instead of
    /// propagating the poison.
    fn lock(&self) -> MutexGuard<'_, CacheInner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }
}

impl<V: Clone> QueryCache<V> {
    // == Get Or Compute ==
    /// Returns the cached result for (operation, params) if it is younger than
    /// `ttl`, otherwise runs `compute` and caches its result.
    ///
    /// A fresh entry is returned without invoking `compute`. An expired entry is
    /// removed and treated as a miss. On a miss the lock is released, `compute`
    /// runs, and the result is stored with the current instant; the lock is never
    /// held across the computation. Concurrent misses for the same key may each
    /// run the computation; the last writer wins and replacement is atomic.
    ///
    /// If `compute` fails, nothing is stored and the error is returned to the
    /// caller unchanged.
    ///
    /// # Arguments
    /// * `operation` - Stable string identifying the operation
    /// * `params` - Ordered parameter values, part of the cache key
    /// * `ttl` - Freshness window; entries at least this old are stale
    /// * `compute` - Produces the authoritative result on a miss
    pub fn get_or_compute<F, E>(
        &self,
        operation: &str,
        params: &[Value],
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let key = CacheKey::derive(operation, params);
        let now = self.clock.now();

        // Lookup phase: hold the lock only long enough to classify the entry.
        {
            let mut guard = self.lock();
            let inner = &mut *guard;

            if let Some(entry) = inner.entries.get(&key) {
                if !entry.is_expired(now, ttl) {
                    let value = entry.value.clone();
                    inner.stats.record_hit();
                    debug!(operation, ?params, key = %key, "cache hit");
                    return Ok(value);
                }
                inner.entries.remove(&key);
                inner.stats.record_expiration();
                inner.stats.record_miss();
                let remaining = inner.entries.len();
                inner.stats.set_total_entries(remaining);
                debug!(operation, ?params, key = %key, "cache expired");
            } else {
                inner.stats.record_miss();
                debug!(operation, ?params, key = %key, "cache miss");
            }
        }

        // Miss: run the computation without the lock.
        let value = compute()?;

        let mut guard = self.lock();
        let inner = &mut *guard;
        inner.stats.record_compute();
        inner
            .entries
            .insert(key, CacheEntry::new(value.clone(), self.clock.now()));
        let total = inner.entries.len();
        inner.stats.set_total_entries(total);

        Ok(value)
    }

    // == Peek ==
    /// Returns the cached result for (operation, params) without computing.
    ///
    /// Expired entries are removed on access and reported as [`CacheError::Expired`];
    /// absent keys as [`CacheError::NotFound`].
    pub fn peek(
        &self,
        operation: &str,
        params: &[Value],
        ttl: Duration,
    ) -> Result<V, CacheError> {
        let key = CacheKey::derive(operation, params);
        let now = self.clock.now();

        let mut guard = self.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get(&key) {
            if !entry.is_expired(now, ttl) {
                let value = entry.value.clone();
                inner.stats.record_hit();
                return Ok(value);
            }
            inner.entries.remove(&key);
            inner.stats.record_expiration();
            inner.stats.record_miss();
            let remaining = inner.entries.len();
            inner.stats.set_total_entries(remaining);
            return Err(CacheError::Expired(key.to_string()));
        }

        inner.stats.record_miss();
        Err(CacheError::NotFound(key.to_string()))
    }

    // == Invalidate ==
    /// Explicitly evicts the entry for (operation, params).
    pub fn invalidate(&self, operation: &str, params: &[Value]) -> Result<(), CacheError> {
        let key = CacheKey::derive(operation, params);

        let mut guard = self.lock();
        let inner = &mut *guard;

        if inner.entries.remove(&key).is_some() {
            let remaining = inner.entries.len();
            inner.stats.set_total_entries(remaining);
            debug!(operation, ?params, key = %key, "cache entry invalidated");
            Ok(())
        } else {
            Err(CacheError::NotFound(key.to_string()))
        }
    }

    // == Purge Expired ==
    /// Removes every entry older than `max_age`.
    ///
    /// Returns the number of entries removed. This complements lazy on-access
    /// eviction; entries untouched by lookups would otherwise linger.
    pub fn purge_expired(&self, max_age: Duration) -> usize {
        let now = self.clock.now();

        let mut guard = self.lock();
        let inner = &mut *guard;

        let expired_keys: Vec<CacheKey> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, max_age))
            .map(|(key, _)| *key)
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            inner.entries.remove(&key);
            inner.stats.record_expiration();
        }

        let remaining = inner.entries.len();
        inner.stats.set_total_entries(remaining);

        count
    }
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
