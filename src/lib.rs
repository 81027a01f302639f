//! Query Cache - An in-process expiring query-result cache
//!
//! Memoizes the results of parameterized query-like operations, keyed by a
//! deterministic fingerprint of (operation, parameters), with TTL expiration and
//! thread-safe access.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod retry;
pub mod tasks;

pub use cache::{CacheEntry, CacheKey, CacheStats, QueryCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::CacheError;
pub use retry::{retry_on_failure, RetryPolicy};
pub use tasks::spawn_purge_task;
