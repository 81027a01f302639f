//! Clock Module
//!
//! Injectable time source for the cache. Expiration is always evaluated against a
//! `Clock` so tests can advance time explicitly instead of sleeping.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

// == Clock Trait ==
/// Source of the current instant used for entry timestamps and expiry checks.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Wall-clock implementation used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Manual Clock ==
/// Manually advanced clock for deterministic expiry tests.
///
/// Starts at a fixed instant and only moves when [`ManualClock::advance`] is called.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a manual clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    // == Advance ==
    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = chrono::Duration::from_std(delta).expect("clock delta out of range");
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now = *now + delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
