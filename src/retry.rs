//! Retry Module
//!
//! Fixed-delay retry for fallible computations. This is a wrapping layer separate
//! from the cache: the cache never retries, it surfaces the first failure and
//! leaves its state untouched.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use tracing::{error, warn};

// == Retry Policy ==
/// Number of retry attempts and the pause between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retry attempts after the initial call
    pub retries: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::from_secs(2),
        }
    }
}

// == Retry On Failure ==
/// Invokes `operation` until it succeeds or the policy's retries are exhausted.
///
/// Returns the first success, or the last error unchanged once `retries`
/// additional attempts have failed. Sleeps `delay` between attempts.
///
/// # Arguments
/// * `policy` - Retry count and delay
/// * `operation` - The fallible computation to repeat
pub fn retry_on_failure<T, E, F>(policy: RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let mut attempts = 0;

    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempts += 1;
                if attempts > policy.retries {
                    error!(%err, retries = policy.retries, "operation failed after all retries");
                    return Err(err);
                }
                warn!(
                    %err,
                    attempt = attempts,
                    retries = policy.retries,
                    "operation failed, retrying after delay"
                );
                thread::sleep(policy.delay);
            }
        }
    }
}
