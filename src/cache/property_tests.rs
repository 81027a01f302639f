//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify key-derivation and bookkeeping properties of the cache.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use proptest::prelude::*;
use serde_json::Value;

use crate::cache::{CacheKey, QueryCache};
use crate::clock::ManualClock;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates operation identifiers
fn operation_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,24}".prop_map(|s| s)
}

/// Generates a single parameter value
fn param_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

/// Generates an ordered parameter list
fn params_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(param_strategy(), 0..4)
}

/// Generates a sequence of cache operations over a small key space so that
/// hits, misses, and invalidations all actually occur
#[derive(Debug, Clone)]
enum CacheOp {
    Compute { operation: &'static str, param: i64 },
    Peek { operation: &'static str, param: i64 },
    Invalidate { operation: &'static str, param: i64 },
}

fn small_operation() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("fetch_users"), Just("count_users"), Just("list_roles")]
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    (small_operation(), 0..3i64, 0..3u8).prop_map(|(operation, param, kind)| match kind {
        0 => CacheOp::Compute { operation, param },
        1 => CacheOp::Peek { operation, param },
        _ => CacheOp::Invalidate { operation, param },
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any (operation, params), deriving the key twice yields the same key.
    #[test]
    fn prop_key_deterministic(operation in operation_strategy(), params in params_strategy()) {
        let a = CacheKey::derive(&operation, &params);
        let b = CacheKey::derive(&operation, &params);
        prop_assert_eq!(a, b, "identical inputs must produce identical keys");
    }

    // Distinct parameter lists never map to the same key.
    #[test]
    fn prop_key_distinct_params(
        operation in operation_strategy(),
        first in params_strategy(),
        second in params_strategy(),
    ) {
        prop_assume!(first != second);

        let a = CacheKey::derive(&operation, &first);
        let b = CacheKey::derive(&operation, &second);
        prop_assert_ne!(a, b, "distinct params must produce distinct keys");
    }

    // Distinct operations never share a key, even with identical params.
    #[test]
    fn prop_key_distinct_operations(
        first in operation_strategy(),
        second in operation_strategy(),
        params in params_strategy(),
    ) {
        prop_assume!(first != second);

        let a = CacheKey::derive(&first, &params);
        let b = CacheKey::derive(&second, &params);
        prop_assert_ne!(a, b, "distinct operations must produce distinct keys");
    }

    // A computed value is returned verbatim on the next lookup, without a second
    // computation, for as long as the clock stands still.
    #[test]
    fn prop_cached_value_roundtrip(
        operation in operation_strategy(),
        params in params_strategy(),
        value in "[a-zA-Z0-9]{0,32}",
    ) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = QueryCache::<String>::with_clock(clock);

        let stored = cache
            .get_or_compute(&operation, &params, TEST_TTL, || -> Result<String, Infallible> {
                Ok(value.clone())
            })
            .unwrap();
        prop_assert_eq!(&stored, &value);

        let cached = cache
            .get_or_compute(&operation, &params, TEST_TTL, || -> Result<String, Infallible> {
                panic!("fresh entry must not recompute")
            })
            .unwrap();
        prop_assert_eq!(&cached, &value, "round-trip value mismatch");
    }

    // For any sequence of compute/peek/invalidate operations under a frozen clock,
    // the statistics match a simple set-based model of the cache contents.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = QueryCache::<i64>::with_clock(clock);

        let mut present: HashSet<(&'static str, i64)> = HashSet::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_computes: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Compute { operation, param } => {
                    let params = vec![Value::from(param)];
                    cache
                        .get_or_compute(operation, &params, TEST_TTL, || -> Result<i64, Infallible> {
                            Ok(param)
                        })
                        .unwrap();
                    if present.contains(&(operation, param)) {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                        expected_computes += 1;
                        present.insert((operation, param));
                    }
                }
                CacheOp::Peek { operation, param } => {
                    let params = vec![Value::from(param)];
                    match cache.peek(operation, &params, TEST_TTL) {
                        Ok(_) => expected_hits += 1,
                        Err(_) => expected_misses += 1,
                    }
                }
                CacheOp::Invalidate { operation, param } => {
                    let params = vec![Value::from(param)];
                    let _ = cache.invalidate(operation, &params);
                    present.remove(&(operation, param));
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
        prop_assert_eq!(stats.computes, expected_computes, "computes mismatch");
        prop_assert_eq!(stats.expirations, 0, "frozen clock must not expire entries");
        prop_assert_eq!(stats.total_entries, present.len(), "total entries mismatch");
        prop_assert_eq!(cache.len(), present.len(), "cache length mismatch");
    }
}
