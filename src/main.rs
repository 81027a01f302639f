//! Query Cache Demo
//!
//! Runs the canonical usage flow against an in-memory user table: fetch users over
//! an age threshold through the cache twice (one query executed), retry a flaky
//! lookup, and report cache statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use query_cache::{retry_on_failure, spawn_purge_task, Config, QueryCache, RetryPolicy};

// == Demo Data ==
/// A row from the simulated users table.
#[derive(Debug, Clone, Serialize)]
struct User {
    id: u64,
    name: String,
    age: u32,
}

#[derive(Debug, Error)]
enum DbError {
    #[error("database unavailable: {0}")]
    Unavailable(String),
}

/// In-memory stand-in for the users database; counts executed queries.
#[derive(Debug)]
struct UserDirectory {
    users: Vec<User>,
    queries_executed: AtomicU64,
    flaky_attempts: AtomicU64,
}

impl UserDirectory {
    fn seed() -> Self {
        let users = vec![
            User {
                id: 1,
                name: "alice".to_string(),
                age: 34,
            },
            User {
                id: 2,
                name: "bob".to_string(),
                age: 22,
            },
            User {
                id: 3,
                name: "carol".to_string(),
                age: 41,
            },
            User {
                id: 4,
                name: "dave".to_string(),
                age: 19,
            },
        ];
        Self {
            users,
            queries_executed: AtomicU64::new(0),
            flaky_attempts: AtomicU64::new(0),
        }
    }

    fn fetch_users_over_age(&self, age: u32) -> Result<Vec<User>, DbError> {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .users
            .iter()
            .filter(|user| user.age > age)
            .cloned()
            .collect())
    }

    /// Fails on the first two attempts, simulating a connection that needs retries.
    fn fetch_oldest_user(&self) -> Result<User, DbError> {
        let attempt = self.flaky_attempts.fetch_add(1, Ordering::Relaxed);
        if attempt < 2 {
            return Err(DbError::Unavailable("connection refused".to_string()));
        }
        self.users
            .iter()
            .max_by_key(|user| user.age)
            .cloned()
            .ok_or_else(|| DbError::Unavailable("empty table".to_string()))
    }
}

// == Entry Point ==
/// Demo entry point.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and start the background purge task
/// 4. Fetch through the cache twice, showing one executed query
/// 5. Retry a flaky lookup through the retry wrapper
/// 6. Report cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "debug" for this crate, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "query_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting query cache demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, purge_interval={}s, max_entry_age={}s",
        config.default_ttl_secs, config.purge_interval_secs, config.max_entry_age_secs
    );

    let cache: Arc<QueryCache<Vec<User>>> = Arc::new(QueryCache::new());
    let purge_handle = spawn_purge_task(
        cache.clone(),
        config.purge_interval_secs,
        config.max_entry_age(),
    );
    info!("Background purge task started");

    let db = UserDirectory::seed();
    let ttl = config.default_ttl();
    let params = vec![json!(25)];

    // First call executes the query and caches the result.
    let users = cache.get_or_compute("fetch_users_over_age", &params, ttl, || {
        db.fetch_users_over_age(25)
    })?;
    info!(count = users.len(), "first fetch");

    // Second call is served from the cache; the query does not run again.
    let users_again = cache.get_or_compute("fetch_users_over_age", &params, ttl, || {
        db.fetch_users_over_age(25)
    })?;
    info!(count = users_again.len(), "second fetch (cached)");

    // A flaky lookup recovered by the retry wrapper.
    let oldest = retry_on_failure(
        RetryPolicy {
            retries: 3,
            delay: Duration::from_millis(100),
        },
        || db.fetch_oldest_user(),
    )?;
    info!(name = %oldest.name, age = oldest.age, "oldest user fetched with retries");

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        computes = stats.computes,
        queries_executed = db.queries_executed.load(Ordering::Relaxed),
        hit_rate = stats.hit_rate(),
        "demo finished"
    );

    purge_handle.abort();
    Ok(())
}
