//! Configuration Module
//!
//! Handles loading cache settings from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds used by callers that take it from config
    pub default_ttl_secs: u64,
    /// Background purge interval in seconds
    pub purge_interval_secs: u64,
    /// Maximum entry age in seconds enforced by the background purge
    pub max_entry_age_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL_SECS` - Default TTL in seconds (default: 60)
    /// - `PURGE_INTERVAL_SECS` - Purge frequency in seconds (default: 1)
    /// - `MAX_ENTRY_AGE_SECS` - Maximum entry age for the purge (default: 600)
    pub fn from_env() -> Self {
        Self {
            default_ttl_secs: env::var("DEFAULT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            purge_interval_secs: env::var("PURGE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            max_entry_age_secs: env::var("MAX_ENTRY_AGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
        }
    }

    /// Default TTL as a [`Duration`].
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Maximum entry age as a [`Duration`].
    pub fn max_entry_age(&self) -> Duration {
        Duration::from_secs(self.max_entry_age_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_secs: 60,
            purge_interval_secs: 1,
            max_entry_age_secs: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl_secs, 60);
        assert_eq!(config.purge_interval_secs, 1);
        assert_eq!(config.max_entry_age_secs, 600);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_TTL_SECS");
        env::remove_var("PURGE_INTERVAL_SECS");
        env::remove_var("MAX_ENTRY_AGE_SECS");

        let config = Config::from_env();
        assert_eq!(config.default_ttl_secs, 60);
        assert_eq!(config.purge_interval_secs, 1);
        assert_eq!(config.max_entry_age_secs, 600);
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.default_ttl(), Duration::from_secs(60));
        assert_eq!(config.max_entry_age(), Duration::from_secs(600));
    }
}
