//! Configuration Module
//!
//! Loads cache and limiter parameters from environment variables.

use std::env;
use std::hash::Hash;

use tracing::info;

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use crate::limiter::{Limiter, SystemClock};

/// Parameters for one cache and one limiter.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of cache entries; signed so bad input can be reported
    pub cache_capacity: i64,
    /// Limiter burst size in tokens
    pub limiter_capacity: f64,
    /// Limiter refill rate in tokens per second
    pub limiter_refill_rate: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unparseable values fall back to the defaults. Range checks happen in
    /// [`Config::validate`].
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `LIMITER_CAPACITY` - Burst size in tokens (default: 10)
    /// - `LIMITER_REFILL_RATE` - Tokens per second (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            cache_capacity: parse_env("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            limiter_capacity: parse_env("LIMITER_CAPACITY").unwrap_or(defaults.limiter_capacity),
            limiter_refill_rate: parse_env("LIMITER_REFILL_RATE")
                .unwrap_or(defaults.limiter_refill_rate),
        };

        info!(
            "Configuration loaded: cache_capacity={}, limiter_capacity={}, limiter_refill_rate={}/s",
            config.cache_capacity, config.limiter_capacity, config.limiter_refill_rate
        );
        config
    }

    /// Checks every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity < 0 {
            return Err(Error::InvalidArgument(format!(
                "CACHE_CAPACITY must be >= 0, got {}",
                self.cache_capacity
            )));
        }
        for (name, value) in [
            ("LIMITER_CAPACITY", self.limiter_capacity),
            ("LIMITER_REFILL_RATE", self.limiter_refill_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "{} must be a finite number >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Builds an empty cache with the configured capacity.
    pub fn build_cache<K, V>(&self) -> Result<CacheStore<K, V>>
    where
        K: Hash + Eq + Clone,
        V: Clone,
    {
        CacheStore::try_new(self.cache_capacity)
    }

    /// Builds a full, wall-clock driven limiter.
    pub fn build_limiter(&self) -> Result<Limiter<SystemClock>> {
        Limiter::new(self.limiter_capacity, self.limiter_refill_rate)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            limiter_capacity: 10.0,
            limiter_refill_rate: 1.0,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.limiter_capacity, 10.0);
        assert_eq!(config.limiter_refill_rate, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("LIMITER_CAPACITY");
        env::remove_var("LIMITER_REFILL_RATE");

        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn test_validate_rejects_negative_cache_capacity() {
        let config = Config {
            cache_capacity: -5,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
        assert!(config.build_cache::<String, String>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_limiter_values() {
        let negative_rate = Config {
            limiter_refill_rate: -1.0,
            ..Config::default()
        };
        assert!(negative_rate.validate().is_err());
        assert!(negative_rate.build_limiter().is_err());

        let nan_capacity = Config {
            limiter_capacity: f64::NAN,
            ..Config::default()
        };
        assert!(nan_capacity.validate().is_err());
    }

    #[test]
    fn test_build_from_config() {
        let config = Config {
            cache_capacity: 3,
            limiter_capacity: 2.0,
            limiter_refill_rate: 0.0,
        };

        let cache = config.build_cache::<u32, u32>().unwrap();
        assert_eq!(cache.capacity(), 3);

        let limiter = config.build_limiter().unwrap();
        assert!(limiter.allow());
        assert!(limiter.allow());
        assert!(!limiter.allow());
    }
}
