//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries stored without one
    pub default_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Leaderboard rows returned when a request gives no limit
    pub leaderboard_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `LEADERBOARD_LIMIT` - Default leaderboard size (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            leaderboard_limit: env_or("LEADERBOARD_LIMIT", defaults.leaderboard_limit),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

/// Reads and parses `key`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: crate::cache::DEFAULT_TTL.as_secs(),
            sweep_interval: crate::cache::DEFAULT_SWEEP_INTERVAL.as_secs(),
            server_port: 3000,
            leaderboard_limit: crate::reduce::DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}
