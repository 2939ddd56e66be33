//! Configuration Module
//!
//! Server settings read from environment variables. Unset or unparsable
//! variables fall back to the defaults below.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache capacity (`MAX_ENTRIES`, default 1000)
    pub max_entries: usize,
    /// Default TTL in seconds, 0 = entries never expire by default
    /// (`DEFAULT_TTL`, default 300)
    pub default_ttl: u64,
    /// `SERVER_PORT`, default 3000
    pub server_port: u16,
    /// Seconds between purge runs (`PURGE_INTERVAL`, default 1)
    pub purge_interval: u64,
    /// Entries inspected per purge run (`PURGE_BATCH`, default 128)
    pub purge_batch: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_entries: parse_or(lookup("MAX_ENTRIES"), defaults.max_entries),
            default_ttl: parse_or(lookup("DEFAULT_TTL"), defaults.default_ttl),
            server_port: parse_or(lookup("SERVER_PORT"), defaults.server_port),
            purge_interval: parse_or(lookup("PURGE_INTERVAL"), defaults.purge_interval),
            purge_batch: parse_or(lookup("PURGE_BATCH"), defaults.purge_batch),
        }
    }

    /// `None` when the default TTL is disabled.
    pub fn cache_default_ttl(&self) -> Option<Duration> {
        (self.default_ttl > 0).then(|| Duration::from_secs(self.default_ttl))
    }

    pub fn purge_period(&self) -> Duration {
        Duration::from_secs(self.purge_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            purge_interval: 1,
            purge_batch: 128,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
