//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use ghcal_core::{CacheConfig, GhcalError};
use ghcal_github::GithubSource;

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Response cache settings.
    pub cache: CacheConfig,
    /// Upstream base URL handed to the GitHub source.
    pub upstream: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cache: CacheConfig::default(),
            upstream: GithubSource::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Listen address variable, e.g. `127.0.0.1:3000`.
    pub const ADDR_VAR: &'static str = "GHCAL_ADDR";
    /// Cache freshness in whole seconds; `0` disables the cache.
    pub const CACHE_TTL_VAR: &'static str = "GHCAL_CACHE_TTL_SECS";
    /// Cache entry-count threshold.
    pub const CACHE_MAX_ENTRIES_VAR: &'static str = "GHCAL_CACHE_MAX_ENTRIES";
    /// Upstream base URL.
    pub const UPSTREAM_VAR: &'static str = "GHCAL_UPSTREAM";

    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, GhcalError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; unset keys keep their defaults.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` when a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GhcalError> {
        let mut cfg = Self::default();
        if let Some(v) = lookup(Self::ADDR_VAR) {
            cfg.addr = parse_var(Self::ADDR_VAR, &v)?;
        }
        if let Some(v) = lookup(Self::CACHE_TTL_VAR) {
            cfg.cache.ttl = Duration::from_secs(parse_var(Self::CACHE_TTL_VAR, &v)?);
        }
        if let Some(v) = lookup(Self::CACHE_MAX_ENTRIES_VAR) {
            cfg.cache.max_entries = parse_var(Self::CACHE_MAX_ENTRIES_VAR, &v)?;
        }
        if let Some(v) = lookup(Self::UPSTREAM_VAR) {
            let v = v.trim();
            if v.is_empty() {
                return Err(GhcalError::Config(format!("{} is empty", Self::UPSTREAM_VAR)));
            }
            cfg.upstream = v.to_string();
        }
        Ok(cfg)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, GhcalError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| GhcalError::Config(format!("{key}={raw:?}: {e}")))
}
