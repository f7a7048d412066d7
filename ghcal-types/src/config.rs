//! Configuration types shared across the orchestrator and middleware.

use std::time::Duration;

/// Configuration for the `Ghcal` orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GhcalConfig {
    /// Deadline for a single window scrape. A window that exceeds it is
    /// logged and omitted. `None` waits indefinitely.
    pub window_timeout: Option<Duration>,
    /// Deadline for a whole aggregation, discovery included. `None` waits
    /// indefinitely.
    pub request_timeout: Option<Duration>,
}

/// Configuration for the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Age after which an entry is expired. Zero disables caching.
    pub ttl: Duration,
    /// Entry count above which the store starts evicting.
    pub max_entries: u64,
}

impl CacheConfig {
    /// One hour, the freshness window of a cached report.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
    /// Default entry-count threshold.
    pub const DEFAULT_MAX_ENTRIES: u64 = 1000;

    /// True when caching is effectively disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.ttl.is_zero() || self.max_entries == 0
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Self::DEFAULT_TTL,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }
}
