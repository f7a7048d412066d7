use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ghcal_core::{CacheConfig, GhcalError};
use moka::future::Cache;

/// A serialized report and the moment it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedReport {
    /// JSON body exactly as it is served.
    pub body: Vec<u8>,
    /// When the scrape that produced `body` finished.
    pub captured_at: DateTime<Utc>,
}

impl CachedReport {
    /// Wrap a freshly produced body, stamped with the current time.
    #[must_use]
    pub fn fresh(body: Vec<u8>) -> Self {
        Self {
            body,
            captured_at: Utc::now(),
        }
    }
}

/// Username-keyed cache of serialized reports.
///
/// Entries expire `ttl` after insertion and the store evicts once it holds
/// more than `max_entries`. Capacity eviction follows moka's admission
/// policy, so an entry may be dropped while still fresh; the next request
/// for it simply scrapes again. Concurrent misses for one username share a
/// single computation; failed computations are handed to every waiter and
/// never stored. A disabled configuration computes on every call.
#[derive(Clone)]
pub struct ResponseCache {
    store: Option<Cache<String, Arc<CachedReport>>>,
    cfg: CacheConfig,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("cfg", &self.cfg)
            .field("entries", &self.entry_count())
            .finish()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ResponseCache {
    /// Build a cache for `cfg`; a disabled configuration allocates no store.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        let store = (!cfg.is_disabled()).then(|| {
            Cache::builder()
                .max_capacity(cfg.max_entries)
                .time_to_live(cfg.ttl)
                .build()
        });
        Self { store, cfg }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> CacheConfig {
        self.cfg
    }

    /// Freshness window of an entry.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.cfg.ttl
    }

    /// True when every call computes.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.store.is_none()
    }

    /// Cached report for `username`, if present and fresh.
    pub async fn get(&self, username: &str) -> Option<Arc<CachedReport>> {
        match &self.store {
            Some(store) => store.get(username).await,
            None => None,
        }
    }

    /// Return the cached report for `username` or run `compute` to produce it.
    ///
    /// # Errors
    /// Returns whatever `compute` failed with. The failure is not cached.
    pub async fn get_or_compute<F, Fut>(
        &self,
        username: &str,
        compute: F,
    ) -> Result<Arc<CachedReport>, GhcalError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, GhcalError>>,
    {
        let Some(store) = &self.store else {
            return compute().await.map(|body| Arc::new(CachedReport::fresh(body)));
        };

        #[cfg(feature = "tracing")]
        if store.contains_key(username) {
            tracing::debug!(username, "cache hit");
        }

        store
            .try_get_with(username.to_string(), async move {
                #[cfg(feature = "tracing")]
                tracing::debug!(username, "cache miss");
                compute()
                    .await
                    .map(|body| Arc::new(CachedReport::fresh(body)))
            })
            .await
            .map_err(|e: Arc<GhcalError>| (*e).clone())
    }

    /// Drop the entry for `username`.
    pub async fn invalidate(&self, username: &str) {
        if let Some(store) = &self.store {
            store.invalidate(username).await;
        }
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.store.as_ref().map_or(0, Cache::entry_count)
    }

    /// Apply pending expirations and evictions now.
    pub async fn run_pending_tasks(&self) {
        if let Some(store) = &self.store {
            store.run_pending_tasks().await;
        }
    }
}
