use ghcal::Ghcal;
use ghcal_middleware::ResponseCache;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Scraping orchestrator.
    pub ghcal: Ghcal,
    /// Serialized-report cache keyed by username.
    pub cache: ResponseCache,
}

impl AppState {
    /// Bundle an orchestrator with its response cache.
    #[must_use]
    pub const fn new(ghcal: Ghcal, cache: ResponseCache) -> Self {
        Self { ghcal, cache }
    }
}
