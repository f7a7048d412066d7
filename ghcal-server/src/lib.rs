//! ghcal-server
//!
//! HTTP boundary of ghcal: `GET /contributions/{username}` answers with the
//! JSON report, served from a per-username cache when fresh.

mod config;
mod handlers;
mod router;
mod state;

use std::sync::Arc;

use ghcal::Ghcal;
use ghcal_core::GhcalError;
use ghcal_github::GithubSource;
use ghcal_middleware::ResponseCache;

pub use config::ServerConfig;
pub use handlers::SCRAPE_FAILED;
pub use router::create_router;
pub use state::AppState;

/// Wire the GitHub source, orchestrator and cache described by `cfg`.
///
/// # Errors
/// Returns `GhcalError::Config` if the upstream URL is unusable.
pub fn build_state(cfg: &ServerConfig) -> Result<AppState, GhcalError> {
    let source = GithubSource::builder().base_url(&cfg.upstream).build()?;
    let ghcal = Ghcal::builder().source(Arc::new(source)).build()?;
    Ok(AppState::new(ghcal, ResponseCache::new(cfg.cache)))
}

/// Bind `cfg.addr` and serve until Ctrl-C.
///
/// # Errors
/// Returns `GhcalError::Config` if the state cannot be built or the listener
/// cannot bind, and `GhcalError::Request` if the server loop fails.
pub async fn run(cfg: ServerConfig) -> Result<(), GhcalError> {
    let state = build_state(&cfg)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(cfg.addr)
        .await
        .map_err(|e| GhcalError::Config(format!("bind {}: {e}", cfg.addr)))?;
    tracing::info!(addr = %cfg.addr, upstream = %cfg.upstream, "ghcal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GhcalError::request(cfg.addr.to_string(), e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
