use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Plain-text body of every failed scrape.
pub const SCRAPE_FAILED: &str = "Failed to scrape contributions";

/// Liveness check.
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /contributions/{username}`: the cached or freshly scraped report.
pub async fn contributions(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    let started = Instant::now();
    let res = state
        .cache
        .get_or_compute(&username, || state.ghcal.contributions_json(&username))
        .await;

    match res {
        Ok(report) => {
            tracing::info!(
                username = %username,
                duration = ?started.elapsed(),
                captured_at = %report.captured_at,
                "contributions served"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                report.body.clone(),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(username = %username, error = %e, "{SCRAPE_FAILED}");
            (StatusCode::INTERNAL_SERVER_ERROR, SCRAPE_FAILED).into_response()
        }
    }
}
