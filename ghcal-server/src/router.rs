use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/contributions/{username}", get(handlers::contributions))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
