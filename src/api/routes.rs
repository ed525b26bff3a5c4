//! HTTP API route definitions.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{player_list, AppState};

/// Create the API router.
///
/// There is a single catch-all handler: every method on every path gets
/// the player list.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(player_list)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
