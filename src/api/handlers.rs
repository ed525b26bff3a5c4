//! HTTP API handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

use crate::metrics;
use crate::players::{OutputFormat, PlayerSnapshot, PlayerSource};

/// Body returned when the player source cannot produce a snapshot.
pub const UNAVAILABLE_BODY: &str = "player list unavailable";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where the player list comes from.
    pub source: Arc<dyn PlayerSource>,
}

impl AppState {
    /// Create new app state around a player source.
    pub fn new(source: Arc<dyn PlayerSource>) -> Self {
        Self { source }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("source", &self.source.name())
            .finish()
    }
}

/// Player list handler - answers every method and path.
///
/// Method, path and body are ignored. The `Accept` header picks between
/// the bracketed plaintext list (default) and a JSON snapshot.
pub async fn player_list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let format = OutputFormat::from_accept(accept);
    let format_label = format.to_string();

    metrics::inc_requests(&format_label);

    let response = match state.source.players().await {
        Ok(players) => {
            debug!(count = players.len(), %format, "serving player list");
            metrics::set_players_online(players.len());
            match format {
                OutputFormat::Text => players.to_string().into_response(),
                OutputFormat::Json => Json(PlayerSnapshot::capture(players)).into_response(),
            }
        }
        Err(e) => {
            warn!(source = state.source.name(), "player list unavailable: {}", e);
            metrics::inc_source_failures(state.source.name());
            (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_BODY).into_response()
        }
    };

    metrics::record_request_latency(start, &format_label);
    response
}
