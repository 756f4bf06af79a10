use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    logger::{self, LogTag},
    webserver::{state::AppState, ws::metrics::HubMetricsSnapshot},
};

/// Hub status response
#[derive(Debug, Clone, Serialize)]
pub struct HubStatusResponse {
    pub active_subscribers: usize,
    pub buffer_size: usize,
    pub uptime_seconds: u64,
    pub version: String,
    pub metrics: HubMetricsSnapshot,
}

/// Create status routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/hub", get(hub_status))
}

/// GET /api/hub
async fn hub_status(State(state): State<AppState>) -> Json<HubStatusResponse> {
    logger::verbose(LogTag::Webserver, "Hub status endpoint called");

    Json(HubStatusResponse {
        active_subscribers: state.hub.active_subscribers(),
        buffer_size: state.hub.buffer_size(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: state.hub.metrics().snapshot(),
    })
}
