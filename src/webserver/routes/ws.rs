/// Live metrics WebSocket endpoint
///
/// Each upgraded connection becomes one subscriber session. Viewers are
/// send-only; inbound frames are read only to notice disconnects.
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
};

use crate::{
    errors::TransportError,
    logger::{self, LogTag},
    webserver::{
        state::AppState,
        ws::{run_session, WsTransport},
    },
};

/// GET /ws
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    logger::debug(LogTag::Webserver, "WebSocket upgrade requested");

    ws.on_failed_upgrade(|e: axum::Error| {
        let err = TransportError::Handshake(e.to_string());
        logger::warning(LogTag::Webserver, &format!("Viewer rejected: {}", err));
    })
    .on_upgrade(move |socket| async move {
        run_session(
            state.hub,
            WsTransport::new(socket),
            state.shutdown,
            state.write_timeout,
        )
        .await;
    })
}
