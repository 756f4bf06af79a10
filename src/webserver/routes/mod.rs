use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::webserver::state::AppState;

pub mod status;
pub mod ws;

/// Build the router: live stream, hub status API, static dashboard fallback
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new().merge(status::routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::ShutdownSignal;
    use crate::webserver::ws::WsHub;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(WsHub::new(10), ShutdownSignal::new(), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_static_fallback_serves_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>dashboard</h1>").unwrap();
        let app = create_router(test_state(), dir.path());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>dashboard</h1>");
    }

    #[tokio::test]
    async fn test_unknown_static_path_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(), dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ws_requires_upgrade() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state();
        let hub = state.hub.clone();
        let app = create_router(state, dir.path());

        // Plain GET without upgrade headers never reaches the hub
        let response = app
            .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        assert_eq!(hub.metrics().snapshot().total_registered, 0);
    }
}
