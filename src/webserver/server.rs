/// Axum webserver implementation
///
/// Server lifecycle: bind, serve until the shutdown signal fires, then stop
/// accepting and let live sessions wind down on the same signal.
use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::{
    errors::ServerError,
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Start the webserver
///
/// Blocks until the state's shutdown signal fires or serving fails.
pub async fn start_server(
    listen: &str,
    static_dir: impl AsRef<Path>,
    state: AppState,
) -> Result<(), ServerError> {
    let listener = bind_listener(listen).await?;
    serve(listener, static_dir, state).await
}

/// Parse the listen address and bind a TCP listener
pub async fn bind_listener(listen: &str) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = listen.parse().map_err(|source| ServerError::InvalidAddress {
        addr: listen.to_string(),
        source,
    })?;

    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::from_bind(addr, e))
}

/// Serve on an already-bound listener
pub async fn serve(
    listener: TcpListener,
    static_dir: impl AsRef<Path>,
    state: AppState,
) -> Result<(), ServerError> {
    let shutdown = state.shutdown.clone();
    let app = build_app(state, static_dir.as_ref());

    if let Ok(addr) = listener.local_addr() {
        logger::info(
            LogTag::Webserver,
            &format!("✅ Webserver listening on http://{}", addr),
        );
        logger::debug(
            LogTag::Webserver,
            &format!("Live metrics stream at ws://{}/ws", addr),
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.wait().await;
            logger::debug(
                LogTag::Webserver,
                "Received shutdown signal, stopping webserver...",
            );
        })
        .await
        .map_err(ServerError::Serve)?;

    logger::debug(LogTag::Webserver, "✅ Webserver stopped gracefully");
    Ok(())
}

/// Build the Axum application with all routes and middleware
fn build_app(state: AppState, static_dir: &Path) -> Router {
    routes::create_router(state, static_dir).layer(CompressionLayer::new())
}
