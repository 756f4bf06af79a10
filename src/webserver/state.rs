/// Shared application state for the webserver
///
/// Everything a route handler needs: the hub viewers subscribe to, the
/// process shutdown signal (so sessions stop with the server) and the
/// per-write deadline for sessions.
use std::sync::Arc;
use std::time::Duration;

use crate::shutdown::ShutdownSignal;
use crate::webserver::ws::WsHub;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Broadcast hub for live viewers
    pub hub: Arc<WsHub>,

    /// Cancels every session when the process shuts down
    pub shutdown: ShutdownSignal,

    /// Upper bound for writing one payload to a viewer
    pub write_timeout: Duration,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(hub: Arc<WsHub>, shutdown: ShutdownSignal, write_timeout: Duration) -> Self {
        Self {
            hub,
            shutdown,
            write_timeout,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
