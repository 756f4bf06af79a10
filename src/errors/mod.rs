/// Structured error types for sysmonitor
///
/// Each failure domain gets its own enum so callers can decide locally
/// whether an error is recoverable:
/// - `CollectionError`: one metrics category failed for one tick (skip it)
/// - `TransportError`: one viewer connection failed (end that session only)
/// - `SessionError`: why a session stopped (always returned, never silent)
/// - `ServerError`: listener failures (fatal for the process)
/// - `ConfigError`: configuration could not be loaded or is invalid
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

// =============================================================================
// PRODUCER ERRORS
// =============================================================================

/// A metrics collector could not produce its section
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The platform did not report a required value
    #[error("{0} information is unavailable on this host")]
    Unavailable(&'static str),

    /// No mounted filesystem matched the configured mount point
    #[error("no disk mounted at '{0}'")]
    DiskNotFound(String),
}

// =============================================================================
// TRANSPORT ERRORS
// =============================================================================

/// Failure of the duplex connection to one viewer
#[derive(Debug, Error)]
pub enum TransportError {
    /// The upgrade handshake did not complete
    #[error("websocket handshake failed: {0}")]
    Handshake(String),

    /// Protocol or I/O error reported by the websocket layer
    #[error("websocket error: {0}")]
    WebSocket(#[from] axum::Error),

    /// Operation attempted on a connection the peer already closed
    #[error("connection closed by peer")]
    ConnectionClosed,
}

// =============================================================================
// SESSION TERMINATION
// =============================================================================

/// Reason a subscriber session ended
///
/// A session always ends with one of these; normal peer disconnects and
/// shutdown are reported the same way as failures so the caller can log them.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Governing cancellation signal fired (process shutdown)
    #[error("session cancelled")]
    Cancelled,

    /// Peer closed the connection
    #[error("peer closed the connection")]
    PeerClosed,

    /// Hub evicted the subscriber because its queue was full
    #[error("evicted by hub (queue full)")]
    Evicted,

    /// Writing one payload exceeded the per-message timeout
    #[error("write timed out after {0:?}")]
    WriteTimeout(Duration),

    /// Writing one payload failed
    #[error("write failed: {0}")]
    Write(#[source] TransportError),

    /// Reading from the peer failed
    #[error("read failed: {0}")]
    Read(#[source] TransportError),
}

impl SessionError {
    /// True for endings that are part of normal operation
    pub fn is_graceful(&self) -> bool {
        matches!(self, SessionError::Cancelled | SessionError::PeerClosed)
    }
}

// =============================================================================
// LISTENER ERRORS
// =============================================================================

/// Fatal webserver errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error(
        "failed to bind to {0}: address already in use\n\
         \n\
         Another process (possibly another sysmonitor instance) is listening on this port.\n\
         Stop it or pass a different address with --listen <host:port>."
    )]
    AddrInUse(SocketAddr),

    #[error(
        "failed to bind to {0}: permission denied\n\
         \n\
         Ports below 1024 usually require elevated privileges.\n\
         Consider using a port above 1024."
    )]
    PermissionDenied(SocketAddr),

    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    /// Classify a bind failure, giving common cases an actionable message
    pub fn from_bind(addr: SocketAddr, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::AddrInUse => ServerError::AddrInUse(addr),
            std::io::ErrorKind::PermissionDenied => ServerError::PermissionDenied(addr),
            _ => ServerError::Bind { addr, source },
        }
    }
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_errors_are_classified() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();

        let in_use = ServerError::from_bind(
            addr,
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        );
        assert!(matches!(in_use, ServerError::AddrInUse(_)));
        assert!(in_use.to_string().contains("address already in use"));

        let denied = ServerError::from_bind(
            addr,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(denied, ServerError::PermissionDenied(_)));

        let other = ServerError::from_bind(addr, std::io::Error::other("boom"));
        assert!(matches!(other, ServerError::Bind { .. }));
    }

    #[test]
    fn test_graceful_session_endings() {
        assert!(SessionError::Cancelled.is_graceful());
        assert!(SessionError::PeerClosed.is_graceful());
        assert!(!SessionError::Evicted.is_graceful());
        assert!(!SessionError::WriteTimeout(Duration::from_secs(1)).is_graceful());
        assert!(!SessionError::Write(TransportError::ConnectionClosed).is_graceful());
    }
}
