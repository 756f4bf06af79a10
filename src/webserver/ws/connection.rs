/// Subscriber session - one per live viewer connection
///
/// Lifecycle: `Connecting → Active → Closing → Closed`
/// - Connecting: handshake (done by the upgrade route before `run_session`)
/// - Active: register with the hub, then forward queued payloads to the
///   transport until cancellation, peer close, a transport error, or eviction
/// - Closing: unregister from the hub and close the transport
/// - Closed: the terminating reason is returned to the caller
///
/// Unregistration is tied to the `Subscriber` handle's drop, so it also
/// happens if the session future is aborted mid-write.
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::errors::SessionError;
use crate::logger::{self, LogTag};
use crate::shutdown::ShutdownSignal;

use super::hub::WsHub;
use super::metrics::ConnectionMetrics;
use super::transport::{PeerEvent, Transport};

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Active,
    Closing,
    Closed,
}

/// Run a subscriber session until it terminates
///
/// Always returns the terminating reason; by the time it returns the
/// subscriber is no longer registered and the transport has been closed.
pub async fn run_session<T: Transport>(
    hub: Arc<WsHub>,
    mut transport: T,
    shutdown: ShutdownSignal,
    write_timeout: Duration,
) -> SessionError {
    let mut state = SessionState::Connecting;
    let metrics = ConnectionMetrics::new();

    let mut subscriber = hub.register();
    let id = subscriber.id();
    transition(id, &mut state, SessionState::Active);

    let reason = loop {
        tokio::select! {
            biased;

            _ = shutdown.wait() => break SessionError::Cancelled,

            queued = subscriber.recv() => {
                let Some(payload) = queued else {
                    break SessionError::Evicted;
                };
                match timeout(write_timeout, transport.send(&payload)).await {
                    Ok(Ok(())) => metrics.record_sent(payload.len()),
                    Ok(Err(e)) => break SessionError::Write(e),
                    Err(_) => break SessionError::WriteTimeout(write_timeout),
                }
            }

            inbound = transport.recv() => match inbound {
                Ok(PeerEvent::Frame) => metrics.record_received(),
                Ok(PeerEvent::Closed) => break SessionError::PeerClosed,
                Err(e) => break SessionError::Read(e),
            },
        }
    };

    transition(id, &mut state, SessionState::Closing);

    // Release the registration before any further await
    drop(subscriber);

    // A peer that stopped reading can stall the close frame as well
    match timeout(write_timeout, transport.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => logger::debug(
            LogTag::Session,
            &format!("Session {}: close failed: {}", id, e),
        ),
        Err(_) => logger::debug(
            LogTag::Session,
            &format!(
                "Session {}: close timed out after {}ms, dropping connection",
                id,
                write_timeout.as_millis()
            ),
        ),
    }
    transition(id, &mut state, SessionState::Closed);

    let snapshot = metrics.snapshot();
    let summary = format!(
        "Session {} ended: {} (sent={}, bytes={}, received={})",
        id, reason, snapshot.messages_sent, snapshot.bytes_sent, snapshot.frames_received
    );
    if reason.is_graceful() {
        logger::debug(LogTag::Session, &summary);
    } else {
        logger::warning(LogTag::Session, &summary);
    }

    reason
}

fn transition(id: u64, state: &mut SessionState, next: SessionState) {
    logger::verbose(
        LogTag::Session,
        &format!("Session {}: {:?} -> {:?}", id, state, next),
    );
    *state = next;
}
