/// Transport boundary for subscriber sessions
///
/// A session only needs three things from a connection: send one text
/// message, learn when the peer goes away, and close. `WsTransport` adapts
/// an axum WebSocket; tests use an in-memory implementation.
use async_trait::async_trait;
use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};

use crate::errors::TransportError;

use super::message::Payload;

/// Inbound activity observed on a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerEvent {
    /// Peer sent a frame (dashboard viewers are send-only; contents are discarded)
    Frame,
    /// Peer closed the connection
    Closed,
}

#[async_trait]
pub trait Transport: Send {
    /// Write one payload as a text message
    async fn send(&mut self, payload: &Payload) -> Result<(), TransportError>;

    /// Wait for the next inbound event
    ///
    /// Must be cancel-safe: the session polls it alongside its queue.
    async fn recv(&mut self) -> Result<PeerEvent, TransportError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), TransportError>;
}

// ============================================================================
// AXUM WEBSOCKET
// ============================================================================

/// WebSocket transport for live dashboard viewers
pub struct WsTransport {
    socket: WebSocket,
    closed: bool,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self {
            socket,
            closed: false,
        }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, payload: &Payload) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::ConnectionClosed);
        }
        self.socket
            .send(Message::Text(payload.as_str().to_string()))
            .await?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<PeerEvent, TransportError> {
        match self.socket.recv().await {
            None | Some(Ok(Message::Close(_))) => {
                self.closed = true;
                Ok(PeerEvent::Closed)
            }
            // Pings are answered by the websocket layer; everything else is ignored
            Some(Ok(_)) => Ok(PeerEvent::Frame),
            Some(Err(e)) => Err(TransportError::WebSocket(e)),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::NORMAL,
                reason: "".into(),
            })))
            .await?;
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY TRANSPORT (tests)
// ============================================================================

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::mpsc;

    use super::{PeerEvent, Transport};
    use crate::errors::TransportError;
    use crate::webserver::ws::message::Payload;

    /// What the test side can observe about a mock connection
    #[derive(Debug, Default)]
    pub struct MockState {
        pub sent: Vec<String>,
        pub writes_started: usize,
        pub close_calls: usize,
        pub fail_writes: bool,
        pub write_delay: Option<Duration>,
        pub close_delay: Option<Duration>,
    }

    /// In-memory transport driven from the test through a `MockPeer`
    pub struct MockTransport {
        state: Arc<Mutex<MockState>>,
        inbound: mpsc::UnboundedReceiver<Result<PeerEvent, TransportError>>,
    }

    /// Test-side controls for a `MockTransport`
    #[derive(Clone)]
    pub struct MockPeer {
        pub state: Arc<Mutex<MockState>>,
        inbound: mpsc::UnboundedSender<Result<PeerEvent, TransportError>>,
    }

    pub fn pair() -> (MockTransport, MockPeer) {
        let state = Arc::new(Mutex::new(MockState::default()));
        let (tx, rx) = mpsc::unbounded_channel();
        (
            MockTransport {
                state: Arc::clone(&state),
                inbound: rx,
            },
            MockPeer { state, inbound: tx },
        )
    }

    impl MockPeer {
        pub fn send_frame(&self) {
            let _ = self.inbound.send(Ok(PeerEvent::Frame));
        }

        pub fn close(&self) {
            let _ = self.inbound.send(Ok(PeerEvent::Closed));
        }

        pub fn fail_read(&self) {
            let _ = self.inbound.send(Err(TransportError::ConnectionClosed));
        }

        pub fn fail_writes(&self) {
            self.state.lock().fail_writes = true;
        }

        pub fn delay_writes(&self, delay: Duration) {
            self.state.lock().write_delay = Some(delay);
        }

        pub fn delay_close(&self, delay: Duration) {
            self.state.lock().close_delay = Some(delay);
        }

        pub fn sent(&self) -> Vec<String> {
            self.state.lock().sent.clone()
        }

        pub fn writes_started(&self) -> usize {
            self.state.lock().writes_started
        }

        pub fn close_calls(&self) -> usize {
            self.state.lock().close_calls
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&mut self, payload: &Payload) -> Result<(), TransportError> {
            let (fail, delay) = {
                let mut state = self.state.lock();
                state.writes_started += 1;
                (state.fail_writes, state.write_delay)
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(TransportError::ConnectionClosed);
            }
            self.state.lock().sent.push(payload.as_str().to_string());
            Ok(())
        }

        async fn recv(&mut self) -> Result<PeerEvent, TransportError> {
            match self.inbound.recv().await {
                Some(event) => event,
                // Test dropped every MockPeer: behave like an idle open connection
                None => std::future::pending().await,
            }
        }

        async fn close(&mut self) -> Result<(), TransportError> {
            let delay = {
                let mut state = self.state.lock();
                state.close_calls += 1;
                state.close_delay
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok(())
        }
    }
}
