/// Live metrics broadcast over WebSocket
///
/// One producer (the sampler) publishes text payloads into the hub; every
/// connected viewer gets its own bounded queue and a session task that
/// drains it onto the socket.
///
/// ## Key Components
/// - `hub`: subscriber registry, fan-out, evict-on-full backpressure
/// - `connection`: per-viewer session lifecycle
/// - `transport`: connection boundary (axum WebSocket, in-memory for tests)
/// - `message`: payload type and the timestamp marker
/// - `producers`: periodic sampling loop
/// - `metrics`: hub and per-connection counters
pub mod connection;
pub mod hub;
pub mod message;
pub mod metrics;
pub mod producers;
pub mod transport;

pub use connection::run_session;
pub use hub::{PublishReport, Subscriber, SubscriberId, WsHub};
pub use message::Payload;
pub use producers::start_producers;
pub use transport::{Transport, WsTransport};
