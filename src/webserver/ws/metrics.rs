use serde::Serialize;
/// Broadcast metrics collection
///
/// Hub-level counters and per-session counters for monitoring and debugging.
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// CONNECTION METRICS
// ============================================================================

/// Per-session metrics (thread-safe)
#[derive(Debug, Default)]
pub struct ConnectionMetrics {
    /// Payloads written to the transport
    messages_sent: AtomicU64,

    /// Bytes written to the transport
    bytes_sent: AtomicU64,

    /// Inbound frames received (and discarded)
    frames_received: AtomicU64,
}

impl ConnectionMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record one payload written
    pub fn record_sent(&self, bytes: usize) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ConnectionMetricsSnapshot {
        ConnectionMetricsSnapshot {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            frames_received: self.frames_received.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot (serializable)
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionMetricsSnapshot {
    pub messages_sent: u64,
    pub bytes_sent: u64,
    pub frames_received: u64,
}

// ============================================================================
// HUB METRICS
// ============================================================================

/// Hub-level metrics (aggregate across all subscribers)
#[derive(Debug, Default)]
pub struct HubMetrics {
    /// Subscribers registered (lifetime)
    total_registered: AtomicU64,

    /// Currently registered subscribers
    active_subscribers: AtomicUsize,

    /// Publish calls
    payloads_published: AtomicU64,

    /// Successful enqueues (one per subscriber per publish)
    payloads_enqueued: AtomicU64,

    /// Subscribers removed because their queue was full
    evictions: AtomicU64,

    /// Subscribers removed by any path (eviction or session exit)
    unregistrations: AtomicU64,
}

impl HubMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscriber_registered(&self) {
        self.total_registered.fetch_add(1, Ordering::Relaxed);
        self.active_subscribers.fetch_add(1, Ordering::Relaxed);
    }

    /// Must be called exactly once per subscriber actually removed
    pub fn subscriber_removed(&self) {
        self.unregistrations.fetch_add(1, Ordering::Relaxed);
        self.active_subscribers.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn subscriber_evicted(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn payload_published(&self, enqueued: usize) {
        self.payloads_published.fetch_add(1, Ordering::Relaxed);
        self.payloads_enqueued
            .fetch_add(enqueued as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> HubMetricsSnapshot {
        HubMetricsSnapshot {
            total_registered: self.total_registered.load(Ordering::Relaxed),
            active_subscribers: self.active_subscribers.load(Ordering::Relaxed),
            payloads_published: self.payloads_published.load(Ordering::Relaxed),
            payloads_enqueued: self.payloads_enqueued.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            unregistrations: self.unregistrations.load(Ordering::Relaxed),
        }
    }
}

/// Hub metrics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct HubMetricsSnapshot {
    pub total_registered: u64,
    pub active_subscribers: usize,
    pub payloads_published: u64,
    pub payloads_enqueued: u64,
    pub evictions: u64,
    pub unregistrations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_metrics() {
        let metrics = ConnectionMetrics::new();

        metrics.record_sent(10);
        metrics.record_sent(5);
        metrics.record_received();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.messages_sent, 2);
        assert_eq!(snapshot.bytes_sent, 15);
        assert_eq!(snapshot.frames_received, 1);
    }

    #[test]
    fn test_hub_metrics() {
        let metrics = HubMetrics::new();

        metrics.subscriber_registered();
        metrics.subscriber_registered();
        metrics.payload_published(2);
        metrics.payload_published(1);
        metrics.subscriber_evicted();
        metrics.subscriber_removed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_registered, 2);
        assert_eq!(snapshot.active_subscribers, 1);
        assert_eq!(snapshot.payloads_published, 2);
        assert_eq!(snapshot.payloads_enqueued, 3);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.unregistrations, 1);
    }
}
