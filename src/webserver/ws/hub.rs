/// Central broadcast hub - subscriber registry and fan-out
///
/// The WsHub owns the set of live subscribers and delivers every published
/// payload to each of them without ever blocking on a slow one.
///
/// Delivery policy: **evict-on-full**. Each subscriber has a bounded queue
/// (`buffer_size`). `publish` does a non-blocking enqueue per subscriber; a
/// full queue removes the subscriber from the registry on the spot and the
/// payload is not retried. The session notices the closed queue, drains
/// whatever was already queued and ends with `SessionError::Evicted`.
///
/// All registry reads and writes happen under one mutex that is only held
/// for in-memory work (map edits and `try_send`). Logging happens after the
/// lock is released.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::logger::{self, LogTag};

use super::message::Payload;
use super::metrics::HubMetrics;

// ============================================================================
// HUB TYPES
// ============================================================================

/// Subscriber ID (unique per hub, never reused)
pub type SubscriberId = u64;

/// Hub-side half of a subscriber queue
type QueueSender = mpsc::Sender<Payload>;

/// Outcome of one `publish` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that accepted the payload
    pub delivered: usize,

    /// Subscribers removed because their queue was full
    pub evicted: Vec<SubscriberId>,
}

// ============================================================================
// SUBSCRIBER
// ============================================================================

/// Session-side handle of a registered subscriber
///
/// Dropping the handle unregisters it, so every exit path of a session
/// (including an aborted task) releases the registration.
pub struct Subscriber {
    id: SubscriberId,
    queue: mpsc::Receiver<Payload>,
    hub: Arc<WsHub>,
}

impl Subscriber {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next queued payload in FIFO order
    ///
    /// Returns `None` once the hub has released the queue (eviction or
    /// explicit unregister) and everything already queued was consumed.
    /// Cancel-safe.
    pub async fn recv(&mut self) -> Option<Payload> {
        self.queue.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv)
    pub fn try_recv(&mut self) -> Option<Payload> {
        self.queue.try_recv().ok()
    }

    /// Whether the hub still delivers to this subscriber
    pub fn is_registered(&self) -> bool {
        self.hub.is_registered(self.id)
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber").field("id", &self.id).finish()
    }
}

// ============================================================================
// WS HUB
// ============================================================================

/// Central broadcast hub
pub struct WsHub {
    /// Active subscribers (subscriber_id → queue sender)
    subscribers: Mutex<HashMap<SubscriberId, QueueSender>>,

    /// Next subscriber ID
    next_id: AtomicU64,

    /// Hub metrics
    metrics: Arc<HubMetrics>,

    /// Per-subscriber queue depth (from config)
    buffer_size: usize,
}

impl WsHub {
    /// Create a new hub; `buffer_size` is clamped to at least 1
    pub fn new(buffer_size: usize) -> Arc<Self> {
        Arc::new(Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            metrics: HubMetrics::new(),
            buffer_size: buffer_size.max(1),
        })
    }

    /// Register a new subscriber
    ///
    /// The subscriber is visible to every `publish` that starts after this
    /// returns.
    pub fn register(self: &Arc<Self>) -> Subscriber {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.buffer_size);

        let active = {
            let mut subscribers = self.subscribers.lock();
            subscribers.insert(id, tx);
            subscribers.len()
        };
        self.metrics.subscriber_registered();

        logger::debug(
            LogTag::Hub,
            &format!("Subscriber {} registered (active={})", id, active),
        );

        Subscriber {
            id,
            queue: rx,
            hub: Arc::clone(self),
        }
    }

    /// Remove a subscriber and release its queue
    ///
    /// Idempotent: returns `false` when the subscriber was already removed
    /// (for example by a concurrent eviction).
    pub fn unregister(&self, id: SubscriberId) -> bool {
        let (removed, active) = {
            let mut subscribers = self.subscribers.lock();
            // Dropping the sender closes the queue exactly once
            let removed = subscribers.remove(&id).is_some();
            (removed, subscribers.len())
        };

        if removed {
            self.metrics.subscriber_removed();
            logger::debug(
                LogTag::Hub,
                &format!("Subscriber {} unregistered (active={})", id, active),
            );
        }

        removed
    }

    /// Fan a payload out to every registered subscriber
    ///
    /// Never blocks and never fails. The registry scan is a single critical
    /// section, so the set of recipients is a consistent snapshot.
    pub fn publish(&self, payload: Payload) -> PublishReport {
        let mut report = PublishReport::default();

        {
            let mut subscribers = self.subscribers.lock();
            // `Subscriber::drop` unregisters before its receiver closes, so a
            // registered sender never sees `Closed`; only `Full` removes here
            subscribers.retain(|id, tx| match tx.try_send(payload.clone()) {
                Ok(()) => {
                    report.delivered += 1;
                    true
                }
                Err(_) => {
                    report.evicted.push(*id);
                    false
                }
            });
        }

        self.metrics.payload_published(report.delivered);
        for id in &report.evicted {
            self.metrics.subscriber_removed();
            self.metrics.subscriber_evicted();
            logger::info(
                LogTag::Hub,
                &format!(
                    "Subscriber {} evicted: queue full ({} pending)",
                    id, self.buffer_size
                ),
            );
        }

        logger::verbose(
            LogTag::Hub,
            &format!(
                "Published {} bytes (delivered={}, evicted={})",
                payload.len(),
                report.delivered,
                report.evicted.len()
            ),
        );

        report
    }

    pub fn is_registered(&self, id: SubscriberId) -> bool {
        self.subscribers.lock().contains_key(&id)
    }

    /// Get active subscriber count
    pub fn active_subscribers(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Get hub metrics
    pub fn metrics(&self) -> Arc<HubMetrics> {
        Arc::clone(&self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(subscriber: &mut Subscriber) -> Vec<String> {
        let mut received = Vec::new();
        while let Some(payload) = subscriber.try_recv() {
            received.push(payload.as_str().to_string());
        }
        received
    }

    #[tokio::test]
    async fn test_hub_registration() {
        let hub = WsHub::new(10);

        let sub1 = hub.register();
        let sub2 = hub.register();

        assert_eq!(hub.active_subscribers(), 2);
        assert_ne!(sub1.id(), sub2.id());

        assert!(hub.unregister(sub1.id()));
        assert_eq!(hub.active_subscribers(), 1);
        assert!(!sub1.is_registered());
        assert!(sub2.is_registered());
    }

    #[tokio::test]
    async fn test_publish_preserves_fifo_order() {
        let hub = WsHub::new(10);
        let mut sub = hub.register();

        for i in 0..5 {
            hub.publish(Payload::from(format!("tick-{}", i)));
        }

        assert_eq!(
            drain(&mut sub),
            vec!["tick-0", "tick-1", "tick-2", "tick-3", "tick-4"]
        );
    }

    #[tokio::test]
    async fn test_full_queue_evicts_subscriber() {
        let hub = WsHub::new(2);
        let mut sub = hub.register();
        let id = sub.id();

        assert_eq!(hub.publish(Payload::from("A")).delivered, 1);
        assert_eq!(hub.publish(Payload::from("B")).delivered, 1);

        let report = hub.publish(Payload::from("C"));
        assert_eq!(report.delivered, 0);
        assert_eq!(report.evicted, vec![id]);
        assert!(!hub.is_registered(id));

        // Later publishes no longer reference it
        let report = hub.publish(Payload::from("D"));
        assert_eq!(report, PublishReport::default());

        // Queued payloads survive eviction, then the queue reports closed
        assert_eq!(sub.recv().await.unwrap().as_str(), "A");
        assert_eq!(sub.recv().await.unwrap().as_str(), "B");
        assert!(sub.recv().await.is_none());

        let snapshot = hub.metrics().snapshot();
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.unregistrations, 1);
        assert_eq!(snapshot.active_subscribers, 0);
    }

    #[tokio::test]
    async fn test_eviction_after_capacity_plus_one() {
        let hub = WsHub::new(10);
        let sub = hub.register();

        for i in 0..10 {
            let report = hub.publish(Payload::from(format!("{}", i)));
            assert_eq!(report.delivered, 1);
        }
        let report = hub.publish(Payload::from("overflow"));
        assert_eq!(report.evicted, vec![sub.id()]);
        assert_eq!(hub.active_subscribers(), 0);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        let hub = WsHub::new(4);
        let mut sub = hub.register();
        let mut other = hub.register();

        assert!(hub.unregister(sub.id()));
        assert!(!hub.unregister(sub.id()));

        // Queue is closed once; the other subscriber is untouched
        assert!(sub.recv().await.is_none());
        hub.publish(Payload::from("still here"));
        assert_eq!(drain(&mut other), vec!["still here"]);

        // Dropping the handle after explicit unregister is a no-op
        drop(sub);
        let snapshot = hub.metrics().snapshot();
        assert_eq!(snapshot.unregistrations, 1);
        assert_eq!(snapshot.active_subscribers, 1);
    }

    #[tokio::test]
    async fn test_unregister_after_eviction_is_noop() {
        let hub = WsHub::new(1);
        let sub = hub.register();

        hub.publish(Payload::from("1"));
        hub.publish(Payload::from("2"));
        assert!(!sub.is_registered());

        assert!(!hub.unregister(sub.id()));
        drop(sub);
        assert_eq!(hub.metrics().snapshot().unregistrations, 1);
    }

    #[tokio::test]
    async fn test_dropping_handle_unregisters() {
        let hub = WsHub::new(4);
        let sub = hub.register();
        assert_eq!(hub.active_subscribers(), 1);

        drop(sub);
        assert_eq!(hub.active_subscribers(), 0);

        // The entry is gone before the receiver closed: a publish finds nothing to remove
        let report = hub.publish(Payload::from("x"));
        assert_eq!(report, PublishReport::default());
        let snapshot = hub.metrics().snapshot();
        assert_eq!(snapshot.unregistrations, 1);
        assert_eq!(snapshot.evictions, 0);
    }

    #[tokio::test]
    async fn test_slow_subscriber_does_not_affect_others() {
        let hub = WsHub::new(2);
        let slow = hub.register();
        let mut fast = hub.register();

        let mut fast_received = Vec::new();
        for i in 0..5 {
            hub.publish(Payload::from(format!("{}", i)));
            fast_received.extend(drain(&mut fast));
        }

        assert!(!slow.is_registered());
        assert!(fast.is_registered());
        assert_eq!(fast_received, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_zero_buffer_is_clamped() {
        let hub = WsHub::new(0);
        assert_eq!(hub.buffer_size(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_publish_and_churn() {
        let hub = WsHub::new(64);

        let mut consumer = hub.register();
        let reader = tokio::spawn(async move {
            let mut received = Vec::new();
            while let Some(payload) = consumer.recv().await {
                received.push(payload.as_str().parse::<u32>().unwrap());
                if received.len() == 200 {
                    break;
                }
            }
            received
        });

        let churn = {
            let hub = Arc::clone(&hub);
            tokio::spawn(async move {
                for _ in 0..200 {
                    let sub = hub.register();
                    tokio::task::yield_now().await;
                    hub.unregister(sub.id());
                    drop(sub);
                }
            })
        };

        for i in 0..200u32 {
            hub.publish(Payload::from(i.to_string()));
            if i % 16 == 0 {
                tokio::task::yield_now().await;
            }
        }

        churn.await.unwrap();
        let received = reader.await.unwrap();

        // The consumer either kept up (full, ordered stream) or was evicted
        // (ordered prefix); order is never violated
        assert!(received.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(received.first().copied(), Some(0));
    }
}
