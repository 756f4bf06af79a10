/// Shutdown coordination
///
/// A single `ShutdownSignal` is created in `main` and cloned into every
/// long-running task (webserver, sampler, sessions). Triggering it is
/// level-triggered: tasks that start waiting after the trigger return
/// immediately, so no task can miss the signal.
use std::sync::Arc;

use tokio::sync::watch;

use crate::logger::{self, LogTag};

#[derive(Clone, Debug)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    /// Request shutdown; idempotent
    pub fn trigger(&self) {
        let was_triggered = self.tx.send_replace(true);
        if !was_triggered {
            logger::debug(LogTag::System, "Shutdown signal triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown has been requested
    ///
    /// Cancel-safe: dropping the future has no side effects.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as any clone of self, so this cannot fail
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the Ctrl+C handler; a second Ctrl+C exits immediately
pub fn install_shutdown_handlers(signal: &ShutdownSignal) -> Result<(), ctrlc::Error> {
    let signal = signal.clone();
    ctrlc::set_handler(move || {
        if signal.is_triggered() {
            eprintln!("\n🛑 [SIGNAL] Second Ctrl+C, exiting immediately");
            std::process::exit(130);
        }
        logger::info(
            LogTag::System,
            "🛑 Received Ctrl+C, initiating graceful shutdown...",
        );
        signal.trigger();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_resolves_after_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };

        assert!(!signal.is_triggered());
        signal.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn test_late_waiter_returns_immediately() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();

        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("already triggered");
    }
}
