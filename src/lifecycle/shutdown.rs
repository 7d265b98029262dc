//! Shutdown coordination.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// One-shot stop signal for background tasks (watch loop, SIGHUP handler).
///
/// Tasks hold a receiver from `subscribe` and exit when it fires. Firing is
/// idempotent.
pub struct Shutdown {
    notify: broadcast::Sender<()>,
    fired: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self {
            notify,
            fired: AtomicBool::new(false),
        }
    }

    /// Receiver that resolves once `trigger` is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Fire the signal. Returns `false` if it had already fired.
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        let listeners = self.notify.send(()).unwrap_or(0);
        tracing::debug!(listeners, "Shutdown triggered");
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_all_subscribers() {
        let shutdown = Shutdown::new();
        let mut watch_loop = shutdown.subscribe();
        let mut hangup = shutdown.subscribe();

        assert!(shutdown.trigger());

        assert!(watch_loop.recv().await.is_ok());
        assert!(hangup.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let shutdown = Shutdown::default();
        assert!(!shutdown.is_triggered());

        assert!(shutdown.trigger());
        assert!(!shutdown.trigger());
        assert!(shutdown.is_triggered());
    }
}
