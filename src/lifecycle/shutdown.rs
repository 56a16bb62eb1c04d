//! Shutdown coordination for the proxy.
//!
//! The signal task in `main` owns the coordinator and fires it once;
//! `HttpServer::run` (and integration tests tearing a server down) hold
//! receivers and drain when the signal arrives.

use tokio::sync::broadcast;

/// Hands out stop-signal receivers and fires the one-shot trigger.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for a task that should stop when the signal fires.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the stop signal. Safe to call after every receiver is gone.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
