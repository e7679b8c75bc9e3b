//! Shutdown coordination for `serve`.

use tokio::sync::broadcast;

/// Why the web front end is stopping.
pub type ShutdownReason = &'static str;

/// Broadcasts a single stop request, with its reason, to every listener.
pub struct Shutdown {
    tx: broadcast::Sender<ShutdownReason>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownReason> {
        self.tx.subscribe()
    }

    /// Request shutdown. Listeners subscribed later never see it.
    pub fn trigger(&self, reason: ShutdownReason) {
        let listeners = self.tx.send(reason).unwrap_or(0);
        tracing::info!(reason, listeners, "Shutdown requested");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
