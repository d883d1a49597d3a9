//! Shutdown coordination for the monitor.

use tokio::signal;
use tokio::sync::broadcast;

/// Coordinator for stopping all monitor tasks.
///
/// Wraps a broadcast channel; every monitor task holds a receiver and
/// checks it once per loop iteration. There is no other normal exit; the
/// monitor otherwise runs indefinitely.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Wait for an external interrupt (Ctrl-C / SIGINT) and trigger
    /// shutdown. The interrupt stops the loops promptly without surfacing
    /// an internal failure trace.
    pub async fn on_interrupt(&self) {
        match signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupted! Exiting...");
                self.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for interrupt signal");
                self.trigger();
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
