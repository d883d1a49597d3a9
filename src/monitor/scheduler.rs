//! Per-target monitoring loop.
//!
//! # Responsibilities
//! - Drive the probe→tracker→notifier pipeline at the configured interval
//! - Emit the per-check and per-transition observability lines
//! - Keep running no matter how a single check misbehaves

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::schema::TargetSpec;
use crate::liveness::{LivenessTracker, Status, Update};
use crate::notify::{Notifier, TransitionEvent};
use crate::probe::{Probe, ProbeOutcome};

/// One scheduler/probe/tracker triple bound to a single target.
///
/// Owns its tracker state exclusively; independent targets run as
/// independent `TargetMonitor` tasks sharing nothing mutable.
pub struct TargetMonitor<P> {
    spec: TargetSpec,
    probe: P,
    tracker: LivenessTracker,
    notifier: Arc<dyn Notifier>,
}

impl<P: Probe> TargetMonitor<P> {
    pub fn new(spec: TargetSpec, probe: P, notifier: Arc<dyn Notifier>) -> Self {
        let tracker = LivenessTracker::new(spec.dampening);
        Self {
            spec,
            probe,
            tracker,
            notifier,
        }
    }

    /// Run checks until the shutdown signal arrives.
    ///
    /// Cancellation is checked once per iteration, after the check
    /// completes; an in-flight probe is never aborted mid-flight.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            host = %self.spec.host,
            mode = %self.spec.mode,
            interval_secs = self.spec.interval_secs,
            timeout_secs = self.spec.timeout_secs,
            dampening = self.spec.dampening,
            "monitor starting"
        );

        loop {
            let outcome = match self.probe.check().await {
                Ok(outcome) => outcome,
                // The tooling failed, not (necessarily) the target; there
                // is no way to tell the difference from here, so the cycle
                // counts toward the failure streak.
                Err(e) => {
                    tracing::warn!(host = %self.spec.host, error = %e, "probe execution failed");
                    ProbeOutcome::down(format!("probe execution failed: {e}"))
                }
            };

            self.observe(&outcome);

            match self.tracker.update(outcome.alive) {
                Update::NoChange => {}
                Update::Dampening { successes } => {
                    tracing::info!(
                        host = %self.spec.host,
                        successes,
                        required = self.spec.dampening,
                        "Dampening in progress"
                    );
                }
                Update::Transition(transition) => {
                    let event = TransitionEvent {
                        host: self.spec.host.clone(),
                        mode: self.spec.mode,
                        from: transition.from,
                        to: transition.to,
                        timestamp: SystemTime::now(),
                        triggering_outcome: outcome,
                    };
                    self.announce(&event);
                }
            }

            tokio::select! {
                _ = time::sleep(self.spec.interval()) => {}
                _ = shutdown.recv() => {
                    tracing::info!(host = %self.spec.host, "monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Per-check observability line. Informational, not authoritative state.
    fn observe(&self, outcome: &ProbeOutcome) {
        if outcome.alive {
            match &outcome.measurement {
                Some(measurement) => {
                    tracing::info!(host = %self.spec.host, response = %measurement, "Target alive");
                }
                None => {
                    tracing::info!(host = %self.spec.host, "Target alive");
                }
            }
        } else {
            let reason = outcome.diagnostic.as_deref().unwrap_or_default();
            tracing::info!(
                host = %self.spec.host,
                reason = %reason,
                "The {} check did not succeed",
                self.spec.mode
            );
        }
    }

    /// Log the confirmed transition and hand it to the notifier. A failing
    /// notifier is logged and ignored; it must never stop the loop.
    fn announce(&self, event: &TransitionEvent) {
        match event.to {
            Status::Dead => {
                tracing::error!(host = %self.spec.host, "Target is dead");
            }
            Status::Alive => {
                tracing::error!(host = %self.spec.host, "Target resurrected");
            }
        }

        if let Err(e) = self.notifier.notify(event) {
            tracing::error!(host = %self.spec.host, error = %e, "notification delivery failed");
        }
    }
}
