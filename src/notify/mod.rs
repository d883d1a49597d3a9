//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! monitor task
//!     → TransitionEvent (one per confirmed status crossing)
//!     → Notifier::notify
//!     → transport (external collaborator: syslog, email, SNMP, ...)
//! ```
//!
//! # Design Decisions
//! - The core only defines the sink interface; transports live elsewhere
//! - At-least-once delivery with no acknowledgement is acceptable
//! - Delivery failure is caught and logged by the caller, never propagated
//!   into the scheduling loop

pub mod log;

use std::time::SystemTime;

use thiserror::Error;

use crate::config::schema::ProbeMode;
use crate::liveness::Status;
use crate::probe::ProbeOutcome;

pub use log::LogNotifier;

/// The exactly-once signal emitted when a target's dampened status flips.
///
/// Consumed immediately by the notifier; not retained.
#[derive(Debug, Clone)]
pub struct TransitionEvent {
    /// Host or FQDN of the target that crossed.
    pub host: String,
    /// Probe mechanism that observed the crossing.
    pub mode: ProbeMode,
    pub from: Status,
    pub to: Status,
    pub timestamp: SystemTime,
    /// The check result that completed the streak.
    pub triggering_outcome: ProbeOutcome,
}

impl TransitionEvent {
    /// Render the notification message:
    /// `Target <host> is <dead|back to life> - <mode> check`.
    pub fn message(&self) -> String {
        let verdict = match self.to {
            Status::Dead => "dead",
            Status::Alive => "back to life",
        };
        format!("Target {} is {} - {} check", self.host, verdict, self.mode)
    }
}

/// Notification delivery failed. Recovered locally by the monitor loop.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Sink for transition events. The transport behind it is an external
/// collaborator's concern.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(to: Status, mode: ProbeMode) -> TransitionEvent {
        let (from, outcome) = match to {
            Status::Dead => (Status::Alive, ProbeOutcome::down("unreachable")),
            Status::Alive => (Status::Dead, ProbeOutcome::up(None)),
        };
        TransitionEvent {
            host: "www.w3.org".to_string(),
            mode,
            from,
            to,
            timestamp: SystemTime::now(),
            triggering_outcome: outcome,
        }
    }

    #[test]
    fn death_message_format() {
        assert_eq!(
            event(Status::Dead, ProbeMode::Icmp).message(),
            "Target www.w3.org is dead - icmp check"
        );
    }

    #[test]
    fn resurrection_message_format() {
        assert_eq!(
            event(Status::Alive, ProbeMode::Dns).message(),
            "Target www.w3.org is back to life - dns check"
        );
    }
}
