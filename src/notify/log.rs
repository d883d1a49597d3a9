//! Process-local logging notifier.
//!
//! Stands in for the syslog transport of the original deployment: every
//! transition is written to the process logging facility under a fixed
//! application tag and facility class. Shipping the message over a real
//! syslog socket (or email, or SNMP) is an external collaborator's concern.

use super::{Notifier, NotifyError, TransitionEvent};

/// Application tag identifying this monitor in log output.
pub const APP_TAG: &str = "livecheck";

/// Facility class label carried alongside every notification.
pub const FACILITY: &str = "local4";

/// Notifier that emits transition messages through the process logger.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
        tracing::warn!(
            target: "livecheck::notify",
            app = APP_TAG,
            facility = FACILITY,
            "{}",
            event.message()
        );
        Ok(())
    }
}
