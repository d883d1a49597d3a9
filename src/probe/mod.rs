//! Probe subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeKind::check()
//!     → IcmpProbe (icmp.rs): spawn ping, bound by timeout, parse latency
//!     → DnsProbe (dns.rs): A-record query, first address wins
//!     → ProbeOutcome { alive, measurement, diagnostic }
//! ```
//!
//! # Design Decisions
//! - "Target did not answer" is a normal negative outcome, never an error;
//!   `ProbeError` fires only when the measurement mechanism itself cannot run
//! - Probe variants form a closed set chosen at configuration time; the
//!   scheduler depends only on the `Probe` trait
//! - Platform-specific ping flags are resolved once at startup into an
//!   immutable settings record (platform.rs), not re-detected per check

pub mod dns;
pub mod icmp;
pub mod platform;

use std::fmt;
use std::future::Future;
use std::net::IpAddr;
use std::time::SystemTime;

use thiserror::Error;

use crate::config::schema::{ProbeMode, TargetSpec};
use crate::config::ConfigError;

pub use dns::DnsProbe;
pub use icmp::IcmpProbe;
pub use platform::PingSettings;

/// Fallback diagnostic when a failed check produced no message of its own.
pub const GENERIC_FAILURE: &str = "The check did not succeed";

/// What a successful probe measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// ICMP round-trip average in milliseconds.
    LatencyMs(f64),
    /// First address the target name resolved to.
    ResolvedAddr(IpAddr),
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::LatencyMs(ms) => write!(f, "{ms} ms"),
            Measurement::ResolvedAddr(addr) => write!(f, "{addr}"),
        }
    }
}

/// Result of a single reachability check.
///
/// Produced fresh on every probe invocation and consumed immediately by the
/// liveness tracker.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Whether the target answered.
    pub alive: bool,
    /// Latency or resolved address; `None` when the target answered but the
    /// tool output could not be interpreted.
    pub measurement: Option<Measurement>,
    /// Diagnostic text for a negative outcome, for logging only.
    pub diagnostic: Option<String>,
    /// When the check completed.
    pub timestamp: SystemTime,
}

impl ProbeOutcome {
    /// Positive outcome, optionally carrying what was measured.
    pub fn up(measurement: Option<Measurement>) -> Self {
        Self {
            alive: true,
            measurement,
            diagnostic: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Negative outcome with a diagnostic; an empty diagnostic is
    /// normalized to a generic message.
    pub fn down(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        let diagnostic = if diagnostic.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            diagnostic
        };
        Self {
            alive: false,
            measurement: None,
            diagnostic: Some(diagnostic),
            timestamp: SystemTime::now(),
        }
    }
}

/// The measurement mechanism itself could not run. A target that merely
/// failed to answer is a negative [`ProbeOutcome`], not a `ProbeError`.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The ping subprocess could not be launched.
    #[error("failed to launch ping: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A single reachability or resolvability measurement mechanism.
pub trait Probe {
    /// Perform one check, bounded by the probe's configured timeout.
    fn check(&self) -> impl Future<Output = Result<ProbeOutcome, ProbeError>> + Send;
}

/// Closed set of probe variants, bound at configuration time.
#[derive(Debug)]
pub enum ProbeKind {
    Icmp(IcmpProbe),
    Dns(DnsProbe),
}

impl ProbeKind {
    /// Build the probe for a validated target spec.
    ///
    /// Returns [`ConfigError::Validation`] if the target slipped past
    /// validation (dns mode without a nameserver).
    pub fn for_target(spec: &TargetSpec, settings: PingSettings) -> Result<Self, ConfigError> {
        match spec.mode {
            ProbeMode::Icmp => Ok(ProbeKind::Icmp(IcmpProbe::new(
                spec.host.clone(),
                spec.timeout(),
                spec.source,
                settings,
            ))),
            ProbeMode::Dns => {
                let nameserver = spec.dns_server.ok_or_else(|| {
                    ConfigError::Validation(vec![
                        crate::config::ValidationError::MissingNameserver {
                            host: spec.host.clone(),
                        },
                    ])
                })?;
                Ok(ProbeKind::Dns(DnsProbe::new(
                    spec.host.clone(),
                    nameserver,
                    spec.source,
                    spec.timeout(),
                )))
            }
        }
    }
}

impl Probe for ProbeKind {
    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        match self {
            ProbeKind::Icmp(probe) => probe.check().await,
            ProbeKind::Dns(probe) => probe.check().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_diagnostic_is_normalized() {
        let outcome = ProbeOutcome::down("");
        assert_eq!(outcome.diagnostic.as_deref(), Some(GENERIC_FAILURE));

        let outcome = ProbeOutcome::down("   \n");
        assert_eq!(outcome.diagnostic.as_deref(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn non_empty_diagnostic_is_kept() {
        let outcome = ProbeOutcome::down("connect: Network is unreachable");
        assert_eq!(
            outcome.diagnostic.as_deref(),
            Some("connect: Network is unreachable")
        );
        assert!(!outcome.alive);
        assert!(outcome.measurement.is_none());
    }
}
