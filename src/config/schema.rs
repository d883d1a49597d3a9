//! Configuration schema definitions.
//!
//! This module defines the target specification consumed by the monitor.
//! All types derive Serde traits for deserialization from config files; the
//! CLI builds the same types directly.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration: the set of targets to monitor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Target definitions.
    pub targets: Vec<TargetSpec>,
}

/// Probe mechanism used for a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// ICMP echo via the system ping binary.
    #[default]
    Icmp,
    /// A-record query against a configured nameserver.
    Dns,
}

impl fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeMode::Icmp => write!(f, "icmp"),
            ProbeMode::Dns => write!(f, "dns"),
        }
    }
}

impl FromStr for ProbeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icmp" => Ok(ProbeMode::Icmp),
            "dns" => Ok(ProbeMode::Dns),
            other => Err(format!("unknown mode '{other}', expected icmp or dns")),
        }
    }
}

/// Specification of a single monitored target.
///
/// Immutable for the lifetime of a monitoring session; created once at
/// startup from the CLI or a config file and validated before any monitor
/// task starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetSpec {
    /// Host or FQDN to check.
    pub host: String,

    /// Probe mechanism (default: icmp).
    #[serde(default)]
    pub mode: ProbeMode,

    /// Optional source IP address for the probe.
    #[serde(default)]
    pub source: Option<IpAddr>,

    /// Nameserver to query; mandatory when mode is dns.
    #[serde(default)]
    pub dns_server: Option<IpAddr>,

    /// Seconds to sleep between completed checks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds before a single check is declared failed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Consecutive same-polarity checks required to flip the target's
    /// status, in either direction.
    #[serde(default = "default_dampening")]
    pub dampening: u32,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_dampening() -> u32 {
    3
}

impl TargetSpec {
    /// Poll interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Probe timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
