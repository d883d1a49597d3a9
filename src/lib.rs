//! Dampened Reachability Monitor
//!
//! Decides whether each configured target is alive or dead by probing it
//! repeatedly (ICMP echo or DNS resolution) and feeding the outcomes through
//! a hysteresis state machine that suppresses alarms from transient blips.

pub mod config;
pub mod lifecycle;
pub mod liveness;
pub mod monitor;
pub mod notify;
pub mod probe;

pub use config::schema::{MonitorConfig, TargetSpec};
pub use lifecycle::Shutdown;
