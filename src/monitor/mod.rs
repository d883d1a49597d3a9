//! Monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! One task per target (scheduler.rs):
//!     probe.check()                      (bounded by the probe timeout)
//!     → tracker.update(outcome)
//!     → notifier.notify(event)           (on confirmed transitions only)
//!     → sleep(interval) | shutdown
//! ```
//!
//! # Design Decisions
//! - Sleep happens after a completed check, so the gap between check starts
//!   is probe-duration + interval; accepted approximation, not
//!   jitter-corrected
//! - Cancellation is cooperative, observed once per iteration; an in-flight
//!   probe runs to completion under its own timeout
//! - Nothing inside the loop terminates it; probe execution errors degrade
//!   to "target unreachable"

pub mod scheduler;

pub use scheduler::TargetMonitor;
