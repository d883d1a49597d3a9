//! Liveness tracking subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeOutcome (one per check)
//!     → LivenessTracker::update (tracker.rs)
//!     → Update::NoChange | Update::Dampening | Update::Transition
//!
//! State machine:
//!     Alive ←→ Dead
//!     With a symmetric dampening threshold to prevent flapping
//! ```
//!
//! # Design Decisions
//! - Exactly `threshold` consecutive same-polarity outcomes flip status in
//!   either direction; one interrupting outcome fully resets the streak
//! - At most one transition per crossing; further same-polarity outcomes
//!   while latched are silent
//! - State is exclusively owned by one monitor task; no locks

pub mod tracker;

pub use tracker::{LivenessTracker, Status, Transition, Update};
