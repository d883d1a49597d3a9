//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → load/validate config → resolve platform settings
//!     → spawn one monitor task per target
//!
//! Shutdown (shutdown.rs):
//!     SIGINT received → broadcast to all monitor tasks
//!     → each task exits at its next iteration boundary
//! ```
//!
//! # Design Decisions
//! - Configuration errors are fatal before any task starts; nothing is
//!   fatal afterwards
//! - Shutdown is cooperative; in-flight probes complete under their own
//!   timeout

pub mod shutdown;

pub use shutdown::Shutdown;
