//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI args (clap, main.rs)  ──┐
//!                             ├─→ schema.rs (TargetSpec per target)
//! config file (TOML)          │
//!     → loader.rs (parse)  ───┘
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → shared read-only with each monitor task
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a target spec never changes during a
//!   monitoring session
//! - All optional fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every error, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{MonitorConfig, ProbeMode, TargetSpec};
pub use validation::{validate_config, ValidationError};

use thiserror::Error;

/// Error type for configuration handling. The only error class that may
/// abort the process, and only before monitoring begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation failed; carries every violation found.
    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The host platform has no known ping flag mapping.
    #[error("unsupported platform '{0}': no known ping flag mapping")]
    UnsupportedPlatform(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
