//! Platform-specific ping flag mapping.
//!
//! Different operating systems disagree on the ping timeout unit and the
//! source-address flag. The mapping is resolved once at startup into an
//! immutable record passed into each ICMP probe; an unrecognized platform
//! is a fatal configuration error, not a per-check error.

use crate::config::ConfigError;

/// Immutable ping invocation settings for the host platform.
#[derive(Debug, Clone, Copy)]
pub struct PingSettings {
    /// Multiplier converting whole seconds to the unit `-W` expects.
    pub timeout_unit: u64,
    /// Flag that selects the source address.
    pub source_flag: &'static str,
}

impl PingSettings {
    /// Resolve settings for the running platform.
    pub fn detect() -> Result<Self, ConfigError> {
        Self::for_os(std::env::consts::OS)
    }

    pub(crate) fn for_os(os: &str) -> Result<Self, ConfigError> {
        match os {
            // Linux ping takes -W in seconds and the source as -I
            "linux" => Ok(Self {
                timeout_unit: 1,
                source_flag: "-I",
            }),
            // macOS ping takes -W in milliseconds and the source as -S
            "macos" => Ok(Self {
                timeout_unit: 1000,
                source_flag: "-S",
            }),
            other => Err(ConfigError::UnsupportedPlatform(other.to_string())),
        }
    }
}
