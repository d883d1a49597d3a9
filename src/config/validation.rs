//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check mode-dependent requirements (dns mode needs a nameserver)
//! - Validate value ranges (threshold >= 1, nonzero durations)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before any monitor task is spawned; the monitor refuses to run
//!   with an invalid configuration

use thiserror::Error;

use crate::config::schema::{MonitorConfig, ProbeMode, TargetSpec};

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No targets were given at all.
    #[error("no targets configured")]
    NoTargets,

    /// Target host is an empty string.
    #[error("target has an empty host")]
    EmptyHost,

    /// DNS mode requires a nameserver address.
    #[error("target '{host}': dns mode requires a nameserver")]
    MissingNameserver { host: String },

    /// Dampening must be at least 1 (1 means no dampening).
    #[error("target '{host}': dampening threshold must be at least 1")]
    ZeroDampening { host: String },

    /// A zero poll interval would busy-loop the probe.
    #[error("target '{host}': poll interval must be nonzero")]
    ZeroInterval { host: String },

    /// A zero timeout can never observe a response.
    #[error("target '{host}': probe timeout must be nonzero")]
    ZeroTimeout { host: String },
}

/// Validate the full configuration, collecting every violation.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.targets.is_empty() {
        errors.push(ValidationError::NoTargets);
    }

    for target in &config.targets {
        validate_target(target, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_target(target: &TargetSpec, errors: &mut Vec<ValidationError>) {
    if target.host.is_empty() {
        errors.push(ValidationError::EmptyHost);
        return;
    }

    if target.mode == ProbeMode::Dns && target.dns_server.is_none() {
        errors.push(ValidationError::MissingNameserver {
            host: target.host.clone(),
        });
    }

    if target.dampening == 0 {
        errors.push(ValidationError::ZeroDampening {
            host: target.host.clone(),
        });
    }

    if target.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval {
            host: target.host.clone(),
        });
    }

    if target.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            host: target.host.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icmp_target(host: &str) -> TargetSpec {
        TargetSpec {
            host: host.to_string(),
            mode: ProbeMode::Icmp,
            source: None,
            dns_server: None,
            interval_secs: 5,
            timeout_secs: 5,
            dampening: 3,
        }
    }

    #[test]
    fn accepts_valid_icmp_target() {
        let config = MonitorConfig {
            targets: vec![icmp_target("1.1.1.1")],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_config() {
        let config = MonitorConfig { targets: vec![] };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoTargets]);
    }

    #[test]
    fn dns_mode_requires_nameserver() {
        let mut target = icmp_target("www.example.org");
        target.mode = ProbeMode::Dns;
        let config = MonitorConfig {
            targets: vec![target],
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingNameserver {
                host: "www.example.org".to_string()
            }]
        );
    }

    #[test]
    fn reports_all_errors_not_just_first() {
        let mut target = icmp_target("www.example.org");
        target.mode = ProbeMode::Dns;
        target.dampening = 0;
        target.timeout_secs = 0;
        let config = MonitorConfig {
            targets: vec![target],
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_zero_dampening() {
        let mut target = icmp_target("1.1.1.1");
        target.dampening = 0;
        let config = MonitorConfig {
            targets: vec![target],
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ZeroDampening {
                host: "1.1.1.1".to_string()
            }]
        );
    }
}
