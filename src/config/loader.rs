//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::MonitorConfig;
use crate::config::validation::validate_config;
use crate::config::ConfigError;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: MonitorConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProbeMode;

    #[test]
    fn loads_minimal_target_with_defaults() {
        let file = tempfile_with(
            r#"
            [[targets]]
            host = "8.8.8.8"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.targets.len(), 1);
        let target = &config.targets[0];
        assert_eq!(target.host, "8.8.8.8");
        assert_eq!(target.mode, ProbeMode::Icmp);
        assert_eq!(target.interval_secs, 5);
        assert_eq!(target.timeout_secs, 5);
        assert_eq!(target.dampening, 3);
    }

    #[test]
    fn rejects_invalid_target_at_load_time() {
        let file = tempfile_with(
            r#"
            [[targets]]
            host = "www.example.org"
            mode = "dns"
            "#,
        );

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let file = tempfile_with("not toml [");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    fn tempfile_with(content: &str) -> NamedTemp {
        let path = std::env::temp_dir().join(format!(
            "livecheck-config-test-{}-{:?}.toml",
            std::process::id(),
            std::thread::current().id()
        ));
        fs::write(&path, content).unwrap();
        NamedTemp { path }
    }

    /// Minimal self-cleaning temp file handle for these tests.
    struct NamedTemp {
        path: std::path::PathBuf,
    }

    impl NamedTemp {
        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for NamedTemp {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }
}
