//! Configuration for the logging bootstrap

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that disables file logging when set to "no"
pub const WRITE_LOGS_ENV: &str = "LOGKEEPER_WRITE_LOGS";

/// Logging bootstrap configuration
///
/// Supplied once at startup and immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory under which a `Logs` subdirectory holds log files.
    /// When `None`, file logging is skipped entirely.
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Console verbosity: debug-and-above when true, warning-and-above when false
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_verbose() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            home: None,
            verbose: default_verbose(),
        }
    }
}

impl LoggingConfig {
    /// Load configuration from a TOML file, or return default if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read logging config file")?;
            toml::from_str(&content).context("Failed to parse logging config file")
        } else {
            Ok(Self::default())
        }
    }
}

/// Try to get the default home directory for log storage (~/.logkeeper)
pub fn default_home() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".logkeeper"))
}

/// Check whether file logging is enabled
///
/// File logging is on unless the opt-out variable is set to the literal "no";
/// any other value, including unset, enables it.
pub fn file_logging_enabled() -> bool {
    env::var(WRITE_LOGS_ENV).map(|v| v != "no").unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert!(config.home.is_none());
        assert!(config.verbose);
    }

    #[test]
    fn test_config_serialization() {
        let config = LoggingConfig {
            home: Some(PathBuf::from("/var/lib/app")),
            verbose: false,
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: LoggingConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let parsed: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, LoggingConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let config = LoggingConfig::load(std::path::Path::new(
            "/nonexistent/path/for/testing/logging.toml",
        ))
        .unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "home = \"/tmp/app\"\nverbose = false\n").unwrap();

        let config = LoggingConfig::load(&path).unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/tmp/app")));
        assert!(!config.verbose);
    }

    #[test]
    fn test_default_home_ends_with_logkeeper() {
        // May be None on systems without a home dir; must not panic either way
        if let Some(path) = default_home() {
            assert!(path.ends_with(".logkeeper"));
        }
    }
}
