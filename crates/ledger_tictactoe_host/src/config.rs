//! Host configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use ledger_tictactoe::GameRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the reference host.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HostConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Stop replaying a script at the first rejected move.
    #[serde(default = "default_stop_on_error")]
    stop_on_error: bool,

    /// Bytes allocated per game account (at least [`GameRecord::LEN`]).
    #[serde(default = "default_account_space")]
    account_space: usize,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_stop_on_error() -> bool {
    true
}

fn default_account_space() -> usize {
    GameRecord::LEN
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            stop_on_error: default_stop_on_error(),
            account_space: default_account_space(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(account_space = config.account_space, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the account space can hold a record.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_space < GameRecord::LEN {
            return Err(ConfigError::new(format!(
                "account_space must be at least {} bytes, got {}",
                GameRecord::LEN,
                self.account_space
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = HostConfig::from_toml("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.log_filter(), "info");
        assert!(*config.stop_on_error());
        assert_eq!(*config.account_space(), GameRecord::LEN);
    }

    #[test]
    fn test_overrides() {
        let config = HostConfig::from_toml(
            r#"
            log_filter = "debug"
            stop_on_error = false
            account_space = 256
            "#,
        )
        .unwrap();
        assert_eq!(config.log_filter(), "debug");
        assert!(!*config.stop_on_error());
        assert_eq!(*config.account_space(), 256);
    }

    #[test]
    fn test_small_account_space_rejected() {
        let err = HostConfig::from_toml("account_space = 64").unwrap_err();
        assert!(err.message.contains("account_space"));
    }

    #[test]
    fn test_bad_toml_rejected() {
        let err = HostConfig::from_toml("stop_on_error = \"maybe\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
