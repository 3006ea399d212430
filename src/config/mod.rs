//! Configuration management for LazyUsers.
//!
//! Settings are read from a TOML file in the platform configuration
//! directory. A missing file yields the defaults.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Name of the configuration file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("lazyusers").join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location.
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        let url = self.settings.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_base_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api_base_url '{}' must start with http:// or https://",
                url
            )));
        }
        if self.settings.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.settings.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_API_BASE_URL;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_parse_partial_settings() {
        let config = Config::parse(
            r#"
            [settings]
            api_base_url = "http://localhost:3000"
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.api_base_url, "http://localhost:3000");
        assert_eq!(config.settings.tick_rate_ms, 100);
    }

    #[test]
    fn test_parse_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_rejects_bad_url() {
        let err = Config::parse(
            r#"
            [settings]
            api_base_url = "ftp://example.com"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_rejects_zero_timeout() {
        let err = Config::parse(
            r#"
            [settings]
            request_timeout_secs = 0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        let err = Config::parse("[settings\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\ntick_rate_ms = 50").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.settings.tick_rate_ms, 50);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("lazyusers/config.toml"));
        }
    }
}
