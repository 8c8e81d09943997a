//! Configuration management for mailboard.
//!
//! Settings are read from a TOML file. A missing file is not an error: the
//! defaults apply.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MAILBOARD_CONFIG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load from `MAILBOARD_CONFIG` or the default path.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.settings.validate()?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Config file location: `MAILBOARD_CONFIG` when set, else
    /// `<config dir>/mailboard/config.toml`.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("mailboard").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let file = write_config("[settings]\ndefault_view = \"messages\"\nchord_timeout_ms = 300\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.settings.default_view, "messages");
        assert_eq!(config.settings.chord_timeout_ms, 300);
        assert_eq!(config.settings.max_suggestions, 10);
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[settings\n");
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let file = write_config("[settings]\ndefault_view = \"calendar\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("calendar"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_path() {
        std::env::set_var(CONFIG_ENV, "/tmp/mailboard-test.toml");
        let path = Config::path().unwrap();
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(path, PathBuf::from("/tmp/mailboard-test.toml"));
    }

    #[test]
    #[serial]
    fn test_default_path_ends_with_app_dir() {
        std::env::remove_var(CONFIG_ENV);
        if let Ok(path) = Config::path() {
            assert!(path.ends_with("mailboard/config.toml"));
        }
    }
}
