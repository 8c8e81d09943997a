//! Application settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::ui::views::view_names;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// View shown at startup.
    pub default_view: String,
    /// Auto-refresh period of the active view; 0 disables it.
    pub refresh_interval_secs: u64,
    /// Maximum gap between the two keys of `gg` and `dd`.
    pub chord_timeout_ms: u64,
    /// Palette suggestion cap.
    pub max_suggestions: usize,
    /// Timeout for each background request.
    pub request_timeout_secs: u64,
    /// Event poll interval.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_view: "dashboard".to_string(),
            refresh_interval_secs: 30,
            chord_timeout_ms: 500,
            max_suggestions: 10,
            request_timeout_secs: 30,
            tick_rate_ms: 100,
        }
    }
}

impl Settings {
    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        if !view_names().any(|name| name == self.default_view) {
            return Err(ConfigError::ValidationError(format!(
                "default_view '{}' is not a known view",
                self.default_view
            )));
        }
        if self.chord_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "chord_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_suggestions == 0 {
            return Err(ConfigError::ValidationError(
                "max_suggestions must be greater than zero".to_string(),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chord_window(&self) -> Duration {
        Duration::from_millis(self.chord_timeout_ms)
    }

    /// `None` when auto refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.chord_window(), Duration::from_millis(500));
        assert_eq!(settings.refresh_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_refresh_disables() {
        let settings = Settings {
            refresh_interval_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.refresh_interval(), None);
    }

    #[test]
    fn test_zero_values_rejected() {
        for settings in [
            Settings {
                chord_timeout_ms: 0,
                ..Settings::default()
            },
            Settings {
                max_suggestions: 0,
                ..Settings::default()
            },
            Settings {
                tick_rate_ms: 0,
                ..Settings::default()
            },
        ] {
            assert!(matches!(
                settings.validate(),
                Err(ConfigError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_unknown_default_view() {
        let settings = Settings {
            default_view: "calendar".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
