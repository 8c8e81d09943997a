//! Centralized error types for mailboard.
//!
//! Module errors are aggregated here with user-facing messages. Worker
//! failures never reach this type: they travel as strings inside
//! `ApiMessage` and surface as notifications.

use thiserror::Error;

use crate::commands::RegistryError;
use crate::config::ConfigError;
use crate::navigation::NavigationError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The command table is inconsistent.
    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or restore failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// A message suitable for showing in the UI.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Set MAILBOARD_CONFIG or use --config."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Registry(e) => format!("Command table error: {}", e),
            AppError::Navigation(NavigationError::UnknownView(name)) => {
                format!("No view named '{}'.", name)
            }
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }
}
