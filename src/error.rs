//! Centralized error types for LazyUsers.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, terminal, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A navigation path could not be understood.
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Fetch failures keep the underlying message text so the user sees what
    /// went wrong; the kind of failure is not otherwise distinguished.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Using defaults.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Using defaults.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Using defaults.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => e.to_string(),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::InvalidRoute(path) => format!("Invalid route: {}", path),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
