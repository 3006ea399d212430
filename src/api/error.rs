//! API error types for the user directory client.

use thiserror::Error;

/// Errors that can occur when talking to the user directory API.
///
/// The UI treats every variant as a single "fetch failed" condition and only
/// shows the message; the variants exist so logs can tell them apart.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// What was being fetched.
        message: String,
    },

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The configured base URL is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        let message = match status.as_u16() {
            404 => format!("{} not found", context),
            500..=599 => format!("Server error while loading {}", context),
            _ => format!("Failed to load {}", context),
        };
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
impl ApiError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
