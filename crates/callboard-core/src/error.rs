//! Error types for callboard-core
//!
//! `ApiError` normalizes every way a backend call can fail into one value that
//! carries the endpoint name. `CoreError` covers the rest of the core.

use crate::session::ViewId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single API call
///
/// The fetch coordinator never matches on `kind`; it only keeps the
/// rendered message for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{endpoint}: {kind}")]
pub struct ApiError {
    /// Name of the endpoint that failed (e.g. "daily analytics")
    pub endpoint: &'static str,
    pub kind: ApiErrorKind,
}

impl ApiError {
    pub fn transport(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self {
            endpoint,
            kind: ApiErrorKind::Transport {
                message: message.into(),
            },
        }
    }

    pub fn http_status(endpoint: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self {
            endpoint,
            kind: ApiErrorKind::HttpStatus {
                status,
                message: message.into(),
            },
        }
    }

    pub fn decode(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self {
            endpoint,
            kind: ApiErrorKind::Decode {
                message: message.into(),
            },
        }
    }
}

/// What went wrong during an API call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Network, DNS or connection failure
    #[error("network error: {message}")]
    Transport { message: String },

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Body was not valid JSON or did not match the expected schema
    #[error("invalid response: {message}")]
    Decode { message: String },
}

/// Core error type for callboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Polling
    // ===================
    #[error("Poll session already running for view {view}")]
    PollSessionExists { view: ViewId },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // ===================
    // Settings
    // ===================
    #[error("Failed to write settings to {path}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_names_endpoint() {
        let err = ApiError::http_status("calls list", 500, "Internal Server Error");
        assert_eq!(err.to_string(), "calls list: HTTP 500: Internal Server Error");

        let err = ApiError::transport("analytics summary", "connection refused");
        assert_eq!(
            err.to_string(),
            "analytics summary: network error: connection refused"
        );
    }

    #[test]
    fn test_poll_session_exists_display() {
        let err = CoreError::PollSessionExists {
            view: ViewId::Dashboard,
        };
        assert_eq!(
            err.to_string(),
            "Poll session already running for view dashboard"
        );
    }
}
