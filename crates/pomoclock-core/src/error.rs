//! Core error types for pomoclock-core.
//!
//! Interval and sequence construction failures, rejected control commands
//! and configuration problems each get their own enum; [`CoreError`] wraps
//! them for callers that don't care which layer failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomoclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Interval, sequence or control errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the interval engine.
///
/// Construction errors are fatal to the construction call only. Control
/// errors leave the interval exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Blank name, zero duration, empty template list or zero speed
    #[error("Invalid value for '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// Factory given a kind tag it does not recognize
    #[error("Unknown interval kind: '{0}'")]
    UnknownKind(String),

    /// Operation is undefined for the interval's current state
    #[error("Cannot {operation} an interval that is {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },
}

impl TimerError {
    pub(crate) fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        TimerError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
