//! Core error types for calm-core.
//!
//! A small hierarchy built with thiserror: input validation, configuration,
//! session log I/O and the user-initiated abort of a running session.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for calm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected user input or session parameters
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session was aborted before it completed
    #[error("Session interrupted")]
    Interrupted,

    /// Appending a record to the session log failed
    #[error("Failed to write session log {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Reading the session log failed
    #[error("Failed to read session log {path}: {source}")]
    LogRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, CoreError::Interrupted)
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

    /// Unknown dot-separated key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Cue offsets must never go backwards
    #[error("Cue {index} at {offset_secs}s is earlier than the cue before it")]
    UnorderedCue { index: usize, offset_secs: f64 },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
