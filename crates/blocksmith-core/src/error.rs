//! Core error types for blocksmith-core.
//!
//! Per-task outcomes (no free slot, capacity limit) are recoverable and are
//! reported alongside successful assignments. Caller-level problems such as an
//! unparseable `now` timestamp are fatal and propagate through [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for blocksmith-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduling errors
    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Calendar collaborator errors
    #[error("Calendar error: {message}")]
    Calendar {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Calendar failure without an underlying source error.
    pub fn calendar(message: impl Into<String>) -> Self {
        CoreError::Calendar {
            message: message.into(),
            source: None,
        }
    }
}

/// Errors raised by the slot search and tier lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// The search horizon was exhausted without a free block.
    #[error("no optimal slot found in search period ({horizon_days} days)")]
    NoSlotAvailable { horizon_days: u32 },

    /// A task length that cannot be placed.
    #[error("task duration must be a positive number of minutes, got {minutes}")]
    InvalidDuration { minutes: i64 },

    /// A tier or quadrant name outside the known enumeration.
    #[error("unrecognized tier or quadrant: '{0}'")]
    UnrecognizedTier(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// A timestamp that could not be parsed
    #[error("Invalid timestamp '{value}': expected ISO-8601 date-time")]
    InvalidTimestamp { value: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
