//! Error types shared by the primitives in this crate.
//!
//! Each downstream crate (tool registry, hooks, bridge, eval, ...)
//! defines its own error enum for its own domain; this crate only
//! owns the errors its own types can produce.

use thiserror::Error;

/// Errors from state-map operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateError {
    /// A compare-and-set or write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from configuration loading.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was missing.
    #[error("missing config field: {0}")]
    MissingField(String),

    /// A field had an invalid value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// What was wrong with it.
        message: String,
    },
}
