//! Experience store errors.

use thiserror::Error;

/// Errors from experience store operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExperienceError {
    /// No experience exists under the requested id.
    #[error("experience not found: {0}")]
    NotFound(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
