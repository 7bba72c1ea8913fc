//! Learning-loop errors.

use thiserror::Error;

/// Errors from the learning trigger, extractor, and pool.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LearningError {
    /// The judge returned something that wasn't the expected JSON array.
    #[error("judge returned malformed output: {0}")]
    MalformedJudgeOutput(String),

    /// The judge collaborator itself failed.
    #[error("judge failed: {0}")]
    JudgeFailed(String),

    /// Persisting an extracted experience failed.
    #[error("failed to persist experience: {0}")]
    PersistFailed(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
