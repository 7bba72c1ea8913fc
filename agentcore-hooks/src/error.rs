//! Hook pipeline errors.

use thiserror::Error;

/// Errors a hook implementation may raise.
///
/// These are logged by the pipeline and never halt a turn — use a
/// jump target if a hook needs to redirect control flow.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook failed to produce an outcome.
    #[error("hook failed: {0}")]
    Failed(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
