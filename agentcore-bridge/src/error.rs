//! Bridge errors.

use thiserror::Error;

/// Errors raised by the code-acting execution bridge.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The executed code raised an uncaught error.
    #[error("execution failed: {message}")]
    ExecutionFailed {
        /// The interpreter's error text.
        message: String,
        /// The interpreter's stack trace, if one was captured.
        stack: Option<String>,
    },

    /// A top-level function identifier could not be recovered from the
    /// submitted code; the snippet cannot be registered.
    #[error("could not extract a function name from the submitted code")]
    FunctionNameExtractionFailed,

    /// A function table lookup found no snippet registered under that name.
    #[error("no function registered under name: {0}")]
    FunctionNotFound(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
