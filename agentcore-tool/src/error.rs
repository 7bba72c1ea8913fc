//! Errors from tool registration, lookup, and execution.

use thiserror::Error;

/// Errors from tool registry operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found in the registry.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Registration was attempted with a blank name.
    #[error("tool name must not be blank")]
    BlankName,

    /// Registration was attempted under a name already present in the registry.
    #[error("tool already registered: {0}")]
    DuplicateName(String),

    /// The input provided to the tool failed validation against its parameter tree.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Tool execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
