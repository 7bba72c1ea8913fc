//! Turn-orchestration errors.

use thiserror::Error;

/// Errors surfaced while running one turn.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TurnError {
    /// The model collaborator failed.
    #[error("model call failed: {0}")]
    ModelFailed(String),

    /// A tool call issued directly by a React-mode response failed to
    /// reach a tool at all (the tool's own failure is data, not an error).
    #[error(transparent)]
    Tool(#[from] agentcore_tool::ToolError),

    /// The code-acting bridge could not even start the requested
    /// snippet (unknown language, compile failure are reported inside
    /// the execution record instead).
    #[cfg(feature = "bridge")]
    #[error(transparent)]
    Bridge(#[from] agentcore_bridge::BridgeError),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
