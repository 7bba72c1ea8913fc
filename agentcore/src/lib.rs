#![deny(missing_docs)]
//! # agentcore — umbrella crate
//!
//! A single import surface for the agentcore runtime: the tool
//! registry and schema observer (C1), the code-acting execution
//! bridge (C2), the hook pipeline and prompt contributors (C3), the
//! evaluation DAG (C4), the learning loop (C5), and the experience
//! store (C6). Re-exports each component behind a feature flag, plus
//! a `prelude` for the happy path, and wires them together into the
//! turn control flow in [`turn`].

pub mod error;
pub mod turn;

pub use agentcore_core;
pub use agentcore_tool;
#[cfg(feature = "bridge")]
pub use agentcore_bridge;
#[cfg(feature = "eval")]
pub use agentcore_eval;
#[cfg(feature = "experience")]
pub use agentcore_experience;
#[cfg(feature = "hooks")]
pub use agentcore_hooks;
#[cfg(feature = "learning")]
pub use agentcore_learning;

pub use error::TurnError;
pub use turn::{AgentRuntime, ModelProvider, ModelResponse, ToolCallRequest, DEFAULT_MAX_ITERATIONS};

/// Happy-path imports for composing an agentcore runtime.
pub mod prelude {
    pub use agentcore_core::{Config, DurationMs, InMemoryState, StateMap};
    pub use agentcore_tool::{ToolDef, ToolDyn, ToolError, ToolRegistry};

    #[cfg(feature = "bridge")]
    pub use agentcore_bridge::{CodeBridge, CodeExecutor, ExecutionRecord};

    #[cfg(feature = "eval")]
    pub use agentcore_eval::{Dag, EvaluationEngine, Evaluator, Suite};

    #[cfg(feature = "experience")]
    pub use agentcore_experience::{Experience, ExperienceStore, InMemoryExperienceStore};

    #[cfg(feature = "hooks")]
    pub use agentcore_hooks::{Hook, HookOutcome, HookPipeline, HookPoint};

    #[cfg(feature = "learning")]
    pub use agentcore_learning::{DefaultLearningStrategy, Judge, LearningEngine};

    pub use crate::turn::{AgentRuntime, ModelProvider, ModelResponse, ToolCallRequest};
}
