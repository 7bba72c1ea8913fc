//! Evaluation DAG errors.

use thiserror::Error;

/// Errors raised compiling or running an evaluation suite.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EvalError {
    /// Compiling the suite's criteria into a DAG found a cycle.
    #[error("cycle detected in evaluation suite involving: {0}")]
    CycleDetected(String),

    /// A criterion declared a dependency on a name with no matching criterion.
    #[error("unknown dependency: {0}")]
    UnknownDependency(String),

    /// No evaluator was registered for a criterion the suite names.
    #[error("no evaluator registered for criterion: {0}")]
    NoEvaluator(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
