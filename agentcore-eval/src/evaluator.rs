//! The per-criterion evaluator contract.

use crate::criterion::{CriterionResult, EvaluationContext};
use crate::error::EvalError;
use async_trait::async_trait;
use std::collections::HashMap;

/// What an evaluator decided, before the DAG stamps status/duration
/// around it (SUCCESS/FAILED are the evaluator's call; TIMEOUT/ERROR
/// are the DAG's).
#[derive(Debug, Clone)]
pub struct EvaluatorOutcome {
    /// Whether the criterion passed.
    pub passed: bool,
    /// The produced value, if any.
    pub value: Option<serde_json::Value>,
    /// Optional reasoning text.
    pub reasoning: Option<String>,
}

impl EvaluatorOutcome {
    /// A passing outcome with no value or reasoning.
    pub fn pass() -> Self {
        Self {
            passed: true,
            value: None,
            reasoning: None,
        }
    }

    /// A failing outcome with no value or reasoning.
    pub fn fail() -> Self {
        Self {
            passed: false,
            value: None,
            reasoning: None,
        }
    }

    /// Attach a value.
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach reasoning text.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// Judges a single criterion given the evaluation context and its
/// predecessors' results (keyed by `<predecessor_name>_result`).
///
/// An evaluator that suspends (network I/O, an LLM judge call) is
/// expected — the DAG awaits it under a per-criterion timeout and
/// converts an uncaught error to status ERROR.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Run this criterion's judgment.
    async fn evaluate(
        &self,
        ctx: &EvaluationContext,
        predecessor_results: &HashMap<String, CriterionResult>,
        config: &serde_json::Value,
    ) -> Result<EvaluatorOutcome, EvalError>;
}
