//! Criterion configuration and results.

use agentcore_core::DurationMs;
use std::collections::HashMap;

/// The outcome status of a single criterion's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionStatus {
    /// The evaluator produced a value within its timeout.
    Success,
    /// The evaluator ran but judged the criterion failed.
    Failed,
    /// The suite was cancelled before this criterion started.
    Skipped,
    /// The evaluator did not finish within its timeout.
    Timeout,
    /// The evaluator raised an exception.
    Error,
}

/// One criterion's declared configuration within a suite.
#[derive(Debug, Clone)]
pub struct CriterionConfig {
    /// The criterion's unique name within the suite.
    pub name: String,
    /// Names of criteria that must complete before this one fires.
    pub dependencies: Vec<String>,
    /// Per-criterion timeout; falls back to the suite default if `None`.
    pub timeout_ms: Option<u64>,
    /// Opaque configuration bag passed to the evaluator.
    pub config: serde_json::Value,
}

impl CriterionConfig {
    /// A criterion with no declared dependencies, default timeout, and
    /// an empty config bag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            timeout_ms: None,
            config: serde_json::Value::Null,
        }
    }

    /// Declare dependencies on the given criterion names.
    pub fn depends_on(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies = names.into_iter().map(Into::into).collect();
        self
    }

    /// Override this criterion's timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Attach a config bag.
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }
}

/// The read-only context an evaluator sees: the evaluation's subject
/// plus whatever predecessor results its bindings name.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    /// Arbitrary context fields (turn id, user id, task description, ...).
    pub fields: HashMap<String, serde_json::Value>,
}

/// A single criterion's result: status, value, optional reasoning,
/// and wall-clock duration.
#[derive(Debug, Clone)]
pub struct CriterionResult {
    /// The outcome status.
    pub status: CriterionStatus,
    /// The evaluator's produced value, `None` on timeout/error/skip.
    pub value: Option<serde_json::Value>,
    /// Optional reasoning text the evaluator attached.
    pub reasoning: Option<String>,
    /// Wall-clock time spent running the evaluator.
    pub duration: DurationMs,
}

impl CriterionResult {
    /// A SKIPPED result with zero duration, used for not-yet-started
    /// criteria on suite cancellation.
    pub fn skipped() -> Self {
        Self {
            status: CriterionStatus::Skipped,
            value: None,
            reasoning: None,
            duration: DurationMs::ZERO,
        }
    }

    /// A TIMEOUT result.
    pub fn timeout(duration: DurationMs) -> Self {
        Self {
            status: CriterionStatus::Timeout,
            value: None,
            reasoning: None,
            duration,
        }
    }

    /// An ERROR result, carrying the exception message as reasoning.
    pub fn error(message: impl Into<String>, duration: DurationMs) -> Self {
        Self {
            status: CriterionStatus::Error,
            value: None,
            reasoning: Some(message.into()),
            duration,
        }
    }
}
