#![deny(missing_docs)]
//! The evaluation DAG.
//!
//! Compiles a suite's criteria into a dependency graph (with a
//! synthetic START and compile-time cycle rejection), then drains it
//! with a bounded worker pool shared across every parallel fan-out
//! point.

pub mod criterion;
pub mod dag;
pub mod engine;
pub mod error;
pub mod evaluator;

pub use criterion::{CriterionConfig, CriterionResult, CriterionStatus, EvaluationContext};
pub use dag::{Dag, Suite};
pub use engine::{EvaluationEngine, EvaluationResult, Statistics};
pub use error::EvalError;
pub use evaluator::{Evaluator, EvaluatorOutcome};
