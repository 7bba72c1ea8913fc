//! Bounded-parallel execution of a compiled [`Dag`].
//!
//! Each criterion is a tokio task that waits for its predecessors'
//! results (published over a `watch` channel), acquires a permit from
//! the shared worker-pool semaphore, then runs its evaluator under a
//! per-criterion timeout.

use crate::criterion::{CriterionResult, CriterionStatus, EvaluationContext};
use crate::dag::Dag;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use agentcore_core::DurationMs;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::{watch, Semaphore};
use tokio_util::sync::CancellationToken;

/// Counts of criteria by terminal status, plus the total criterion count.
#[derive(Debug, Clone, Copy, Default)]
pub struct Statistics {
    /// Total criteria in the suite.
    pub total: usize,
    /// Criteria that completed with status SUCCESS.
    pub success_count: usize,
    /// Criteria that completed with status FAILED.
    pub failed_count: usize,
    /// Criteria that completed with status SKIPPED.
    pub skipped_count: usize,
    /// Criteria that completed with status TIMEOUT.
    pub timeout_count: usize,
    /// Criteria that completed with status ERROR.
    pub error_count: usize,
}

/// The drained suite's full result set.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// Every criterion's result, keyed by criterion name.
    pub results: HashMap<String, CriterionResult>,
    /// Status counts across the suite.
    pub statistics: Statistics,
    /// Epoch-millis timestamp when the suite started.
    pub started_at: i64,
    /// Epoch-millis timestamp set exactly once, after every criterion
    /// has completed (successfully or not).
    pub ended_at: i64,
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Runs a compiled DAG with a fixed-size worker pool shared across
/// every parallel fan-out point in the graph.
pub struct EvaluationEngine {
    pool_size: usize,
}

impl EvaluationEngine {
    /// Build an engine bounded to `pool_size` concurrent criterion evaluations.
    pub fn new(pool_size: usize) -> Self {
        Self { pool_size: pool_size.max(1) }
    }

    /// Run every criterion in `dag`, respecting dependency order and
    /// the configured concurrency bound. Missing evaluators are
    /// logged and recorded as status ERROR rather than failing the
    /// whole suite.
    pub async fn run(
        &self,
        dag: &Dag,
        evaluators: &HashMap<String, Arc<dyn Evaluator>>,
        ctx: &EvaluationContext,
        cancellation: CancellationToken,
    ) -> EvaluationResult {
        let started_at = now_millis();
        let semaphore = Arc::new(Semaphore::new(self.pool_size));

        let mut senders: HashMap<String, watch::Sender<Option<CriterionResult>>> = HashMap::new();
        let mut receivers: HashMap<String, watch::Receiver<Option<CriterionResult>>> = HashMap::new();
        for name in dag.nodes.keys() {
            let (tx, rx) = watch::channel(None);
            senders.insert(name.clone(), tx);
            receivers.insert(name.clone(), rx);
        }

        let mut join_set = tokio::task::JoinSet::new();
        for (name, config) in dag.nodes.clone() {
            let dep_rxs: Vec<(String, watch::Receiver<Option<CriterionResult>>)> = config
                .dependencies
                .iter()
                .map(|dep| (dep.clone(), receivers.get(dep).unwrap().clone()))
                .collect();
            let tx = senders.remove(&name).unwrap();
            let evaluator = evaluators.get(&name).cloned();
            let semaphore = semaphore.clone();
            let cancellation = cancellation.clone();
            let ctx = ctx.clone();
            let timeout_ms = config.timeout_ms.unwrap_or(dag.default_timeout_ms);

            join_set.spawn(async move {
                let mut predecessor_results = HashMap::new();
                for (dep, mut rx) in dep_rxs {
                    if rx.wait_for(|v| v.is_some()).await.is_err() {
                        let result = CriterionResult::skipped();
                        let _ = tx.send(Some(result.clone()));
                        return (name, result);
                    }
                    let value = rx.borrow().clone().unwrap();
                    predecessor_results.insert(format!("{dep}_result"), value);
                }

                if cancellation.is_cancelled() {
                    let result = CriterionResult::skipped();
                    let _ = tx.send(Some(result.clone()));
                    return (name, result);
                }

                let permit = tokio::select! {
                    permit = semaphore.acquire_owned() => permit.ok(),
                    _ = cancellation.cancelled() => None,
                };
                let Some(_permit) = permit else {
                    let result = CriterionResult::skipped();
                    let _ = tx.send(Some(result.clone()));
                    return (name, result);
                };

                let start = Instant::now();
                let result = match evaluator {
                    None => {
                        tracing::warn!(criterion = name.as_str(), "no evaluator registered, recording ERROR");
                        CriterionResult::error(
                            EvalError::NoEvaluator(name.clone()).to_string(),
                            DurationMs::from(start.elapsed()),
                        )
                    }
                    Some(evaluator) => {
                        let fut = evaluator.evaluate(&ctx, &predecessor_results, &config.config);
                        tokio::select! {
                            biased;
                            _ = cancellation.cancelled() => CriterionResult::skipped(),
                            outcome = tokio::time::timeout(Duration::from_millis(timeout_ms), fut) => {
                                match outcome {
                                    Err(_) => CriterionResult::timeout(DurationMs::from(start.elapsed())),
                                    Ok(Err(err)) => {
                                        CriterionResult::error(err.to_string(), DurationMs::from(start.elapsed()))
                                    }
                                    Ok(Ok(outcome)) => CriterionResult {
                                        status: if outcome.passed {
                                            CriterionStatus::Success
                                        } else {
                                            CriterionStatus::Failed
                                        },
                                        value: outcome.value,
                                        reasoning: outcome.reasoning,
                                        duration: DurationMs::from(start.elapsed()),
                                    },
                                }
                            }
                        }
                    }
                };

                let _ = tx.send(Some(result.clone()));
                (name, result)
            });
        }

        let mut results = HashMap::new();
        let mut statistics = Statistics {
            total: dag.nodes.len(),
            ..Default::default()
        };
        while let Some(joined) = join_set.join_next().await {
            let Ok((name, result)) = joined else {
                continue;
            };
            match result.status {
                CriterionStatus::Success => statistics.success_count += 1,
                CriterionStatus::Failed => statistics.failed_count += 1,
                CriterionStatus::Skipped => statistics.skipped_count += 1,
                CriterionStatus::Timeout => statistics.timeout_count += 1,
                CriterionStatus::Error => statistics.error_count += 1,
            }
            results.insert(name, result);
        }

        EvaluationResult {
            results,
            statistics,
            started_at,
            ended_at: now_millis(),
        }
    }
}
