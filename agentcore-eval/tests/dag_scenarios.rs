use agentcore_eval::{
    CriterionConfig, CriterionResult, CriterionStatus, Dag, EvalError, EvaluationContext,
    EvaluationEngine, Evaluator, EvaluatorOutcome, Suite,
};
use async_trait::async_trait;
use agentcore_core::SuiteId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

struct TimestampingEvaluator {
    start_times: Arc<Mutex<HashMap<String, Instant>>>,
    end_times: Arc<Mutex<HashMap<String, Instant>>>,
    sleep_ms: u64,
}

#[async_trait]
impl Evaluator for TimestampingEvaluator {
    async fn evaluate(
        &self,
        _ctx: &EvaluationContext,
        _predecessor_results: &HashMap<String, CriterionResult>,
        config: &serde_json::Value,
    ) -> Result<EvaluatorOutcome, EvalError> {
        let name = config.get("name").unwrap().as_str().unwrap().to_string();
        self.start_times.lock().unwrap().insert(name.clone(), Instant::now());
        if self.sleep_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.sleep_ms)).await;
        }
        self.end_times.lock().unwrap().insert(name, Instant::now());
        Ok(EvaluatorOutcome::pass())
    }
}

#[tokio::test]
async fn scenario_dag_with_fan_out() {
    let start_times = Arc::new(Mutex::new(HashMap::new()));
    let end_times = Arc::new(Mutex::new(HashMap::new()));

    let suite = Suite {
        id: SuiteId::new("fan-out"),
        criteria: vec![
            CriterionConfig::new("A").with_timeout_ms(5000).with_config(serde_json::json!({"name": "A"})),
            CriterionConfig::new("B").depends_on(["A"]).with_timeout_ms(5000).with_config(serde_json::json!({"name": "B"})),
            CriterionConfig::new("C").depends_on(["A"]).with_timeout_ms(5000).with_config(serde_json::json!({"name": "C"})),
        ],
        default_timeout_ms: 5000,
    };
    let dag = Dag::compile(&suite).unwrap();

    let mut evaluators: HashMap<String, Arc<dyn Evaluator>> = HashMap::new();
    for name in ["A", "B", "C"] {
        evaluators.insert(
            name.to_string(),
            Arc::new(TimestampingEvaluator {
                start_times: start_times.clone(),
                end_times: end_times.clone(),
                sleep_ms: 20,
            }),
        );
    }

    let engine = EvaluationEngine::new(4);
    let result = engine
        .run(&dag, &evaluators, &EvaluationContext::default(), CancellationToken::new())
        .await;

    assert!(result.results.contains_key("A"));
    assert!(result.results.contains_key("B"));
    assert!(result.results.contains_key("C"));

    let starts = start_times.lock().unwrap();
    let ends = end_times.lock().unwrap();
    assert!(ends["A"] <= starts["B"]);
    assert!(ends["A"] <= starts["C"]);
    assert!(result.ended_at >= result.started_at);
}

struct SlowEvaluator {
    sleep_ms: u64,
}

#[async_trait]
impl Evaluator for SlowEvaluator {
    async fn evaluate(
        &self,
        _ctx: &EvaluationContext,
        _predecessor_results: &HashMap<String, CriterionResult>,
        _config: &serde_json::Value,
    ) -> Result<EvaluatorOutcome, EvalError> {
        tokio::time::sleep(std::time::Duration::from_millis(self.sleep_ms)).await;
        Ok(EvaluatorOutcome::pass())
    }
}

#[tokio::test]
async fn scenario_criterion_timeout_isolation() {
    let suite = Suite {
        id: SuiteId::new("timeout"),
        criteria: vec![
            CriterionConfig::new("A").with_timeout_ms(200),
            CriterionConfig::new("B").with_timeout_ms(20),
        ],
        default_timeout_ms: 200,
    };
    let dag = Dag::compile(&suite).unwrap();

    let mut evaluators: HashMap<String, Arc<dyn Evaluator>> = HashMap::new();
    evaluators.insert("A".into(), Arc::new(SlowEvaluator { sleep_ms: 1 }));
    evaluators.insert("B".into(), Arc::new(SlowEvaluator { sleep_ms: 200 }));

    let engine = EvaluationEngine::new(4);
    let result = engine
        .run(&dag, &evaluators, &EvaluationContext::default(), CancellationToken::new())
        .await;

    assert_eq!(result.results["A"].status, CriterionStatus::Success);
    assert_eq!(result.results["B"].status, CriterionStatus::Timeout);
    assert_eq!(result.statistics.success_count, 1);
    assert_eq!(result.statistics.timeout_count, 1);
    assert_eq!(result.statistics.total, 2);
}

#[tokio::test]
async fn scenario_cancellation_aborts_an_in_flight_criterion() {
    let suite = Suite {
        id: SuiteId::new("cancel-mid-flight"),
        criteria: vec![CriterionConfig::new("A").with_timeout_ms(5000)],
        default_timeout_ms: 5000,
    };
    let dag = Dag::compile(&suite).unwrap();

    let mut evaluators: HashMap<String, Arc<dyn Evaluator>> = HashMap::new();
    evaluators.insert("A".into(), Arc::new(SlowEvaluator { sleep_ms: 5000 }));

    let cancellation = CancellationToken::new();
    let engine = EvaluationEngine::new(4);

    let cancel_after = cancellation.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        cancel_after.cancel();
    });

    let started = Instant::now();
    let result = engine
        .run(&dag, &evaluators, &EvaluationContext::default(), cancellation)
        .await;
    let elapsed = started.elapsed();

    assert_eq!(result.results["A"].status, CriterionStatus::Skipped);
    assert_eq!(result.statistics.skipped_count, 1);
    assert!(
        elapsed < std::time::Duration::from_millis(5000),
        "cancellation should abort the in-flight criterion well before its 5s sleep completes, took {elapsed:?}"
    );
}
