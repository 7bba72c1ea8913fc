//! Dispatches hooks at a [`HookPoint`] in registration order, writing
//! each hook's updates through to the turn's state map before the
//! next hook runs.

use crate::hook::{Hook, HookPoint};
use agentcore_core::{Config, StateMap};
use std::sync::Arc;

/// A turn's registered hooks, dispatched by position.
#[derive(Default)]
pub struct HookPipeline {
    hooks: Vec<Arc<dyn Hook>>,
}

impl HookPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Hooks run in registration order at each
    /// position they declare.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    /// Run every hook registered at `point`, in registration order.
    ///
    /// Each hook's updates are applied to `state` immediately after it
    /// returns, so later hooks at the same point observe earlier
    /// hooks' writes. Returns the first honored jump label, if any —
    /// dispatch does not stop early on a jump; callers interpret the
    /// label after the full pass completes.
    pub async fn dispatch(
        &self,
        point: HookPoint,
        state: &dyn StateMap,
        config: &Config,
    ) -> Option<String> {
        let mut jump = None;
        for hook in &self.hooks {
            if !hook.points().contains(&point) {
                continue;
            }
            let outcome = match hook.invoke(state, config).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(hook = hook.name(), error = %err, "hook failed, skipping");
                    continue;
                }
            };
            for (key, value) in outcome.updates {
                state.set(&key, value);
            }
            if let Some(label) = outcome.jump_to {
                if hook.allowed_jumps().iter().any(|allowed| allowed == &label) {
                    jump = Some(label);
                } else {
                    tracing::warn!(
                        hook = hook.name(),
                        label = %label,
                        "hook requested a jump outside its allow-list, ignoring"
                    );
                }
            }
        }
        jump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use crate::hook::HookOutcome;
    use agentcore_core::InMemoryState;
    use async_trait::async_trait;
    use serde_json::json;

    struct WriteX;
    #[async_trait]
    impl Hook for WriteX {
        fn name(&self) -> &str {
            "write_x"
        }
        fn points(&self) -> &[HookPoint] {
            &[HookPoint::BeforeAgent]
        }
        async fn invoke(&self, _state: &dyn StateMap, _config: &Config) -> Result<HookOutcome, HookError> {
            let mut outcome = HookOutcome::none();
            outcome.updates.insert("x".into(), json!(1));
            Ok(outcome)
        }
    }

    struct WriteYFromX;
    #[async_trait]
    impl Hook for WriteYFromX {
        fn name(&self) -> &str {
            "write_y_from_x"
        }
        fn points(&self) -> &[HookPoint] {
            &[HookPoint::BeforeAgent]
        }
        async fn invoke(&self, state: &dyn StateMap, _config: &Config) -> Result<HookOutcome, HookError> {
            let x = state.get("x").and_then(|v| v.as_i64()).unwrap_or(0);
            let mut outcome = HookOutcome::none();
            outcome.updates.insert("y".into(), json!(x + 1));
            Ok(outcome)
        }
    }

    #[tokio::test]
    async fn scenario_hook_ordering_and_state_write_through() {
        let config = Config::default();
        let state = InMemoryState::new();
        let mut pipeline = HookPipeline::new();
        pipeline.add(Arc::new(WriteX));
        pipeline.add(Arc::new(WriteYFromX));
        pipeline.dispatch(HookPoint::BeforeAgent, &state, &config).await;
        assert_eq!(state.get("x"), Some(json!(1)));
        assert_eq!(state.get("y"), Some(json!(2)));
    }

    #[tokio::test]
    async fn reversing_registration_order_changes_the_dependent_write() {
        let config = Config::default();
        let state = InMemoryState::new();
        let mut pipeline = HookPipeline::new();
        pipeline.add(Arc::new(WriteYFromX));
        pipeline.add(Arc::new(WriteX));
        pipeline.dispatch(HookPoint::BeforeAgent, &state, &config).await;
        assert_eq!(state.get("x"), Some(json!(1)));
        assert_eq!(state.get("y"), Some(json!(1)));
    }

    struct Failing;
    #[async_trait]
    impl Hook for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn points(&self) -> &[HookPoint] {
            &[HookPoint::AfterAgent]
        }
        async fn invoke(&self, _state: &dyn StateMap, _config: &Config) -> Result<HookOutcome, HookError> {
            Err(HookError::Failed("boom".into()))
        }
    }

    #[tokio::test]
    async fn a_failing_hook_does_not_halt_dispatch() {
        let config = Config::default();
        let state = InMemoryState::new();
        let mut pipeline = HookPipeline::new();
        pipeline.add(Arc::new(Failing));
        pipeline.add(Arc::new(WriteX));
        let jump = pipeline.dispatch(HookPoint::AfterAgent, &state, &config).await;
        assert!(jump.is_none());
    }

    struct JumpOutsideAllowList;
    #[async_trait]
    impl Hook for JumpOutsideAllowList {
        fn name(&self) -> &str {
            "jumper"
        }
        fn points(&self) -> &[HookPoint] {
            &[HookPoint::BeforeModel]
        }
        async fn invoke(&self, _state: &dyn StateMap, _config: &Config) -> Result<HookOutcome, HookError> {
            Ok(HookOutcome {
                updates: Default::default(),
                jump_to: Some("retry".into()),
            })
        }
    }

    #[tokio::test]
    async fn a_jump_outside_the_allow_list_is_ignored() {
        let config = Config::default();
        let state = InMemoryState::new();
        let mut pipeline = HookPipeline::new();
        pipeline.add(Arc::new(JumpOutsideAllowList));
        let jump = pipeline.dispatch(HookPoint::BeforeModel, &state, &config).await;
        assert!(jump.is_none());
    }
}
