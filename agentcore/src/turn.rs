//! Turn control flow: the loop described in the system overview, wired
//! from the registry/hooks/bridge/learning crates.
//!
//! The chat-completion provider is an external collaborator and out of
//! scope here; [`ModelProvider`] is the trait boundary a real provider
//! implements, exactly as [`agentcore_bridge::CodeExecutor`] stands in
//! for the embedded interpreter.

use crate::error::TurnError;
use agentcore_core::{Config, StateMap};
use agentcore_hooks::{HookPipeline, PromptContribution, PromptContributorManager};
use agentcore_tool::ToolRegistry;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "bridge")]
use agentcore_bridge::{CodeBridge, CodeExecutor};

#[cfg(feature = "learning")]
use agentcore_learning::{LearningEngine, LearningStrategy, LearningTriggerContext, ToolCallTrace};
#[cfg(feature = "learning")]
use agentcore_learning::Judge;

/// A single requested tool invocation, as returned by a React-mode model turn.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    /// The tool's registered name.
    pub name: String,
    /// The call's JSON arguments.
    pub arguments: Value,
}

/// What the model returned for one step of the turn.
#[derive(Debug, Clone)]
pub enum ModelResponse {
    /// React mode: the model wants these tools called.
    ToolCalls(Vec<ToolCallRequest>),
    /// CodeAct mode: the model wrote a program to run.
    Code {
        /// The snippet's source language (e.g. `"python"`).
        language: String,
        /// The snippet's source text.
        source: String,
        /// Arguments for the snippet's top-level function call.
        args: Value,
    },
    /// The model is done; this is the turn's final reply.
    FinalReply(String),
}

/// The external chat-completion collaborator.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Produce the next step given the turn's state and the system
    /// prompt text assembled by prompt contributors.
    async fn complete(
        &self,
        state: &dyn StateMap,
        contribution: &PromptContribution,
    ) -> Result<ModelResponse, TurnError>;
}

/// The maximum number of React/CodeAct loop iterations before the turn
/// is forced to stop. Guards against a model that never emits a final reply.
pub const DEFAULT_MAX_ITERATIONS: usize = 25;

/// Ties the registry, hook pipeline, prompt contributors, code bridge,
/// and model provider into the control flow from the system overview.
pub struct AgentRuntime {
    tools: Arc<ToolRegistry>,
    hooks: HookPipeline,
    prompt_contributors: PromptContributorManager,
    model: Arc<dyn ModelProvider>,
    #[cfg(feature = "bridge")]
    bridge: Option<CodeBridge>,
    max_iterations: usize,
}

impl AgentRuntime {
    /// Build a runtime around a tool registry and a model collaborator.
    pub fn new(tools: Arc<ToolRegistry>, model: Arc<dyn ModelProvider>) -> Self {
        Self {
            tools,
            hooks: HookPipeline::new(),
            prompt_contributors: PromptContributorManager::new(),
            model,
            #[cfg(feature = "bridge")]
            bridge: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// The hook pipeline, for registering hooks before running turns.
    pub fn hooks_mut(&mut self) -> &mut HookPipeline {
        &mut self.hooks
    }

    /// The prompt-contributor manager, for registering contributors
    /// before running turns.
    pub fn prompt_contributors_mut(&mut self) -> &mut PromptContributorManager {
        &mut self.prompt_contributors
    }

    /// Enable CodeAct mode with the given code executor.
    #[cfg(feature = "bridge")]
    pub fn with_code_executor(mut self, executor: impl CodeExecutor + 'static) -> Self {
        self.bridge = Some(CodeBridge::new(Arc::clone(&self.tools), Arc::new(executor)));
        self
    }

    /// Cap the number of React/CodeAct iterations per turn.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run one full turn against `state`: BEFORE_AGENT hooks, the
    /// React/CodeAct loop, then AFTER_AGENT hooks. Returns the turn's
    /// final reply text.
    pub async fn run_turn(&self, state: &dyn StateMap, config: &Config) -> Result<String, TurnError> {
        self.hooks
            .dispatch(agentcore_hooks::HookPoint::BeforeAgent, state, config)
            .await;

        let mut final_reply = String::new();
        for _ in 0..self.max_iterations {
            self.hooks
                .dispatch(agentcore_hooks::HookPoint::BeforeModel, state, config)
                .await;
            let contribution = self.prompt_contributors.aggregate(state);

            let response = self.model.complete(state, &contribution).await?;

            match response {
                ModelResponse::ToolCalls(calls) => {
                    self.run_tool_calls(calls, state).await?;
                }
                ModelResponse::Code { language, source, args } => {
                    self.run_code(&language, &source, args, state).await?;
                }
                ModelResponse::FinalReply(reply) => {
                    final_reply = reply;
                    self.hooks
                        .dispatch(agentcore_hooks::HookPoint::AfterModel, state, config)
                        .await;
                    break;
                }
            }

            self.hooks
                .dispatch(agentcore_hooks::HookPoint::AfterModel, state, config)
                .await;
        }

        self.hooks
            .dispatch(agentcore_hooks::HookPoint::AfterAgent, state, config)
            .await;

        Ok(final_reply)
    }

    async fn run_tool_calls(
        &self,
        calls: Vec<ToolCallRequest>,
        state: &dyn StateMap,
    ) -> Result<(), TurnError> {
        let mut history = as_array(state.get(agentcore_core::state::keys::EXECUTION_HISTORY));
        for call in calls {
            let result = self.tools.call(&call.name, call.arguments).await;
            history.push(match &result {
                Ok(value) => serde_json::json!({"tool": call.name, "success": true, "result": value}),
                Err(err) => serde_json::json!({"tool": call.name, "success": false, "error": err.to_string()}),
            });
        }
        state.set(agentcore_core::state::keys::EXECUTION_HISTORY, Value::Array(history));
        Ok(())
    }

    #[cfg(feature = "bridge")]
    async fn run_code(&self, language: &str, source: &str, args: Value, state: &dyn StateMap) -> Result<(), TurnError> {
        let bridge = self
            .bridge
            .as_ref()
            .ok_or_else(|| TurnError::ModelFailed("received CodeAct code with no code executor configured".into()))?;

        let mut generated = as_array(state.get(agentcore_core::state::keys::GENERATED_CODE));
        generated.push(Value::String(source.to_string()));
        state.set(agentcore_core::state::keys::GENERATED_CODE, Value::Array(generated));

        let record = bridge.run_snippet(source, language, args).await;

        let mut history = as_array(state.get(agentcore_core::state::keys::EXECUTION_HISTORY));
        history.push(serde_json::json!({
            "state": format!("{:?}", record.state),
            "function_name": record.function_name,
            "result": record.result,
            "error": record.error,
            "stack": record.stack,
        }));
        state.set(agentcore_core::state::keys::EXECUTION_HISTORY, Value::Array(history));
        Ok(())
    }

    #[cfg(not(feature = "bridge"))]
    async fn run_code(&self, _language: &str, _source: &str, _args: Value, _state: &dyn StateMap) -> Result<(), TurnError> {
        Err(TurnError::ModelFailed(
            "received CodeAct code but the bridge feature is disabled".into(),
        ))
    }

    /// Run the learning engine's turn-boundary hook against the final
    /// state of a completed turn.
    #[cfg(feature = "learning")]
    pub async fn learn_from_turn<S, J>(&self, engine: &LearningEngine<S, J>, state: &dyn StateMap, tool_calls: Vec<ToolCallTrace>)
    where
        S: LearningStrategy + 'static,
        J: Judge + 'static,
    {
        let ctx = LearningTriggerContext::from_state(agentcore_hooks::HookPoint::AfterAgent, state, tool_calls);
        engine.on_turn_boundary(ctx).await;
    }
}

fn as_array(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
        None => vec![],
    }
}
