//! Deciding whether a turn carries reusable signal worth extracting.

use agentcore_core::StateMap;
use agentcore_hooks::HookPoint;
use serde_json::Value;
use std::collections::HashMap;

/// One tool invocation's outcome, as seen from the learning loop.
#[derive(Debug, Clone)]
pub struct ToolCallTrace {
    /// The tool's registered name.
    pub name: String,
    /// Whether the call succeeded.
    pub success: bool,
}

/// Everything a [`crate::LearningStrategy`] may look at when deciding
/// whether to learn from a turn.
#[derive(Debug, Clone)]
pub struct LearningTriggerContext {
    /// Which hook point fired this decision.
    pub hook_point: HookPoint,
    /// The turn's conversation so far.
    pub messages: Vec<Value>,
    /// Code blocks generated by the model this turn.
    pub generated_code: Vec<Value>,
    /// Tool calls made this turn, with their outcomes.
    pub tool_calls: Vec<ToolCallTrace>,
    /// Execution records produced by the code-acting bridge.
    pub execution_history: Vec<Value>,
    /// A snapshot of the full turn state, for strategies that need more.
    pub state: HashMap<String, Value>,
}

impl LearningTriggerContext {
    /// Build a context from a turn's state map, at the given hook point.
    pub fn from_state(
        hook_point: HookPoint,
        state: &dyn StateMap,
        tool_calls: Vec<ToolCallTrace>,
    ) -> Self {
        let snapshot = state.get_all();
        let messages = as_array(snapshot.get(agentcore_core::state::keys::MESSAGES));
        let generated_code = as_array(snapshot.get(agentcore_core::state::keys::GENERATED_CODE));
        let execution_history = as_array(snapshot.get(agentcore_core::state::keys::EXECUTION_HISTORY));
        Self {
            hook_point,
            messages,
            generated_code,
            tool_calls,
            execution_history,
            state: snapshot,
        }
    }

    /// Whether the conversation has gone past a single opening message.
    pub fn is_non_trivial_conversation(&self) -> bool {
        self.messages.len() > 2
    }
}

fn as_array(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
        None => vec![],
    }
}

/// Whether and how urgently to run extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Queue onto the learning pool; never blocks the turn.
    Async,
    /// Run inline, blocking the caller until extraction finishes or fails.
    Sync,
}

/// The trigger decision: whether to learn, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDecision {
    /// Whether the turn is worth extracting from.
    pub should_learn: bool,
    /// If `should_learn`, which execution mode to use.
    pub mode: ExecutionMode,
}

impl TriggerDecision {
    /// Don't learn from this turn.
    pub fn skip() -> Self {
        Self {
            should_learn: false,
            mode: ExecutionMode::Async,
        }
    }

    /// Learn from this turn in the given mode.
    pub fn learn(mode: ExecutionMode) -> Self {
        Self {
            should_learn: true,
            mode,
        }
    }
}

/// Decides whether a turn is worth extracting an experience from.
pub trait LearningStrategy: Send + Sync {
    /// Inspect the context and return a trigger decision.
    fn decide(&self, ctx: &LearningTriggerContext) -> TriggerDecision;
}

/// The default strategy: learn (asynchronously) if the turn produced
/// generated code, tool calls, execution history, or a non-trivial
/// conversation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLearningStrategy;

impl LearningStrategy for DefaultLearningStrategy {
    fn decide(&self, ctx: &LearningTriggerContext) -> TriggerDecision {
        let worth_learning = !ctx.generated_code.is_empty()
            || !ctx.tool_calls.is_empty()
            || !ctx.execution_history.is_empty()
            || ctx.is_non_trivial_conversation();

        if worth_learning {
            TriggerDecision::learn(ExecutionMode::Async)
        } else {
            TriggerDecision::skip()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcore_core::InMemoryState;
    use serde_json::json;

    fn context_with(state: &InMemoryState, tool_calls: Vec<ToolCallTrace>) -> LearningTriggerContext {
        LearningTriggerContext::from_state(HookPoint::AfterAgent, state, tool_calls)
    }

    #[test]
    fn an_empty_turn_does_not_trigger_learning() {
        let state = InMemoryState::new();
        state.set(agentcore_core::state::keys::MESSAGES, json!([{"role": "user"}]));
        let ctx = context_with(&state, vec![]);
        assert_eq!(DefaultLearningStrategy.decide(&ctx), TriggerDecision::skip());
    }

    #[test]
    fn generated_code_triggers_async_learning() {
        let state = InMemoryState::new();
        state.set(agentcore_core::state::keys::GENERATED_CODE, json!(["print(1)"]));
        let ctx = context_with(&state, vec![]);
        let decision = DefaultLearningStrategy.decide(&ctx);
        assert!(decision.should_learn);
        assert_eq!(decision.mode, ExecutionMode::Async);
    }

    #[test]
    fn tool_calls_trigger_learning_even_with_no_code() {
        let state = InMemoryState::new();
        let ctx = context_with(
            &state,
            vec![ToolCallTrace {
                name: "reply".into(),
                success: true,
            }],
        );
        assert!(DefaultLearningStrategy.decide(&ctx).should_learn);
    }

    #[test]
    fn a_long_conversation_triggers_learning_on_its_own() {
        let state = InMemoryState::new();
        state.set(
            agentcore_core::state::keys::MESSAGES,
            json!([{"role": "user"}, {"role": "assistant"}, {"role": "user"}]),
        );
        let ctx = context_with(&state, vec![]);
        assert!(DefaultLearningStrategy.decide(&ctx).should_learn);
    }
}
