//! Orchestrates one code snippet through the bridge's state machine,
//! wiring the function table, the tool/state proxies, and the
//! executor boundary together.

use crate::executor::CodeExecutor;
use crate::function_table::FunctionTable;
use crate::proxy::{StateProxy, ToolProxy};
use crate::record::ExecutionRecord;
use crate::render::{extract_function_name, render_function_call};
use agentcore_core::StateMap;
use agentcore_tool::ToolRegistry;
use std::sync::Arc;

/// The code-acting execution bridge for one turn.
pub struct CodeBridge {
    tools: Arc<ToolRegistry>,
    functions: FunctionTable,
    executor: Arc<dyn CodeExecutor>,
}

impl CodeBridge {
    /// Build a bridge over a tool registry and a code executor.
    pub fn new(tools: Arc<ToolRegistry>, executor: Arc<dyn CodeExecutor>) -> Self {
        Self {
            tools,
            functions: FunctionTable::new(),
            executor,
        }
    }

    /// The tool proxy executed code would see.
    pub fn tool_proxy(&self) -> ToolProxy {
        ToolProxy::new(self.tools.clone())
    }

    /// The state proxy executed code would see for `state`.
    pub fn state_proxy<'a>(&self, state: &'a dyn StateMap) -> StateProxy<'a> {
        StateProxy::new(state)
    }

    /// Run one submitted code snippet to completion, driving it
    /// through RECEIVED → PARSED → REGISTERED → INVOKED →
    /// {COMPLETED, FAILED}.
    ///
    /// `args` are the arguments for the snippet's own top-level call
    /// (not a tool call — this invokes the model-synthesized function
    /// itself). A FAILED record is returned rather than an `Err`: the
    /// spec requires the error text to re-enter the agent loop as
    /// visible state, not to propagate as an exception.
    pub async fn run_snippet(
        &self,
        code: &str,
        lang: &str,
        args: serde_json::Value,
    ) -> ExecutionRecord {
        // RECEIVED is implicit — we hold `code` already.
        let function_name = match extract_function_name(code, lang) {
            Ok(name) => name,
            Err(err) => return ExecutionRecord::failed(None, err.to_string(), None),
        };
        // PARSED

        self.functions.register(&function_name, code, lang);
        // REGISTERED

        let call_expr = render_function_call(&function_name, &args, lang);
        tracing::debug!(function = function_name.as_str(), "invoking code-acting snippet");
        // INVOKED

        match self.executor.execute(code, &call_expr).await {
            Ok(value) => ExecutionRecord::completed(function_name, value),
            Err(crate::error::BridgeError::ExecutionFailed { message, stack }) => {
                ExecutionRecord::failed(Some(function_name), message, stack)
            }
            Err(err) => ExecutionRecord::failed(Some(function_name), err.to_string(), None),
        }
    }

    /// The function table backing this bridge's previously compiled snippets.
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ScriptedExecutor;
    use crate::record::SnippetState;
    use agentcore_tool::{ParamNode, ParamType, ToolDef, ToolDyn, ToolRecord};
    use serde_json::json;
    use std::future::Future;
    use std::pin::Pin;

    struct Echo;
    impl ToolDyn for Echo {
        fn call(
            &self,
            input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, agentcore_tool::ToolError>> + Send + '_>>
        {
            Box::pin(async move { Ok(json!({ "echoed": input })) })
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let registry = ToolRegistry::new();
        registry
            .register(ToolRecord::new(
                ToolDef {
                    name: "echo".into(),
                    description: "echoes".into(),
                    parameters: ParamNode::required("root", ParamType::Object),
                    return_schema: None,
                    metadata: Default::default(),
                },
                Arc::new(Echo),
            ))
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn a_snippet_runs_through_to_completed() {
        let code = "def solve(a, b):\n    return a + b\n";
        let call_expr = render_function_call("solve", &json!({"a": 1, "b": 2}), "python");
        let executor = Arc::new(ScriptedExecutor::new().script(call_expr, json!(3)));
        let bridge = CodeBridge::new(registry(), executor);

        let record = bridge.run_snippet(code, "python", json!({"a": 1, "b": 2})).await;
        assert_eq!(record.state, SnippetState::Completed);
        assert_eq!(record.result, Some(json!(3)));
        assert!(bridge.functions().names().contains(&"solve".to_string()));
    }

    #[tokio::test]
    async fn unextractable_function_name_fails_before_registering() {
        let code = "x = 1\n";
        let executor = Arc::new(ScriptedExecutor::new());
        let bridge = CodeBridge::new(registry(), executor);

        let record = bridge.run_snippet(code, "python", json!({})).await;
        assert_eq!(record.state, SnippetState::Failed);
        assert!(bridge.functions().names().is_empty());
    }

    #[tokio::test]
    async fn an_executor_error_produces_a_failed_record_with_the_function_name() {
        let code = "def solve():\n    return 1\n";
        let executor = Arc::new(ScriptedExecutor::new());
        let bridge = CodeBridge::new(registry(), executor);

        let record = bridge.run_snippet(code, "python", json!({})).await;
        assert_eq!(record.state, SnippetState::Failed);
        assert_eq!(record.function_name, Some("solve".to_string()));
        assert!(record.error.is_some());
        assert!(record.stack.is_none());
    }

    #[tokio::test]
    async fn an_executor_traceback_is_carried_into_the_failed_record() {
        let code = "def solve():\n    raise ValueError('boom')\n";
        let call_expr = render_function_call("solve", &json!({}), "python");
        let traceback = "Traceback (most recent call last):\n  File \"<snippet>\", line 2, in solve\nValueError: boom";
        let executor = Arc::new(ScriptedExecutor::new().fail_with_traceback(
            call_expr,
            "boom",
            traceback,
        ));
        let bridge = CodeBridge::new(registry(), executor);

        let record = bridge.run_snippet(code, "python", json!({})).await;
        assert_eq!(record.state, SnippetState::Failed);
        assert_eq!(record.error, Some("boom".to_string()));
        assert_eq!(record.stack, Some(traceback.to_string()));
    }
}
