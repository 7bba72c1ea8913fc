//! The tool and state proxies reflected into executed code.

use crate::error::BridgeError;
use agentcore_core::StateMap;
use agentcore_tool::ToolRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// The `call`/`list`/`has` surface executed code sees for invoking
/// tools. Backed by the same [`ToolRegistry`] the model's stubs were
/// rendered from.
pub struct ToolProxy {
    registry: Arc<ToolRegistry>,
}

impl ToolProxy {
    /// Wrap a tool registry for use from executed code.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Invoke `name` with `args`, awaiting its synchronous result.
    ///
    /// Tool-not-found is a hard error, surfaced into the code's
    /// exception channel. A tool that raises is *not* an error here —
    /// its failure is folded into a `{"error": "..."}` document and
    /// handed back as a normal string result, since the schema
    /// registry already observed the failure inside
    /// [`ToolRegistry::call`].
    pub async fn call(&self, name: &str, args: serde_json::Value) -> Result<String, BridgeError> {
        match self.registry.call(name, args).await {
            Ok(value) => Ok(value.to_string()),
            Err(agentcore_tool::ToolError::NotFound(n)) => Err(BridgeError::ExecutionFailed {
                message: format!("Tool not found: {n}"),
                stack: None,
            }),
            Err(other) => Ok(serde_json::json!({ "error": other.to_string() }).to_string()),
        }
    }

    /// Every registered tool's name.
    pub fn list(&self) -> Vec<String> {
        self.registry
            .get_all_tools()
            .into_iter()
            .map(|record| record.def.name.clone())
            .collect()
    }

    /// Whether `name` is registered.
    pub fn has(&self, name: &str) -> bool {
        self.registry.get_tool(name).is_some()
    }
}

/// The `get`/`set`/`has`/`getAll` surface executed code sees for the
/// turn's state map. A thin, structural wrapper over [`StateMap`] —
/// `set` writes straight through, there is no buffering or staging.
pub struct StateProxy<'a> {
    state: &'a dyn StateMap,
}

impl<'a> StateProxy<'a> {
    /// Wrap a turn's state map for use from executed code.
    pub fn new(state: &'a dyn StateMap) -> Self {
        Self { state }
    }

    /// Read `key`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.state.get(key)
    }

    /// Write `key`.
    pub fn set(&self, key: &str, value: serde_json::Value) {
        self.state.set(key, value);
    }

    /// Whether `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.state.has(key)
    }

    /// Snapshot every key in the state map.
    pub fn get_all(&self) -> HashMap<String, serde_json::Value> {
        self.state.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcore_core::InMemoryState;
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

    struct Raises;
    impl ToolDyn for Raises {
        fn call(
            &self,
            _input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, agentcore_tool::ToolError>> + Send + '_>>
        {
            Box::pin(async move { Err(agentcore_tool::ToolError::ExecutionFailed("boom".into())) })
        }
    }

    fn registry_with(name: &str, implementation: Arc<dyn ToolDyn>) -> Arc<ToolRegistry> {
        let registry = ToolRegistry::new();
        registry
            .register(ToolRecord::new(
                ToolDef {
                    name: name.into(),
                    description: "test tool".into(),
                    parameters: ParamNode::required("root", ParamType::Object),
                    return_schema: None,
                    metadata: Default::default(),
                },
                implementation,
            ))
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn call_not_found_is_a_hard_error() {
        let proxy = ToolProxy::new(registry_with("echo", Arc::new(Echo)));
        let err = proxy.call("missing", json!({})).await.unwrap_err();
        assert!(
            matches!(err, BridgeError::ExecutionFailed { message, .. } if message.contains("Tool not found: missing"))
        );
    }

    #[tokio::test]
    async fn call_that_raises_returns_an_error_document_not_an_error() {
        let proxy = ToolProxy::new(registry_with("raises", Arc::new(Raises)));
        let result = proxy.call("raises", json!({})).await.unwrap();
        assert_eq!(result, json!({"error": "execution failed: boom"}).to_string());
    }

    #[test]
    fn state_proxy_reads_and_writes_through() {
        let state = InMemoryState::new();
        let proxy = StateProxy::new(&state);
        assert!(!proxy.has("x"));
        proxy.set("x", json!(1));
        assert_eq!(proxy.get("x"), Some(json!(1)));
        assert_eq!(proxy.get_all().len(), 1);
    }
}
