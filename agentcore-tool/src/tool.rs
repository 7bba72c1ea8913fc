//! Tool definitions and the callable record the registry stores them as.

use crate::error::ToolError;
use crate::param::ParamNode;
use crate::schema::DeclaredSchema;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Metadata that doesn't affect invocation but does affect stub
/// rendering and registry filtering.
#[derive(Debug, Clone, Default)]
pub struct ToolMetadata {
    /// Target languages this tool's stub can be rendered into.
    /// Empty means "all languages".
    pub supported_languages: Vec<String>,
    /// Up to three few-shot call examples, shown verbatim in the stub's docstring.
    pub few_shot_examples: Vec<String>,
    /// A friendlier name for prompts than the registry key.
    pub display_name: Option<String>,
    /// Tools that share a `target_class` render as methods of one synthesized class.
    pub target_class: Option<String>,
    /// Whether invoking this tool terminates the turn (a "direct reply" tool).
    pub direct_reply: bool,
}

/// An immutable tool definition, as admitted to the registry.
#[derive(Debug)]
pub struct ToolDef {
    /// The tool's unique name.
    pub name: String,
    /// Human-readable description, the stub docstring's summary line.
    pub description: String,
    /// The root (object) parameter node; its children are the call's named arguments.
    pub parameters: ParamNode,
    /// The tool's declared return schema, if any.
    pub return_schema: Option<DeclaredSchema>,
    /// Rendering and filtering metadata.
    pub metadata: ToolMetadata,
}

impl ToolDef {
    /// Whether this tool's stub may be rendered for `lang`.
    pub fn supports_language(&self, lang: &str) -> bool {
        self.metadata.supported_languages.is_empty()
            || self
                .metadata
                .supported_languages
                .iter()
                .any(|l| l.eq_ignore_ascii_case(lang))
    }
}

/// Object-safe trait for a tool's call implementation.
///
/// Any tool source (local function, MCP server, HTTP endpoint) implements
/// this trait. Implementations are stored as `Arc<dyn ToolDyn>` in
/// [`crate::registry::ToolRegistry`].
pub trait ToolDyn: Send + Sync {
    /// Execute the tool with the given input.
    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ToolError>> + Send + '_>>;
}

impl fmt::Debug for dyn ToolDyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn ToolDyn")
    }
}

/// A tool definition paired with its concrete call implementation —
/// the unit the registry admits and rejects duplicates of by name.
pub struct ToolRecord {
    /// The tool's definition.
    pub def: ToolDef,
    /// The tool's call implementation.
    pub implementation: std::sync::Arc<dyn ToolDyn>,
}

impl ToolRecord {
    /// Construct a new record from a definition and implementation.
    pub fn new(def: ToolDef, implementation: std::sync::Arc<dyn ToolDyn>) -> Self {
        Self { def, implementation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParamType;
    use serde_json::json;
    use std::sync::Arc;

    struct Echo;
    impl ToolDyn for Echo {
        fn call(
            &self,
            input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ToolError>> + Send + '_>>
        {
            Box::pin(async move { Ok(json!({ "echoed": input })) })
        }
    }

    #[test]
    fn supports_language_defaults_to_all() {
        let def = ToolDef {
            name: "echo".into(),
            description: "echoes input".into(),
            parameters: ParamNode::required("root", ParamType::Object),
            return_schema: None,
            metadata: ToolMetadata::default(),
        };
        assert!(def.supports_language("python"));
        assert!(def.supports_language("javascript"));
    }

    #[tokio::test]
    async fn tool_record_calls_through_to_implementation() {
        let def = ToolDef {
            name: "echo".into(),
            description: "echoes input".into(),
            parameters: ParamNode::required("root", ParamType::Object),
            return_schema: None,
            metadata: ToolMetadata::default(),
        };
        let record = ToolRecord::new(def, Arc::new(Echo));
        let result = record.implementation.call(json!({"x": 1})).await.unwrap();
        assert_eq!(result, json!({"echoed": {"x": 1}}));
    }
}
