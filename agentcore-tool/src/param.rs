//! Parameter trees — the structured description of a tool's inputs.
//!
//! A [`ParamNode`] is serializable to JSON-Schema and renderable to a
//! target-language function signature; object nodes carry an ordered
//! list of children so stub rendering can put required parameters
//! first.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The scalar type of a parameter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// UTF-8 string.
    String,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Number,
    /// Boolean.
    Boolean,
    /// A nested object with its own child parameters.
    Object,
    /// A homogeneous list.
    Array,
    /// The JSON null value.
    Null,
    /// Type could not be determined.
    Unknown,
}

impl ParamType {
    /// The JSON-Schema `type` keyword for this parameter type.
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
            ParamType::Null => "null",
            ParamType::Unknown => "string",
        }
    }

    /// A best-effort type hint for a target-language signature, used
    /// when no language-specific renderer exists for `lang`.
    pub fn type_hint(&self, lang: &str) -> &'static str {
        match (lang, self) {
            ("python", ParamType::String) => "str",
            ("python", ParamType::Integer) => "int",
            ("python", ParamType::Number) => "float",
            ("python", ParamType::Boolean) => "bool",
            ("python", ParamType::Object) => "dict",
            ("python", ParamType::Array) => "list",
            ("python", ParamType::Null) => "None",
            ("python", ParamType::Unknown) => "object",
            (_, ParamType::String) => "string",
            (_, ParamType::Integer) => "int",
            (_, ParamType::Number) => "number",
            (_, ParamType::Boolean) => "bool",
            (_, ParamType::Object) => "object",
            (_, ParamType::Array) => "array",
            (_, ParamType::Null) => "null",
            (_, ParamType::Unknown) => "any",
        }
    }
}

/// One node of a tool's parameter tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamNode {
    /// The parameter's name.
    pub name: String,
    /// The parameter's scalar type.
    pub param_type: ParamType,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Default value used when the caller omits the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed values, if the parameter is constrained to an enumeration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Human-readable description, surfaced in the rendered docstring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Child parameters, populated when `param_type` is `Object`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParamNode>,
}

impl ParamNode {
    /// Construct a required scalar parameter.
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            default: None,
            enum_values: None,
            description: None,
            children: Vec::new(),
        }
    }

    /// Construct an optional scalar parameter with a default.
    pub fn optional(name: impl Into<String>, param_type: ParamType, default: Value) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            default: Some(default),
            enum_values: None,
            description: None,
            children: Vec::new(),
        }
    }

    /// Attach a description, returning `self` for chaining.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an allowed-values enumeration, returning `self` for chaining.
    pub fn with_enum_values(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Render this node as a JSON-Schema fragment.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": self.param_type.json_schema_type() });
        if let Some(description) = &self.description {
            schema["description"] = json!(description);
        }
        if let Some(values) = &self.enum_values {
            schema["enum"] = json!(values);
        }
        if self.param_type == ParamType::Object && !self.children.is_empty() {
            let mut properties = serde_json::Map::new();
            let mut required = Vec::new();
            for child in &self.children {
                properties.insert(child.name.clone(), child.to_json_schema());
                if child.required {
                    required.push(json!(child.name));
                }
            }
            schema["properties"] = Value::Object(properties);
            if !required.is_empty() {
                schema["required"] = Value::Array(required);
            }
        }
        schema
    }

    /// Render a target-language parameter list, required parameters
    /// first, optional-with-defaults after — e.g. `a: int, b: int = 0`.
    pub fn render_param_list(children: &[ParamNode], lang: &str) -> String {
        let mut required: Vec<&ParamNode> = children.iter().filter(|c| c.required).collect();
        let mut optional: Vec<&ParamNode> = children.iter().filter(|c| !c.required).collect();
        required.sort_by(|a, b| a.name.cmp(&b.name));
        optional.sort_by(|a, b| a.name.cmp(&b.name));

        let mut parts = Vec::new();
        for node in required.into_iter().chain(optional.clone()) {
            parts.push(node.render_param(lang));
        }
        parts.join(", ")
    }

    fn render_param(&self, lang: &str) -> String {
        let hint = self.param_type.type_hint(lang);
        match (&self.default, lang) {
            (Some(default), "python") => {
                format!("{}: {} = {}", self.name, hint, python_literal(default))
            }
            (Some(default), _) => format!("{}: {} = {}", self.name, hint, default),
            (None, _) => format!("{}: {}", self.name, hint),
        }
    }
}

fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_required_before_optional() {
        let children = vec![
            ParamNode::optional("b", ParamType::Integer, json!(0)),
            ParamNode::required("a", ParamType::Integer),
        ];
        assert_eq!(
            ParamNode::render_param_list(&children, "python"),
            "a: int, b: int = 0"
        );
    }

    #[test]
    fn json_schema_includes_required_list() {
        let node = ParamNode {
            name: "root".into(),
            param_type: ParamType::Object,
            required: true,
            default: None,
            enum_values: None,
            description: None,
            children: vec![ParamNode::required("a", ParamType::Integer)],
        };
        let schema = node.to_json_schema();
        assert_eq!(schema["required"], json!(["a"]));
    }
}
