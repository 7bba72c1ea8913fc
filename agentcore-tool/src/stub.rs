//! Renders tool stubs for insertion into a model prompt: a
//! target-language function signature plus a docstring in a fixed
//! grammar (summary line, Args section, Returns section, few-shot
//! examples).

use crate::param::ParamNode;
use crate::registry::ToolRegistry;
use crate::schema::ReturnSchema;
use crate::shape::{Primitive, Shape, ShapeKind};
use std::collections::HashMap;

const MAX_SHAPE_DEPTH: usize = 2;
const MAX_FEW_SHOT: usize = 3;

/// Render every tool's stub for `lang`, grouping tools that share a
/// `target_class` metadata field as methods of a synthesized class.
pub fn generate_structured_tool_prompt(registry: &ToolRegistry, lang: &str) -> String {
    let tools = registry.get_tools_for_language(lang);

    let mut classes: HashMap<String, Vec<&std::sync::Arc<crate::tool::ToolRecord>>> =
        HashMap::new();
    let mut free_functions = Vec::new();
    for tool in &tools {
        match &tool.def.metadata.target_class {
            Some(class) => classes.entry(class.clone()).or_default().push(tool),
            None => free_functions.push(tool),
        }
    }

    let mut sections = Vec::new();

    let mut class_names: Vec<String> = classes.keys().cloned().collect();
    class_names.sort();
    for class_name in class_names {
        let mut members = classes.remove(&class_name).unwrap();
        members.sort_by(|a, b| a.def.name.cmp(&b.def.name));
        let mut body = format!("class {class_name}:\n");
        for tool in members {
            let schema = registry.get_return_schema(&tool.def.name);
            let stub = render_tool_stub(&tool.def.name, &tool.def, schema.as_ref(), lang);
            for line in stub.lines() {
                body.push_str("    ");
                body.push_str(line);
                body.push('\n');
            }
        }
        sections.push(body);
    }

    free_functions.sort_by(|a, b| a.def.name.cmp(&b.def.name));
    for tool in free_functions {
        let schema = registry.get_return_schema(&tool.def.name);
        sections.push(render_tool_stub(&tool.def.name, &tool.def, schema.as_ref(), lang));
    }

    sections.join("\n")
}

fn render_tool_stub(
    name: &str,
    def: &crate::tool::ToolDef,
    schema: Option<&ReturnSchema>,
    lang: &str,
) -> String {
    let params = ParamNode::render_param_list(&def.parameters.children, lang);
    let signature = match lang {
        "python" => format!("def {name}({params}):"),
        _ => format!("function {name}({params})"),
    };

    let mut doc = vec![def.description.clone()];
    doc.push(String::new());
    doc.push("Args:".to_string());
    if def.parameters.children.is_empty() {
        doc.push("    (none)".to_string());
    }
    for child in &def.parameters.children {
        let optional = if child.required { "" } else { " (optional)" };
        let default = child
            .default
            .as_ref()
            .map(|d| format!(", default {d}"))
            .unwrap_or_default();
        let description = child
            .description
            .as_deref()
            .map(|d| format!(" - {d}"))
            .unwrap_or_default();
        doc.push(format!(
            "    {}: {}{}{}{}",
            child.name,
            child.param_type.type_hint(lang),
            optional,
            default,
            description
        ));
    }
    doc.push(String::new());
    doc.push("Returns:".to_string());
    doc.push(format!("    {}", describe_returns(def, schema)));

    let examples: Vec<&String> = def.metadata.few_shot_examples.iter().take(MAX_FEW_SHOT).collect();
    if !examples.is_empty() {
        doc.push(String::new());
        doc.push("Examples:".to_string());
        for example in examples {
            doc.push(format!("    {example}"));
        }
    }

    let docstring = doc
        .into_iter()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{signature}\n    \"\"\"\n{docstring}\n    \"\"\"")
}

fn describe_returns(def: &crate::tool::ToolDef, schema: Option<&ReturnSchema>) -> String {
    if let Some(schema) = schema {
        if let Some(success) = &schema.success {
            return describe_shape(success, 0);
        }
        if let Some(hint) = &schema.type_hint {
            return hint.clone();
        }
    }
    if let Some(declared) = &def.return_schema {
        return describe_shape(&declared.success, 0);
    }
    "unknown".to_string()
}

fn describe_shape(shape: &Shape, depth: usize) -> String {
    let optional_suffix = if shape.optional { " (optional)" } else { "" };
    match &shape.kind {
        ShapeKind::Primitive(Primitive::String) => format!("string{optional_suffix}"),
        ShapeKind::Primitive(Primitive::Integer) => format!("integer{optional_suffix}"),
        ShapeKind::Primitive(Primitive::Number) => format!("number{optional_suffix}"),
        ShapeKind::Primitive(Primitive::Boolean) => format!("boolean{optional_suffix}"),
        ShapeKind::Primitive(Primitive::Unknown) => format!("unknown{optional_suffix}"),
        ShapeKind::Array(item) => {
            let item_desc = item
                .as_ref()
                .map(|shape| describe_shape(shape, depth + 1))
                .unwrap_or_else(|| "unknown".to_string());
            format!("array of {item_desc}{optional_suffix}")
        }
        ShapeKind::Object(fields) => {
            if depth >= MAX_SHAPE_DEPTH {
                return format!("object{optional_suffix}");
            }
            let rendered = fields
                .iter()
                .map(|(name, shape)| format!("{name}: {}", describe_shape(shape, depth + 1)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("object with {rendered}{optional_suffix}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParamType;
    use crate::schema::DeclaredSchema;
    use crate::tool::{ToolDef, ToolDyn, ToolMetadata, ToolRecord};
    use serde_json::json;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;

    struct NoOp;
    impl ToolDyn for NoOp {
        fn call(
            &self,
            _input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, crate::error::ToolError>> + Send + '_>>
        {
            Box::pin(async { Ok(json!({})) })
        }
    }

    #[test]
    fn scenario_tool_registration_and_stub_rendering() {
        let registry = ToolRegistry::new();
        let mut root = ParamNode::required("root", ParamType::Object);
        root.children = vec![
            ParamNode::required("a", ParamType::Integer),
            ParamNode::required("b", ParamType::Integer),
        ];
        let def = ToolDef {
            name: "add".into(),
            description: "Adds two integers.".into(),
            parameters: root,
            return_schema: Some(DeclaredSchema {
                success: {
                    let mut shape = crate::shape::Shape::primitive(Primitive::Integer);
                    shape.optional = false;
                    // return schema is `{result: int}` per the scenario
                    crate::shape::Shape {
                        kind: ShapeKind::Object(vec![("result".to_string(), shape)]),
                        optional: false,
                    }
                },
                description: None,
                type_hint: None,
            }),
            metadata: ToolMetadata::default(),
        };
        registry.register(ToolRecord::new(def, Arc::new(NoOp))).unwrap();

        let prompt = generate_structured_tool_prompt(&registry, "python");
        assert!(prompt.contains("def add(a: int, b: int):"));
        assert!(prompt.contains("result"));
    }

    #[test]
    fn tools_sharing_target_class_render_together() {
        let registry = ToolRegistry::new();
        for name in ["get", "set"] {
            let metadata = ToolMetadata {
                target_class: Some("Kv".into()),
                ..Default::default()
            };
            let def = ToolDef {
                name: name.into(),
                description: format!("{name}s a value"),
                parameters: ParamNode::required("root", ParamType::Object),
                return_schema: None,
                metadata,
            };
            registry.register(ToolRecord::new(def, Arc::new(NoOp))).unwrap();
        }
        let prompt = generate_structured_tool_prompt(&registry, "python");
        assert!(prompt.contains("class Kv:"));
        assert!(prompt.contains("def get()"));
        assert!(prompt.contains("def set()"));
    }
}
