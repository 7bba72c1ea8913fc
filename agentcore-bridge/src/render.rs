//! Function-call rendering and function-name extraction.
//!
//! The bridge never parses a full target-language grammar — an
//! embedded interpreter is out of scope here. These are the two
//! narrow syntactic operations the bridge actually needs: rendering a
//! call expression from a name and a JSON argument map, and recovering
//! the top-level function identifier from a submitted snippet.

use crate::error::BridgeError;
use serde_json::Value;

/// Render a syntactically valid call expression in `lang` for
/// `function_name`, given its arguments as a JSON object (key order is
/// preserved from the map's iteration order).
pub fn render_function_call(function_name: &str, args: &Value, lang: &str) -> String {
    let rendered_args = match args.as_object() {
        Some(map) => map
            .values()
            .map(|v| value_to_literal(v, lang))
            .collect::<Vec<_>>()
            .join(", "),
        None => value_to_literal(args, lang),
    };
    format!("{function_name}({rendered_args})")
}

/// Recursively convert a JSON value into a target-language literal.
pub fn value_to_literal(value: &Value, lang: &str) -> String {
    match value {
        Value::Null => match lang {
            "python" => "None".to_string(),
            _ => "null".to_string(),
        },
        Value::Bool(b) => match lang {
            "python" => if *b { "True" } else { "False" }.to_string(),
            _ => b.to_string(),
        },
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_string(s),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|v| value_to_literal(v, lang))
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{rendered}]")
        }
        Value::Object(map) => {
            let rendered = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote_string(k), value_to_literal(v, lang)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{rendered}}}")
        }
    }
}

fn quote_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Recover the top-level function identifier from a submitted code
/// snippet. Failure is a hard error — the snippet cannot be
/// registered in the function table without a name to key it by.
pub fn extract_function_name(code: &str, lang: &str) -> Result<String, BridgeError> {
    let prefix = match lang {
        "python" => "def ",
        _ => "function ",
    };
    for line in code.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            let name: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                return Ok(name);
            }
        }
    }
    Err(BridgeError::FunctionNameExtractionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_call_with_primitive_args_in_python() {
        let args = json!({"a": 1, "b": "two", "c": null, "d": true});
        let rendered = render_function_call("add", &args, "python");
        assert_eq!(rendered, "add(1, \"two\", None, True)");
    }

    #[test]
    fn renders_nested_lists_and_maps() {
        let args = json!({"items": [1, 2, {"x": "y"}]});
        let rendered = render_function_call("process", &args, "python");
        assert_eq!(rendered, "process([1, 2, {\"x\": \"y\"}])");
    }

    #[test]
    fn extracts_python_function_name() {
        let code = "def solve(a, b):\n    return a + b\n";
        assert_eq!(extract_function_name(code, "python").unwrap(), "solve");
    }

    #[test]
    fn extraction_fails_without_a_recognizable_definition() {
        let code = "x = 1\ny = 2\n";
        assert!(extract_function_name(code, "python").is_err());
    }
}
