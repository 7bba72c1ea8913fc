//! The function table: previously compiled code snippets addressable
//! by function name, with import/require declarations computed from
//! which other registered functions a new snippet calls.

use std::collections::HashMap;
use std::sync::RwLock;

/// One compiled snippet: its source and the import/require lines a
/// caller needs to reach it.
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    /// The function's top-level identifier.
    pub name: String,
    /// The snippet's source code.
    pub code: String,
    /// Import/require declarations this snippet needs for the other
    /// registered functions it calls.
    pub imports: Vec<String>,
}

/// Holds every snippet registered so far, keyed by function name.
#[derive(Default)]
pub struct FunctionTable {
    functions: RwLock<HashMap<String, CompiledFunction>>,
}

impl FunctionTable {
    /// Create an empty function table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `code` under `name`, computing its import declarations
    /// against every function already in the table.
    pub fn register(&self, name: &str, code: &str, lang: &str) {
        let functions = self.functions.read().unwrap_or_else(|e| e.into_inner());
        let imports: Vec<String> = functions
            .keys()
            .filter(|other| other.as_str() != name && calls(code, other))
            .map(|other| import_line(other, lang))
            .collect();
        drop(functions);

        self.functions.write().unwrap_or_else(|e| e.into_inner()).insert(
            name.to_owned(),
            CompiledFunction {
                name: name.to_owned(),
                code: code.to_owned(),
                imports,
            },
        );
    }

    /// Fetch a previously registered snippet by name.
    pub fn get(&self, name: &str) -> Option<CompiledFunction> {
        self.functions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Every registered function name.
    pub fn names(&self) -> Vec<String> {
        self.functions.read().unwrap_or_else(|e| e.into_inner()).keys().cloned().collect()
    }
}

fn calls(code: &str, function_name: &str) -> bool {
    code.match_indices(function_name).any(|(idx, _)| {
        let after = &code[idx + function_name.len()..];
        let before_ok = idx == 0
            || !code[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
        before_ok && after.trim_start().starts_with('(')
    })
}

fn import_line(function_name: &str, lang: &str) -> String {
    match lang {
        "python" => format!("from __functions__ import {function_name}"),
        "javascript" => format!("const {{ {function_name} }} = require('./functions');"),
        _ => format!("import {function_name};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_snippet_calling_an_earlier_function_gets_its_import() {
        let table = FunctionTable::new();
        table.register("helper", "def helper(x):\n    return x + 1\n", "python");
        table.register(
            "main",
            "def main(x):\n    return helper(x)\n",
            "python",
        );
        let main = table.get("main").unwrap();
        assert_eq!(main.imports, vec!["from __functions__ import helper".to_string()]);
    }

    #[test]
    fn a_snippet_with_no_calls_gets_no_imports() {
        let table = FunctionTable::new();
        table.register("standalone", "def standalone():\n    return 1\n", "python");
        assert!(table.get("standalone").unwrap().imports.is_empty());
    }
}
