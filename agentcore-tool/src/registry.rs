//! The tool registry: the authoritative, process-wide set of tools
//! the agent can call.

use crate::error::ToolError;
use crate::schema::{ReturnSchema, SchemaRegistry};
use crate::tool::{ToolDef, ToolRecord};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Owns the authoritative set of registered tools and their schema
/// observations.
///
/// Modeled as an explicitly-constructed, explicitly-passed handle
/// rather than module-level state: its lifetime is tied to whoever
/// builds the agent runtime, and it must exist before any hook can
/// fire.
#[derive(Default)]
pub struct ToolRegistry {
    records: RwLock<HashMap<String, Arc<ToolRecord>>>,
    aliases: RwLock<HashMap<String, String>>,
    schemas: SchemaRegistry,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a tool. Fails synchronously if the name is blank or
    /// already registered; on success, seeds the schema registry with
    /// the tool's declared return schema (if any) under source {DECLARED}.
    pub fn register(&self, record: ToolRecord) -> Result<(), ToolError> {
        let name = record.def.name.clone();
        if name.trim().is_empty() {
            return Err(ToolError::BlankName);
        }
        {
            let records = self.records.read().unwrap_or_else(|e| e.into_inner());
            if records.contains_key(&name) {
                return Err(ToolError::DuplicateName(name));
            }
        }
        if let Some(declared) = &record.def.return_schema {
            self.schemas.register_declared(&name, declared.clone());
        }
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.clone(), Arc::new(record));
        tracing::debug!(tool = name.as_str(), "registered tool");
        Ok(())
    }

    /// Register an alias that resolves to an already-registered tool name.
    pub fn register_alias(&self, alias: impl Into<String>, name: impl Into<String>) {
        self.aliases
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(alias.into(), name.into());
    }

    /// Look up a tool by its canonical name.
    pub fn get_tool(&self, name: &str) -> Option<Arc<ToolRecord>> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Look up a tool by a previously registered alias.
    pub fn get_tool_by_alias(&self, alias: &str) -> Option<Arc<ToolRecord>> {
        let name = self
            .aliases
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(alias)
            .cloned()?;
        self.get_tool(&name)
    }

    /// All registered tools, in no particular order.
    pub fn get_all_tools(&self) -> Vec<Arc<ToolRecord>> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    /// Tools whose declared supported-language set includes `lang`
    /// (or is empty, meaning "all languages").
    pub fn get_tools_for_language(&self, lang: &str) -> Vec<Arc<ToolRecord>> {
        self.get_all_tools()
            .into_iter()
            .filter(|record| record.def.supports_language(lang))
            .collect()
    }

    /// Fetch just the definition for `name`.
    pub fn get_tool_definition(&self, name: &str) -> Option<ToolDef> {
        self.get_tool(name).map(|record| record.def.clone())
    }

    /// Fetch the current effective return schema for `name`.
    pub fn get_return_schema(&self, name: &str) -> Option<ReturnSchema> {
        self.schemas.get(name)
    }

    /// The schema registry backing this tool registry's observations.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Invoke a tool by name, then fire-and-forget an observation of
    /// the result into the schema registry. This mirrors the bridge's
    /// call contract but is exposed here so any caller (not just C2)
    /// gets schema observation for free.
    pub async fn call(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let record = self
            .get_tool(name)
            .ok_or_else(|| ToolError::NotFound(name.to_owned()))?;
        let result = record.implementation.call(input).await;
        match &result {
            Ok(value) => self.schemas.observe(name, value, true),
            Err(err) => self
                .schemas
                .observe(name, &serde_json::json!({ "error": err.to_string() }), false),
        }
        result
    }
}

impl Clone for ToolDef {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            return_schema: self.return_schema.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
