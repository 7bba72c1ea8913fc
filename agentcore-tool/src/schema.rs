//! The schema registry: declared and effective (declared ⊔ observed)
//! return schemas per tool, and the observation pipeline that widens
//! them over time.

use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where a schema's knowledge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSource {
    /// Seeded from the tool definition at registration time.
    Declared,
    /// Learned from an observed call result.
    Observed,
}

/// A schema that is declared up front at tool registration.
#[derive(Debug, Clone)]
pub struct DeclaredSchema {
    /// The declared success shape.
    pub success: Shape,
    /// Human-readable description of the return value.
    pub description: Option<String>,
    /// A best-effort type hint, used when stub rendering can't derive one.
    pub type_hint: Option<String>,
}

/// The return schema tracked for one tool: a success shape, an
/// optional error shape, descriptive metadata, and provenance.
#[derive(Debug)]
pub struct ReturnSchema {
    /// The current effective success shape, or `None` if never seen.
    pub success: Option<Shape>,
    /// The current effective error shape, or `None` if never seen.
    pub error: Option<Shape>,
    /// Human-readable description of the return value.
    pub description: Option<String>,
    /// A best-effort type hint.
    pub type_hint: Option<String>,
    /// Number of `observe` calls folded into this schema.
    pub observation_count: u64,
    /// Epoch-millis timestamp of the most recent update.
    pub last_updated_at: i64,
    /// Where this schema's knowledge came from.
    pub sources: HashSet<SchemaSource>,
}

impl ReturnSchema {
    fn empty() -> Self {
        Self {
            success: None,
            error: None,
            description: None,
            type_hint: None,
            observation_count: 0,
            last_updated_at: now_millis(),
            sources: HashSet::new(),
        }
    }

    fn from_declared(declared: &DeclaredSchema) -> Self {
        Self {
            success: Some(declared.success.clone()),
            error: None,
            description: declared.description.clone(),
            type_hint: declared.type_hint.clone(),
            observation_count: 0,
            last_updated_at: now_millis(),
            sources: HashSet::from([SchemaSource::Declared]),
        }
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

struct SchemaEntry {
    declared: Option<DeclaredSchema>,
    effective: ReturnSchema,
}

/// Holds declared and effective return schemas for every tool that
/// has either been registered with a declared schema or observed at
/// least once.
///
/// Writes are serialized per tool name via a per-entry [`Mutex`];
/// reads take a snapshot clone so they never block behind an
/// in-flight observation.
#[derive(Default)]
pub struct SchemaRegistry {
    entries: RwLock<HashMap<String, Mutex<SchemaEntry>>>,
}

impl SchemaRegistry {
    /// Create an empty schema registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed both the declared and effective mapping for `name`. Source set = {DECLARED}.
    pub fn register_declared(&self, name: &str, schema: DeclaredSchema) {
        let effective = ReturnSchema::from_declared(&schema);
        let entry = SchemaEntry {
            declared: Some(schema),
            effective,
        };
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_owned(), Mutex::new(entry));
        tracing::debug!(tool = name, "registered declared return schema");
    }

    /// Fold an observed call result into `name`'s effective schema.
    /// Never fails — callers should log-and-drop errors from malformed
    /// payloads rather than propagate them.
    pub fn observe(&self, name: &str, payload: &serde_json::Value, success: bool) {
        let observed = Shape::infer(payload);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let entry = entries
            .entry(name.to_owned())
            .or_insert_with(|| Mutex::new(SchemaEntry { declared: None, effective: ReturnSchema::empty() }));
        let entry = entry.get_mut().unwrap_or_else(|e| e.into_inner());

        if success {
            entry.effective.success = Some(match entry.effective.success.take() {
                Some(current) => Shape::merge(current, observed),
                None => observed,
            });
        } else {
            entry.effective.error = Some(match entry.effective.error.take() {
                Some(current) => Shape::merge(current, observed),
                None => observed,
            });
        }
        entry.effective.observation_count += 1;
        entry.effective.last_updated_at = now_millis();
        entry.effective.sources.insert(SchemaSource::Observed);
        tracing::debug!(tool = name, success, "observed tool return value");
    }

    /// Snapshot the effective schema for `name`, if any knowledge exists.
    pub fn get(&self, name: &str) -> Option<ReturnSchema> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(name)
            .map(|entry| entry.lock().unwrap_or_else(|e| e.into_inner()).effective.clone())
    }

    /// Revert `name`'s effective mapping back to its declared schema
    /// (or to empty, if nothing was ever declared).
    pub fn clear_observed(&self, name: &str) {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = entries.get(name) {
            let mut entry = entry.lock().unwrap_or_else(|e| e.into_inner());
            entry.effective = match &entry.declared {
                Some(declared) => ReturnSchema::from_declared(declared),
                None => ReturnSchema::empty(),
            };
        }
    }

    /// Revert every tool's effective mapping back to its declared schema.
    pub fn clear_all_observed(&self) {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        for entry in entries.values() {
            let mut entry = entry.lock().unwrap_or_else(|e| e.into_inner());
            entry.effective = match &entry.declared {
                Some(declared) => ReturnSchema::from_declared(declared),
                None => ReturnSchema::empty(),
            };
        }
    }
}

impl Clone for ReturnSchema {
    fn clone(&self) -> Self {
        Self {
            success: self.success.clone(),
            error: self.error.clone(),
            description: self.description.clone(),
            type_hint: self.type_hint.clone(),
            observation_count: self.observation_count,
            last_updated_at: self.last_updated_at,
            sources: self.sources.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Primitive;
    use serde_json::json;

    #[test]
    fn round_trip_register_then_clear_observed() {
        let registry = SchemaRegistry::new();
        let declared = DeclaredSchema {
            success: Shape::primitive(Primitive::Integer),
            description: Some("a sum".into()),
            type_hint: Some("int".into()),
        };
        registry.register_declared("add", declared);
        registry.observe("add", &json!("oops"), true);
        registry.clear_observed("add");

        let schema = registry.get("add").unwrap();
        assert_eq!(schema.success, Some(Shape::primitive(Primitive::Integer)));
        assert_eq!(schema.observation_count, 0);
        assert_eq!(schema.sources, HashSet::from([SchemaSource::Declared]));
    }

    #[test]
    fn repeated_identical_observation_holds_shape_and_increments_count() {
        let registry = SchemaRegistry::new();
        let payload = json!({"ok": true});
        for _ in 0..3 {
            registry.observe("lookup", &payload, true);
        }
        let schema = registry.get("lookup").unwrap();
        assert_eq!(schema.observation_count, 3);
        assert_eq!(schema.success, Some(Shape::infer(&payload)));
    }

    #[test]
    fn success_and_error_shapes_tracked_separately() {
        let registry = SchemaRegistry::new();
        registry.observe("reply", &json!({"ok": true}), true);
        registry.observe("reply", &json!({"error": "bad"}), false);
        let schema = registry.get("reply").unwrap();
        assert!(schema.success.is_some());
        assert!(schema.error.is_some());
    }
}
