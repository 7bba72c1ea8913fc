//! The turn-scoped state map — a single mapping from string key to
//! JSON value, read and written by every pipeline stage of a turn.
//!
//! Writes made during one pipeline stage are visible to subsequent
//! stages within the same turn (the map is single-writer per stage);
//! concurrent fan-out (the evaluation DAG) writes only to its own
//! per-node result keys, so no locking finer than the map itself is
//! required.

use crate::error::StateError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Well-known state keys written by the core pipeline.
pub mod keys {
    /// The turn's message list.
    pub const MESSAGES: &str = "messages";
    /// Code blocks generated by the model this turn.
    pub const GENERATED_CODE: &str = "generated_code";
    /// Execution records produced by the code-acting bridge.
    pub const EXECUTION_HISTORY: &str = "execution_history";
    /// The language the model is currently generating code in.
    pub const CURRENT_LANGUAGE: &str = "current_language";
    /// The acting user's id.
    pub const USER_ID: &str = "user_id";
}

/// A turn-scoped mapping from string key to opaque JSON value.
///
/// Implementations must support read, write, and atomic
/// compare-and-set; `get_all` backs prompt contributors and
/// evaluators that bind against the whole map rather than a single
/// key.
pub trait StateMap: Send + Sync {
    /// Read a value by key. Returns `None` if absent.
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Write a value, creating or overwriting the key.
    fn set(&self, key: &str, value: serde_json::Value);

    /// Whether a key is present.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Snapshot the entire map.
    fn get_all(&self) -> HashMap<String, serde_json::Value>;

    /// Atomically replace `key`'s value with `new` iff its current
    /// value equals `expected` (`None` means "key absent"). Returns
    /// `Ok(true)` on success, `Ok(false)` if the current value did
    /// not match `expected`.
    fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&serde_json::Value>,
        new: serde_json::Value,
    ) -> Result<bool, StateError>;
}

/// An in-memory, `RwLock`-backed state map — the only implementation
/// this crate ships. Durable or shared backends are layered on top by
/// callers that need them.
#[derive(Debug, Default)]
pub struct InMemoryState {
    inner: RwLock<HashMap<String, serde_json::Value>>,
}

impl InMemoryState {
    /// Create an empty state map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state map pre-populated with the given entries.
    pub fn with_entries(entries: HashMap<String, serde_json::Value>) -> Self {
        Self {
            inner: RwLock::new(entries),
        }
    }
}

impl StateMap for InMemoryState {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: serde_json::Value) {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_owned(), value);
    }

    fn get_all(&self) -> HashMap<String, serde_json::Value> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&serde_json::Value>,
        new: serde_json::Value,
    ) -> Result<bool, StateError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let current = guard.get(key);
        if current != expected {
            return Ok(false);
        }
        guard.insert(key.to_owned(), new);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get_round_trips() {
        let state = InMemoryState::new();
        state.set("x", json!(1));
        assert_eq!(state.get("x"), Some(json!(1)));
        assert!(state.has("x"));
        assert!(!state.has("y"));
    }

    #[test]
    fn compare_and_set_rejects_stale_expectation() {
        let state = InMemoryState::new();
        state.set("x", json!(1));
        assert!(!state
            .compare_and_set("x", Some(&json!(2)), json!(3))
            .unwrap());
        assert_eq!(state.get("x"), Some(json!(1)));

        assert!(state
            .compare_and_set("x", Some(&json!(1)), json!(3))
            .unwrap());
        assert_eq!(state.get("x"), Some(json!(3)));
    }

    #[test]
    fn compare_and_set_on_absent_key_requires_none() {
        let state = InMemoryState::new();
        assert!(state.compare_and_set("missing", None, json!(1)).unwrap());
        assert_eq!(state.get("missing"), Some(json!(1)));
    }

    #[test]
    fn get_all_snapshots_current_entries() {
        let state = InMemoryState::new();
        state.set("a", json!(1));
        state.set("b", json!(2));
        let snapshot = state.get_all();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("a"), Some(&json!(1)));
    }
}
