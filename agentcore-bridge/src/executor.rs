//! The sandbox boundary. Running untrusted generated code is out of
//! scope here — this crate defines the contract the bridge drives and
//! ships an in-process test double; a real deployment plugs in an
//! actual sandboxed interpreter behind the same trait.

use async_trait::async_trait;

/// A language runtime capable of executing a code snippet's top-level
/// function call and returning its value.
///
/// `code` is the full snippet (already registered in the function
/// table); `call_expr` is the rendered call expression for the
/// specific invocation being performed. Implementations decide how to
/// combine the two (e.g. appending `call_expr` as the program's entry
/// point).
///
/// On failure the implementation must return [`BridgeError::ExecutionFailed`]
/// with `stack` populated from the interpreter's traceback whenever one
/// is available, so the bridge can carry it into the snippet's
/// [`ExecutionRecord`](crate::record::ExecutionRecord) rather than
/// collapsing it into the error text alone.
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Execute `call_expr` against `code` and return the call's value.
    async fn execute(
        &self,
        code: &str,
        call_expr: &str,
    ) -> Result<serde_json::Value, crate::error::BridgeError>;
}

/// An in-process test double standing in for a real sandboxed
/// interpreter. Returns a scripted value for each call expression it
/// sees, and an error (optionally carrying a scripted traceback) for
/// call expressions it doesn't recognize or was told to fail.
#[derive(Default)]
pub struct ScriptedExecutor {
    scripts: std::collections::HashMap<String, serde_json::Value>,
    failures: std::collections::HashMap<String, (String, Option<String>)>,
}

impl ScriptedExecutor {
    /// Create an empty scripted executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a return value for an exact call expression.
    pub fn script(mut self, call_expr: impl Into<String>, value: serde_json::Value) -> Self {
        self.scripts.insert(call_expr.into(), value);
        self
    }

    /// Script a failure, with a traceback, for an exact call expression.
    pub fn fail_with_traceback(
        mut self,
        call_expr: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        self.failures
            .insert(call_expr.into(), (message.into(), Some(stack.into())));
        self
    }
}

#[async_trait]
impl CodeExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        _code: &str,
        call_expr: &str,
    ) -> Result<serde_json::Value, crate::error::BridgeError> {
        if let Some((message, stack)) = self.failures.get(call_expr) {
            return Err(crate::error::BridgeError::ExecutionFailed {
                message: message.clone(),
                stack: stack.clone(),
            });
        }
        self.scripts
            .get(call_expr)
            .cloned()
            .ok_or_else(|| crate::error::BridgeError::ExecutionFailed {
                message: format!("no script for call: {call_expr}"),
                stack: None,
            })
    }
}
