//! The per-snippet state machine and the execution record it produces.

/// A code snippet's position in the bridge's linear state machine.
///
/// Transitions are strictly linear: RECEIVED → PARSED → REGISTERED →
/// INVOKED → {COMPLETED, FAILED}. A FAILED transition at any step is
/// terminal and carries the error that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetState {
    /// The snippet has been submitted but not yet parsed.
    Received,
    /// The snippet's function name was extracted.
    Parsed,
    /// The snippet was admitted to the function table.
    Registered,
    /// The snippet's function call was dispatched to the executor.
    Invoked,
    /// Execution finished and produced a value.
    Completed,
    /// Execution failed at some step.
    Failed,
}

/// The outcome of running one code snippet through the bridge.
///
/// A FAILED record re-enters the agent loop with the error visible in
/// state — it is not an exception the caller needs to catch.
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    /// The snippet's final state: `Completed` or `Failed`.
    pub state: SnippetState,
    /// The function name the snippet was registered under, once known.
    pub function_name: Option<String>,
    /// The snippet's return value, if it completed.
    pub result: Option<serde_json::Value>,
    /// Error text, if the snippet failed.
    pub error: Option<String>,
    /// The interpreter's stack trace, if the snippet failed and one
    /// was captured.
    pub stack: Option<String>,
}

impl ExecutionRecord {
    /// Build a COMPLETED record.
    pub fn completed(function_name: String, result: serde_json::Value) -> Self {
        Self {
            state: SnippetState::Completed,
            function_name: Some(function_name),
            result: Some(result),
            error: None,
            stack: None,
        }
    }

    /// Build a FAILED record at the given terminal step, carrying the
    /// error text and stack trace that caused it.
    pub fn failed(
        function_name: Option<String>,
        error: impl Into<String>,
        stack: Option<String>,
    ) -> Self {
        Self {
            state: SnippetState::Failed,
            function_name,
            result: None,
            error: Some(error.into()),
            stack,
        }
    }
}
