//! The hook contract: what a hook sees and what it may hand back.

use crate::error::HookError;
use agentcore_core::{Config, StateMap};
use async_trait::async_trait;
use std::collections::HashMap;

/// The four points in a turn where hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Runs once, before the React/CodeAct loop starts.
    BeforeAgent,
    /// Runs once, after the loop produces its final reply.
    AfterAgent,
    /// Runs before each model call.
    BeforeModel,
    /// Runs after each model call.
    AfterModel,
}

/// What a hook hands back after inspecting the turn's state.
#[derive(Debug, Default, Clone)]
pub struct HookOutcome {
    /// State-map keys to write, applied immediately after this hook returns.
    pub updates: HashMap<String, serde_json::Value>,
    /// A label naming where control flow should jump to next, honored
    /// only if it appears in this hook's own `allowed_jumps()`.
    pub jump_to: Option<String>,
}

impl HookOutcome {
    /// An outcome with no updates and no jump.
    pub fn none() -> Self {
        Self::default()
    }
}

/// A single hook, registered at one or more [`HookPoint`]s.
///
/// A hook never halts a turn: a returned `Err` is logged and treated
/// as [`HookOutcome::none`]. A hook that wants to redirect control
/// flow returns a `jump_to` label declared in its own
/// [`Hook::allowed_jumps`] — labels outside that list are ignored.
#[async_trait]
pub trait Hook: Send + Sync {
    /// A stable, unique name for logging and diagnostics.
    fn name(&self) -> &str;

    /// The points this hook runs at.
    fn points(&self) -> &[HookPoint];

    /// Jump labels this hook is allowed to request. Defaults to none —
    /// a hook that never jumps doesn't need to override this.
    fn allowed_jumps(&self) -> &[String] {
        &[]
    }

    /// Inspect the turn's state and configuration, and hand back
    /// updates (and, optionally, a jump request).
    async fn invoke(&self, state: &dyn StateMap, config: &Config) -> Result<HookOutcome, HookError>;
}
