#![deny(missing_docs)]
//! The code-acting execution bridge.
//!
//! When the model emits a code block, the bridge makes the currently
//! registered tools and the turn's state addressable from within that
//! code (via [`proxy::ToolProxy`] and [`proxy::StateProxy`]), drives
//! the snippet through a linear state machine, and surfaces its final
//! value back into the turn.

pub mod bridge;
pub mod error;
pub mod executor;
pub mod function_table;
pub mod proxy;
pub mod record;
pub mod render;

pub use bridge::CodeBridge;
pub use error::BridgeError;
pub use executor::{CodeExecutor, ScriptedExecutor};
pub use function_table::{CompiledFunction, FunctionTable};
pub use proxy::{StateProxy, ToolProxy};
pub use record::{ExecutionRecord, SnippetState};
pub use render::{extract_function_name, render_function_call, value_to_literal};
