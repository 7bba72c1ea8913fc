#![deny(missing_docs)]
//! Hook pipeline and prompt-contributor composition.
//!
//! Hooks run at four fixed points in a turn (before/after the agent
//! loop, before/after each model call) and contribute state-map
//! updates; prompt contributors are a narrower extension point for
//! adding system-prompt text ahead of a model call.

pub mod error;
pub mod hook;
pub mod pipeline;
pub mod prompt;

pub use error::HookError;
pub use hook::{Hook, HookOutcome, HookPoint};
pub use pipeline::HookPipeline;
pub use prompt::{PromptContribution, PromptContributor, PromptContributorManager};
