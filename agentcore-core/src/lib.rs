//! # agentcore-core — shared primitives for the agentcore runtime
//!
//! This crate carries the types every other agentcore crate depends
//! on: typed ids, the turn-scoped state map, a stable wire-format
//! duration, and the configuration surface.
//!
//! Nothing in this crate talks to a model provider, a sandbox, or a
//! storage backend — those are the concerns of the crates built on
//! top of it.
//!
//! ## Dependency Notes
//!
//! This crate depends on `serde_json::Value` for extension data
//! fields (tool inputs, state values, custom payloads). JSON is the
//! universal interchange format here; the alternative, a generic
//! `T: Serialize`, would complicate the state map's object safety
//! without practical benefit.

#![deny(missing_docs)]

pub mod config;
pub mod duration;
pub mod error;
pub mod id;
pub mod state;

pub use config::Config;
pub use duration::DurationMs;
pub use error::{ConfigError, StateError};
pub use id::{SessionId, SuiteId, TurnId, UserId};
pub use state::{InMemoryState, StateMap};
