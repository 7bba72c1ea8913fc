#![deny(missing_docs)]
//! Learning trigger, extraction, and the async learning pool.
//!
//! At turn boundaries, a [`LearningStrategy`] decides whether a turn
//! carries reusable signal; if so, an [`ExperienceExtractor`] composes
//! a prompt and hands it to a `Judge` collaborator, and a
//! [`LearningRepository`] persists whatever comes back through C6. The
//! whole thing runs either inline or on a dedicated [`LearningPool`]
//! so a slow judge never stalls a turn.

pub mod engine;
pub mod error;
pub mod extractor;
pub mod pool;
pub mod repository;
pub mod trigger;

pub use engine::{LearningEngine, DEFAULT_POOL_CAPACITY};
pub use error::LearningError;
pub use extractor::{ExperienceExtractor, Judge, JUDGE_SYSTEM_PROMPT};
pub use pool::LearningPool;
pub use repository::LearningRepository;
pub use trigger::{
    DefaultLearningStrategy, ExecutionMode, LearningStrategy, LearningTriggerContext,
    ToolCallTrace, TriggerDecision,
};
