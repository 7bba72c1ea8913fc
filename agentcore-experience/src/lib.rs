#![deny(missing_docs)]
//! Experience store and scoped query.
//!
//! An [`Experience`] is a persisted, retrievable record of reusable
//! signal the learning loop extracted from a completed turn. This
//! crate owns the data model, the [`ExperienceStore`] trait and its
//! in-memory implementation, and the scope-resolution query path used
//! to rank retrieval results by specificity.

pub mod error;
pub mod experience;
pub mod query;
pub mod store;

pub use error::ExperienceError;
pub use experience::{
    Artifact, Experience, ExperienceId, ExperienceMetadata, ExperienceType, FastIntentRule, Scope,
};
pub use query::{effective_content, run_query, scope_specificity, ExperienceQuery, QueryContext};
pub use store::{ExperienceStore, InMemoryExperienceStore};
