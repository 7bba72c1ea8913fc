//! The experience record and the structures it's built from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A generated, globally unique experience identifier.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExperienceId(pub String);

impl ExperienceId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What category of turn this experience was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    /// Extracted from a CodeAct turn.
    Code,
    /// Extracted from a React-mode turn.
    React,
    /// Neither code- nor react-specific.
    Common,
}

/// An experience's visibility. Two scopes combine multiplicatively
/// when both attributes match the query context (see
/// [`crate::query::scope_specificity`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Visible to everyone.
    Global,
    /// Visible to a team.
    Team,
    /// Visible to one user.
    User,
    /// Visible within one project.
    Project,
}

/// A structured artifact an experience may carry: either a code
/// snippet or a planned sequence of tool calls.
///
/// Tool references are stored by name only — never by handle into the
/// registry — so artifacts stay plain value objects with no cycle back
/// into the tool registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    /// A code snippet.
    Code {
        /// The snippet's language.
        language: String,
        /// The snippet's source.
        body: String,
        /// An optional human description of what it does.
        description: Option<String>,
    },
    /// A planned sequence of tool calls, referenced by name only.
    ToolPlan {
        /// The tool names, in call order.
        steps: Vec<String>,
    },
}

/// A condition that lets a fast-intent lookup match an experience
/// without running the full retrieval path.
///
/// Only `MetadataEquals` and `MessagePrefix` are honored; any other
/// wire value deserializes into `Unknown` and never matches, rather
/// than failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum FastIntentRule {
    /// Matches when `state[key] == value`.
    MetadataEquals {
        /// The state key to compare.
        key: String,
        /// The expected value.
        value: serde_json::Value,
    },
    /// Matches when the triggering message starts with `prefix`.
    MessagePrefix {
        /// The required prefix.
        prefix: String,
    },
    /// An unrecognized condition type. Never matches.
    #[serde(other)]
    Unknown,
}

impl FastIntentRule {
    /// Evaluate this rule against a state snapshot and the triggering message.
    pub fn matches(&self, state: &std::collections::HashMap<String, serde_json::Value>, message: &str) -> bool {
        match self {
            FastIntentRule::MetadataEquals { key, value } => state.get(key) == Some(value),
            FastIntentRule::MessagePrefix { prefix } => message.starts_with(prefix.as_str()),
            FastIntentRule::Unknown => false,
        }
    }
}

/// Attribution and provenance metadata carried alongside an experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceMetadata {
    /// Where this experience came from (e.g. "llm_generated", "manual").
    pub source: Option<String>,
    /// A confidence score in `[0.0, 1.0]`, if the source provides one.
    pub confidence: Option<f64>,
    /// Epoch-millis creation timestamp.
    pub created_at: i64,
    /// Epoch-millis last-update timestamp.
    pub updated_at: i64,
}

/// A persisted, retrievable record of reusable signal extracted from a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// The experience's unique id.
    pub id: ExperienceId,
    /// What kind of turn this was extracted from.
    pub experience_type: ExperienceType,
    /// A short human-readable title.
    pub title: String,
    /// The experience's body text. May be blank if an artifact is present
    /// (see [`crate::query::effective_content`]).
    pub content: String,
    /// An optional structured artifact.
    pub artifact: Option<Artifact>,
    /// An optional fast-intent match rule.
    pub fast_intent: Option<FastIntentRule>,
    /// Visibility scope.
    pub scope: Scope,
    /// The owning user, if any.
    pub owner: Option<String>,
    /// The owning project, if any.
    pub project: Option<String>,
    /// The owning repository, if any.
    pub repo: Option<String>,
    /// The experience's language tag, if applicable.
    pub language: Option<String>,
    /// Free-form tags.
    pub tags: HashSet<String>,
    /// Attribution and provenance metadata.
    pub metadata: ExperienceMetadata,
}
