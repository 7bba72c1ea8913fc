//! Turning a trigger context into persistable experiences, via an
//! LLM-judge collaborator.

use crate::error::LearningError;
use crate::trigger::LearningTriggerContext;
use agentcore_experience::{Experience, ExperienceId, ExperienceMetadata, ExperienceType, Scope};
use async_trait::async_trait;
use serde_json::Value;

/// The fixed system prompt sent to the judge ahead of every extraction
/// request. Enumerates the only categories the extractor understands
/// ([`ExperienceType`]) and the JSON array shape the judge must reply
/// with.
pub const JUDGE_SYSTEM_PROMPT: &str = r#"You are an experience extractor for a coding agent platform.

Given a summary of one completed turn, decide whether it contains any
reusable lesson, pattern, or solved problem worth remembering. If so,
return a JSON array where each element has the shape:

{"category": "CODE" | "COMMON" | "REACT", "title": string, "content": string}

Categories:
- CODE: a reusable code snippet or pattern.
- REACT: a reusable reasoning/tool-use pattern from React-mode turns.
- COMMON: anything else worth remembering.

If nothing is worth keeping, return an empty array. Return the JSON
array and nothing else."#;

/// An external collaborator that judges a prompt and returns raw JSON
/// text. Stands in for a chat-completion provider.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Send `system_prompt` and `user_prompt` to the judge and return
    /// its raw reply text.
    async fn judge(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LearningError>;
}

/// Builds the extraction prompt, calls the judge, and promotes its
/// output into [`Experience`] records.
pub struct ExperienceExtractor<J: Judge> {
    judge: J,
}

impl<J: Judge> ExperienceExtractor<J> {
    /// Build an extractor around a judge collaborator.
    pub fn new(judge: J) -> Self {
        Self { judge }
    }

    /// Extract zero or more experiences from a trigger context.
    pub async fn extract(&self, ctx: &LearningTriggerContext) -> Result<Vec<Experience>, LearningError> {
        let prompt = build_prompt(ctx);
        let raw = self
            .judge
            .judge(JUDGE_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| LearningError::JudgeFailed(e.to_string()))?;

        let parsed: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|e| LearningError::MalformedJudgeOutput(e.to_string()))?;

        parsed.into_iter().map(promote).collect()
    }
}

fn build_prompt(ctx: &LearningTriggerContext) -> String {
    let mut out = String::new();

    if let Some(first_user) = ctx
        .messages
        .iter()
        .find(|m| m.get("role").and_then(Value::as_str) == Some("user"))
    {
        out.push_str("User request:\n");
        out.push_str(&first_user.to_string());
        out.push('\n');
    }

    if !ctx.generated_code.is_empty() {
        out.push_str("\nGenerated code (first two, truncated):\n");
        for entry in ctx.generated_code.iter().take(2) {
            let text = entry.to_string();
            let truncated: String = text.chars().take(400).collect();
            out.push_str(&truncated);
            out.push('\n');
        }
    }

    if !ctx.messages.is_empty() {
        out.push_str("\nLast turns:\n");
        let start = ctx.messages.len().saturating_sub(4);
        for message in &ctx.messages[start..] {
            out.push_str(&message.to_string());
            out.push('\n');
        }
    }

    if !ctx.tool_calls.is_empty() {
        out.push_str("\nTool usage:\n");
        for call in &ctx.tool_calls {
            out.push_str(&format!("- {} (success={})\n", call.name, call.success));
        }
    }

    out
}

fn promote(value: Value) -> Result<Experience, LearningError> {
    let category = value
        .get("category")
        .and_then(Value::as_str)
        .ok_or_else(|| LearningError::MalformedJudgeOutput("missing category".into()))?;
    let experience_type = match category {
        "CODE" => ExperienceType::Code,
        "REACT" => ExperienceType::React,
        "COMMON" => ExperienceType::Common,
        other => {
            return Err(LearningError::MalformedJudgeOutput(format!(
                "unknown category: {other}"
            )))
        }
    };
    let title = value
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("untitled")
        .to_string();
    let content = value
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut tags = std::collections::HashSet::new();
    tags.insert("llm_generated".to_string());

    Ok(Experience {
        id: ExperienceId::generate(),
        experience_type,
        title,
        content,
        artifact: None,
        fast_intent: None,
        scope: Scope::Global,
        owner: None,
        project: None,
        repo: None,
        language: None,
        tags,
        metadata: ExperienceMetadata {
            source: Some("llm_generated".into()),
            confidence: None,
            created_at: now_millis(),
            updated_at: now_millis(),
        },
    })
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
