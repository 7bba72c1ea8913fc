//! Runtime configuration surface.
//!
//! Plain structs with `Default` impls and serde derives — there is no
//! config-loading crate in play. Callers build a [`Config`] however
//! they like (environment variables, a file, hardcoded values in a
//! test) and hand it to the runtime.

use serde::{Deserialize, Serialize};

/// Top-level configuration for an agentcore runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trigger-tool and scheduler configuration.
    pub trigger: TriggerConfig,
    /// Evaluation-hook configuration.
    pub evaluation: EvaluationConfig,
    /// Reply-tool configuration.
    pub reply: ReplyConfig,
    /// Experience-store configuration.
    pub experience: ExperienceConfig,
    /// Learning-loop configuration.
    pub learning: LearningConfig,
    /// Prompt-contributor configuration.
    pub prompt: PromptConfig,
}

/// Gates trigger-tool registration and the trigger scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Gates trigger-tool registration and scheduler startup.
    pub enabled: bool,
    /// Thread pool size for the trigger scheduler.
    pub scheduler_pool_size: usize,
    /// Grace period for scheduler shutdown, in seconds.
    pub scheduler_await_termination_seconds: u64,
    /// Default retry policy for triggered executions.
    pub execution: TriggerExecutionConfig,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scheduler_pool_size: 4,
            scheduler_await_termination_seconds: 10,
            execution: TriggerExecutionConfig::default(),
        }
    }
}

/// Default retry policy and timeout for triggered executions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerExecutionConfig {
    /// Default maximum retry count.
    pub default_max_retries: u32,
    /// Default delay between retries, in milliseconds.
    pub default_retry_delay_ms: u64,
    /// Per-trigger execution timeout in milliseconds. `0` means unbounded.
    pub execution_timeout_ms: u64,
}

impl Default for TriggerExecutionConfig {
    fn default() -> Self {
        Self {
            default_max_retries: 3,
            default_retry_delay_ms: 1000,
            execution_timeout_ms: 0,
        }
    }
}

/// Whether and how evaluation hooks invoke suites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationConfig {
    /// Whether evaluation hooks use async evaluation.
    #[serde(rename = "async")]
    pub async_enabled: bool,
    /// Per-suite timeout when invoked from a hook, in milliseconds.
    pub timeout_ms: u64,
    /// Gate and identify the input-routing suite.
    pub input_routing: InputRoutingConfig,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            async_enabled: false,
            timeout_ms: 30_000,
            input_routing: InputRoutingConfig::default(),
        }
    }
}

/// Gates and identifies the input-routing evaluation suite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRoutingConfig {
    /// Whether the input-routing suite runs.
    pub enabled: bool,
    /// The suite id to invoke for input routing, if enabled.
    pub suite_id: Option<String>,
}

/// Gates reply-tool registration and lists the reply tools themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// Gate reply-tool registration.
    pub enabled: bool,
    /// Declarative reply-tool list.
    pub tools: Vec<ReplyToolConfig>,
}

/// One declaratively configured reply tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyToolConfig {
    /// Tool name, as registered with the tool registry.
    pub name: String,
    /// Channel code this reply tool targets.
    pub channel_code: String,
    /// Human-readable description surfaced in generated stubs.
    pub description: String,
    /// Whether this tool is enabled in React mode.
    #[serde(default)]
    pub enabled_in_react: bool,
    /// Whether this tool is enabled in CodeAct mode.
    #[serde(default)]
    pub enabled_in_codeact: bool,
    /// Declared parameter names for the reply tool's schema.
    #[serde(default)]
    pub parameters: Vec<String>,
}

/// Controls whether seed experiences are loaded at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Load demo/seed experiences.
    pub demo_enabled: bool,
}

/// Schedule configuration for offline learning tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Offline learning task schedules.
    pub offline: OfflineLearningConfig,
}

/// Holds the list of scheduled offline learning tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineLearningConfig {
    /// Configured offline learning tasks.
    pub tasks: Vec<OfflineTaskConfig>,
}

/// One scheduled offline learning task.
///
/// Exactly one of `cron_expression` or `interval_ms` is honored,
/// selected by `schedule_mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineTaskConfig {
    /// Task identifier.
    pub name: String,
    /// How this task is scheduled.
    pub schedule_mode: ScheduleMode,
    /// Cron expression, used when `schedule_mode` is `Cron`.
    #[serde(default)]
    pub cron_expression: Option<String>,
    /// Fixed interval in milliseconds, used when `schedule_mode` is `Interval`.
    #[serde(default)]
    pub interval_ms: Option<u64>,
}

/// Which field on [`OfflineTaskConfig`] selects the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Use `cron_expression`.
    Cron,
    /// Use `interval_ms`.
    Interval,
}

/// Gates prompt-contributor hooks per agent mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Gate prompt-contributor hooks for React mode.
    pub react_enabled: bool,
    /// Gate prompt-contributor hooks for CodeAct mode.
    pub codeact_enabled: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            react_enabled: true,
            codeact_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_disables_trigger_and_evaluation_async() {
        let config = Config::default();
        assert!(!config.trigger.enabled);
        assert!(!config.evaluation.async_enabled);
        assert!(config.prompt.react_enabled);
        assert!(config.prompt.codeact_enabled);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = Config::default();
        config.reply.tools.push(ReplyToolConfig {
            name: "reply".into(),
            channel_code: "chat".into(),
            description: "reply to the user".into(),
            enabled_in_react: true,
            enabled_in_codeact: false,
            parameters: vec!["text".into()],
        });
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reply.tools.len(), 1);
        assert_eq!(back.reply.tools[0].name, "reply");
    }
}
