//! Prompt contributors — a second, narrower extension point than
//! [`crate::hook::Hook`], used by code that only needs to add text to
//! the system prompt ahead of a model call rather than arbitrary state
//! updates.

use agentcore_core::StateMap;

/// Text a single contributor adds to the prompt.
#[derive(Debug, Default, Clone)]
pub struct PromptContribution {
    /// Text prepended before the rest of the system prompt.
    pub system_prepend: Option<String>,
    /// Text appended after the rest of the system prompt.
    pub system_append: Option<String>,
    /// Messages prepended to the outgoing message list.
    pub messages_prepend: Vec<serde_json::Value>,
    /// Messages appended to the outgoing message list.
    pub messages_append: Vec<serde_json::Value>,
}

/// Something that adds text to the system prompt ahead of a model call.
pub trait PromptContributor: Send + Sync {
    /// Contributors run in ascending priority order; ties keep
    /// registration order.
    fn priority(&self) -> i32;

    /// Produce this contributor's text given the turn's current state.
    fn contribute(&self, state: &dyn StateMap) -> PromptContribution;
}

/// Aggregates every registered [`PromptContributor`] into one
/// [`PromptContribution`], in ascending-priority order.
#[derive(Default)]
pub struct PromptContributorManager {
    contributors: Vec<Box<dyn PromptContributor>>,
}

impl PromptContributorManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contributor.
    pub fn add(&mut self, contributor: Box<dyn PromptContributor>) {
        self.contributors.push(contributor);
    }

    /// Run every contributor in ascending-priority order and merge
    /// their text, joining prepends/appends with a blank line.
    pub fn aggregate(&self, state: &dyn StateMap) -> PromptContribution {
        let mut ordered: Vec<&Box<dyn PromptContributor>> = self.contributors.iter().collect();
        ordered.sort_by_key(|c| c.priority());

        let mut prepends = Vec::new();
        let mut appends = Vec::new();
        let mut messages_prepend = Vec::new();
        let mut messages_append = Vec::new();
        for contributor in ordered {
            let contribution = contributor.contribute(state);
            if let Some(text) = contribution.system_prepend {
                prepends.push(text);
            }
            if let Some(text) = contribution.system_append {
                appends.push(text);
            }
            messages_prepend.extend(contribution.messages_prepend);
            messages_append.extend(contribution.messages_append);
        }

        PromptContribution {
            system_prepend: non_empty_join(prepends),
            system_append: non_empty_join(appends),
            messages_prepend,
            messages_append,
        }
    }
}

fn non_empty_join(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcore_core::InMemoryState;

    struct Fixed {
        priority: i32,
        text: &'static str,
    }

    impl PromptContributor for Fixed {
        fn priority(&self) -> i32 {
            self.priority
        }
        fn contribute(&self, _state: &dyn StateMap) -> PromptContribution {
            PromptContribution {
                system_append: Some(self.text.to_string()),
                ..Default::default()
            }
        }
    }

    #[test]
    fn contributors_merge_in_ascending_priority_order() {
        let mut manager = PromptContributorManager::new();
        manager.add(Box::new(Fixed { priority: 10, text: "second" }));
        manager.add(Box::new(Fixed { priority: 1, text: "first" }));
        let state = InMemoryState::new();
        let merged = manager.aggregate(&state);
        assert_eq!(merged.system_append.unwrap(), "first\n\nsecond");
    }

    #[test]
    fn no_contributors_yields_no_contribution() {
        let manager = PromptContributorManager::new();
        let state = InMemoryState::new();
        let merged = manager.aggregate(&state);
        assert!(merged.system_prepend.is_none());
        assert!(merged.system_append.is_none());
    }
}
