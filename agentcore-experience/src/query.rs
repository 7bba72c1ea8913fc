//! Scoped retrieval: filtering, scope-resolution ranking, and the
//! effective-content synthesis rule.

use crate::experience::{Artifact, Experience, ExperienceType, Scope};
use std::collections::HashSet;

/// The caller's context a query is resolved against.
///
/// `team` is not named in the retrieval contract's context fields
/// (user/project/repo/task/language) but is required to resolve TEAM
/// scope at all — without it a TEAM-scoped experience could never
/// match any query context.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// The acting user.
    pub user: Option<String>,
    /// The acting user's team.
    pub team: Option<String>,
    /// The active project.
    pub project: Option<String>,
    /// The active repository.
    pub repo: Option<String>,
    /// A free-text description of the current task.
    pub task: Option<String>,
    /// The language in play.
    pub language: Option<String>,
}

/// Filters applied before scope resolution.
#[derive(Debug, Clone, Default)]
pub struct ExperienceQuery {
    /// Restrict to one experience type.
    pub experience_type: Option<ExperienceType>,
    /// Restrict to one language tag.
    pub language: Option<String>,
    /// Require every one of these tags to be present.
    pub tags: HashSet<String>,
    /// Restrict to one scope.
    pub scope: Option<Scope>,
}

/// Rank an experience's specificity against a query context, highest
/// first: USER∧PROJECT(6) > USER(5) > TEAM∧PROJECT(4) > TEAM(3) >
/// PROJECT(2) > GLOBAL(1). Returns `None` if the experience isn't
/// visible in this context at all (e.g. a PROJECT-scoped experience
/// for a different project).
pub fn scope_specificity(experience: &Experience, ctx: &QueryContext) -> Option<u8> {
    let project_match = ctx.project.is_some() && experience.project == ctx.project;
    match experience.scope {
        Scope::Global => Some(1),
        Scope::Project => project_match.then_some(2),
        Scope::Team => {
            let team_match = ctx.team.is_some() && experience.owner == ctx.team;
            team_match.then_some(if project_match { 4 } else { 3 })
        }
        Scope::User => {
            let user_match = ctx.user.is_some() && experience.owner == ctx.user;
            user_match.then_some(if project_match { 6 } else { 5 })
        }
    }
}

/// Run `query` against `experiences` in the given `ctx`, returning
/// matches sorted by scope specificity (descending) then
/// `updated_at` (descending).
pub fn run_query<'a>(
    query: &ExperienceQuery,
    ctx: &QueryContext,
    experiences: impl IntoIterator<Item = &'a Experience>,
) -> Vec<&'a Experience> {
    let mut matches: Vec<(&Experience, u8)> = experiences
        .into_iter()
        .filter_map(|exp| {
            if let Some(t) = query.experience_type {
                if exp.experience_type != t {
                    return None;
                }
            }
            if let Some(lang) = &query.language {
                if exp.language.as_deref() != Some(lang.as_str()) {
                    return None;
                }
            }
            if let Some(scope) = query.scope {
                if exp.scope != scope {
                    return None;
                }
            }
            if !query.tags.is_subset(&exp.tags) {
                return None;
            }
            scope_specificity(exp, ctx).map(|rank| (exp, rank))
        })
        .collect();

    matches.sort_by(|(a, a_rank), (b, b_rank)| {
        b_rank
            .cmp(a_rank)
            .then_with(|| b.metadata.updated_at.cmp(&a.metadata.updated_at))
    });
    matches.into_iter().map(|(exp, _)| exp).collect()
}

/// The text to actually show for an experience: its own content if
/// non-blank, otherwise synthesized from a code artifact (an optional
/// description line, then a fenced code block).
pub fn effective_content(experience: &Experience) -> String {
    if !experience.content.trim().is_empty() {
        return experience.content.clone();
    }
    match &experience.artifact {
        Some(Artifact::Code { language, body, description }) => {
            let mut out = String::new();
            if let Some(description) = description {
                out.push_str(description);
                out.push_str("\n\n");
            }
            out.push_str(&format!("```{language}\n{body}\n```"));
            out
        }
        _ => experience.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::{ExperienceId, ExperienceMetadata};

    fn exp(scope: Scope, owner: Option<&str>, project: Option<&str>, updated_at: i64) -> Experience {
        Experience {
            id: ExperienceId::generate(),
            experience_type: ExperienceType::Common,
            title: "t".into(),
            content: "c".into(),
            artifact: None,
            fast_intent: None,
            scope,
            owner: owner.map(str::to_string),
            project: project.map(str::to_string),
            repo: None,
            language: None,
            tags: HashSet::new(),
            metadata: ExperienceMetadata {
                updated_at,
                ..Default::default()
            },
        }
    }

    #[test]
    fn scope_priority_orders_user_project_highest() {
        let ctx = QueryContext {
            user: Some("u1".into()),
            project: Some("p1".into()),
            ..Default::default()
        };
        let user_project = exp(Scope::User, Some("u1"), Some("p1"), 1);
        let user_only = exp(Scope::User, Some("u1"), None, 1);
        let global = exp(Scope::Global, None, None, 1);

        assert!(scope_specificity(&user_project, &ctx) > scope_specificity(&user_only, &ctx));
        assert!(scope_specificity(&user_only, &ctx) > scope_specificity(&global, &ctx));
    }

    #[test]
    fn project_scoped_experience_for_a_different_project_is_invisible() {
        let ctx = QueryContext {
            project: Some("p1".into()),
            ..Default::default()
        };
        let other_project = exp(Scope::Project, None, Some("p2"), 1);
        assert_eq!(scope_specificity(&other_project, &ctx), None);
    }

    #[test]
    fn query_sorts_by_specificity_then_recency() {
        let ctx = QueryContext {
            user: Some("u1".into()),
            ..Default::default()
        };
        let older_user = exp(Scope::User, Some("u1"), None, 1);
        let newer_user = exp(Scope::User, Some("u1"), None, 2);
        let global = exp(Scope::Global, None, None, 100);

        let all = vec![global.clone(), older_user.clone(), newer_user.clone()];
        let results = run_query(&ExperienceQuery::default(), &ctx, &all);
        assert_eq!(results[0].metadata.updated_at, 2);
        assert_eq!(results[1].metadata.updated_at, 1);
        assert_eq!(results[2].scope, Scope::Global);
    }

    #[test]
    fn effective_content_falls_back_to_code_artifact() {
        let mut experience = exp(Scope::Global, None, None, 1);
        experience.content = String::new();
        experience.artifact = Some(Artifact::Code {
            language: "python".into(),
            body: "print(1)".into(),
            description: Some("prints one".into()),
        });
        let content = effective_content(&experience);
        assert!(content.contains("prints one"));
        assert!(content.contains("```python\nprint(1)\n```"));
    }
}
