//! The experience store trait and an in-memory implementation.

use crate::error::ExperienceError;
use crate::experience::{Experience, ExperienceId, ExperienceType, Scope};
use crate::query::{run_query, ExperienceQuery, QueryContext};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Persists and retrieves experiences.
///
/// `search` has no default-viable implementation without a collaborator
/// (full-text or vector search is out of scope here) so it defaults to
/// an empty result rather than erroring — a store with nothing indexed
/// for free-text search simply contributes nothing to that path.
#[async_trait]
pub trait ExperienceStore: Send + Sync {
    /// Persist one experience, overwriting any existing record with the same id.
    async fn save(&self, experience: Experience) -> Result<(), ExperienceError>;

    /// Persist many experiences in one call.
    async fn batch_save(&self, experiences: Vec<Experience>) -> Result<(), ExperienceError>;

    /// Remove an experience by id. Not an error if it didn't exist.
    async fn delete_by_id(&self, id: &ExperienceId) -> Result<(), ExperienceError>;

    /// Fetch one experience by id.
    async fn find_by_id(&self, id: &ExperienceId) -> Result<Option<Experience>, ExperienceError>;

    /// Total experience count.
    async fn count(&self) -> Result<usize, ExperienceError>;

    /// Count experiences of a given type and scope.
    async fn count_by_type_and_scope(
        &self,
        experience_type: ExperienceType,
        scope: Scope,
    ) -> Result<usize, ExperienceError>;

    /// Fetch experiences of a given type and scope, optionally narrowed
    /// to an owner and/or project.
    async fn find_by_type_and_scope(
        &self,
        experience_type: ExperienceType,
        scope: Scope,
        owner: Option<&str>,
        project: Option<&str>,
    ) -> Result<Vec<Experience>, ExperienceError>;

    /// Run a scoped query, ranked by specificity then recency.
    async fn query(
        &self,
        query: &ExperienceQuery,
        ctx: &QueryContext,
    ) -> Result<Vec<Experience>, ExperienceError>;

    /// Free-text or semantic search. Defaults to no results.
    async fn search(&self, _text: &str) -> Result<Vec<Experience>, ExperienceError> {
        Ok(vec![])
    }
}

/// An in-memory [`ExperienceStore`], suitable for tests and for single-process deployments.
#[derive(Default)]
pub struct InMemoryExperienceStore {
    experiences: RwLock<HashMap<ExperienceId, Experience>>,
}

impl InMemoryExperienceStore {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExperienceStore for InMemoryExperienceStore {
    async fn save(&self, experience: Experience) -> Result<(), ExperienceError> {
        let mut guard = self.experiences.write().expect("experience store lock poisoned");
        guard.insert(experience.id.clone(), experience);
        Ok(())
    }

    async fn batch_save(&self, experiences: Vec<Experience>) -> Result<(), ExperienceError> {
        let mut guard = self.experiences.write().expect("experience store lock poisoned");
        for experience in experiences {
            guard.insert(experience.id.clone(), experience);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &ExperienceId) -> Result<(), ExperienceError> {
        let mut guard = self.experiences.write().expect("experience store lock poisoned");
        guard.remove(id);
        Ok(())
    }

    async fn find_by_id(&self, id: &ExperienceId) -> Result<Option<Experience>, ExperienceError> {
        let guard = self.experiences.read().expect("experience store lock poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, ExperienceError> {
        let guard = self.experiences.read().expect("experience store lock poisoned");
        Ok(guard.len())
    }

    async fn count_by_type_and_scope(
        &self,
        experience_type: ExperienceType,
        scope: Scope,
    ) -> Result<usize, ExperienceError> {
        let guard = self.experiences.read().expect("experience store lock poisoned");
        Ok(guard
            .values()
            .filter(|e| e.experience_type == experience_type && e.scope == scope)
            .count())
    }

    async fn find_by_type_and_scope(
        &self,
        experience_type: ExperienceType,
        scope: Scope,
        owner: Option<&str>,
        project: Option<&str>,
    ) -> Result<Vec<Experience>, ExperienceError> {
        let guard = self.experiences.read().expect("experience store lock poisoned");
        Ok(guard
            .values()
            .filter(|e| {
                e.experience_type == experience_type
                    && e.scope == scope
                    && owner.is_none_or(|o| e.owner.as_deref() == Some(o))
                    && project.is_none_or(|p| e.project.as_deref() == Some(p))
            })
            .cloned()
            .collect())
    }

    async fn query(
        &self,
        query: &ExperienceQuery,
        ctx: &QueryContext,
    ) -> Result<Vec<Experience>, ExperienceError> {
        let guard = self.experiences.read().expect("experience store lock poisoned");
        Ok(run_query(query, ctx, guard.values())
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::ExperienceMetadata;

    fn experience(scope: Scope, owner: Option<&str>) -> Experience {
        Experience {
            id: ExperienceId::generate(),
            experience_type: ExperienceType::Common,
            title: "t".into(),
            content: "c".into(),
            artifact: None,
            fast_intent: None,
            scope,
            owner: owner.map(str::to_string),
            project: None,
            repo: None,
            language: None,
            tags: Default::default(),
            metadata: ExperienceMetadata::default(),
        }
    }

    #[tokio::test]
    async fn save_then_find_by_id_round_trips() {
        let store = InMemoryExperienceStore::new();
        let e = experience(Scope::Global, None);
        let id = e.id.clone();
        store.save(e).await.unwrap();
        let found = store.find_by_id(&id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_by_id_removes_the_record() {
        let store = InMemoryExperienceStore::new();
        let e = experience(Scope::Global, None);
        let id = e.id.clone();
        store.save(e).await.unwrap();
        store.delete_by_id(&id).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_by_type_and_scope_filters_by_owner() {
        let store = InMemoryExperienceStore::new();
        store.save(experience(Scope::User, Some("alice"))).await.unwrap();
        store.save(experience(Scope::User, Some("bob"))).await.unwrap();

        let found = store
            .find_by_type_and_scope(ExperienceType::Common, Scope::User, Some("alice"), None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn search_defaults_to_empty() {
        let store = InMemoryExperienceStore::new();
        store.save(experience(Scope::Global, None)).await.unwrap();
        assert!(store.search("anything").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn query_resolves_by_scope_and_context() {
        let store = InMemoryExperienceStore::new();
        store.save(experience(Scope::Global, None)).await.unwrap();
        store.save(experience(Scope::User, Some("alice"))).await.unwrap();
        store.save(experience(Scope::User, Some("bob"))).await.unwrap();

        let ctx = QueryContext {
            user: Some("alice".into()),
            ..Default::default()
        };
        let results = store.query(&ExperienceQuery::default(), &ctx).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].owner.as_deref(), Some("alice"));
    }
}
