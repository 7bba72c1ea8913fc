//! The learning-side view of the experience store: a thin façade
//! delegating to C6 so strategies can match repositories by the
//! concrete record type rather than a trait object.

use agentcore_experience::{Experience, ExperienceStore};
use std::sync::Arc;

use crate::error::LearningError;

/// Persists extracted experiences through an [`ExperienceStore`].
#[derive(Clone)]
pub struct LearningRepository {
    store: Arc<dyn ExperienceStore>,
}

impl LearningRepository {
    /// Build a repository over a shared experience store.
    pub fn new(store: Arc<dyn ExperienceStore>) -> Self {
        Self { store }
    }

    /// Persist one experience.
    pub async fn save(&self, experience: Experience) -> Result<(), LearningError> {
        self.store
            .save(experience)
            .await
            .map_err(|e| LearningError::PersistFailed(e.to_string()))
    }

    /// Persist many experiences in one call.
    pub async fn save_batch(&self, experiences: Vec<Experience>) -> Result<(), LearningError> {
        self.store
            .batch_save(experiences)
            .await
            .map_err(|e| LearningError::PersistFailed(e.to_string()))
    }
}
