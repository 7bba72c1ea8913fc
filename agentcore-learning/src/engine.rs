//! Wiring the trigger, extractor, repository, and pool into one
//! turn-boundary entry point.

use crate::extractor::{ExperienceExtractor, Judge};
use crate::pool::LearningPool;
use crate::repository::LearningRepository;
use crate::trigger::{ExecutionMode, LearningStrategy, LearningTriggerContext};
use std::sync::Arc;

/// Default capacity of the async learning pool's task queue.
pub const DEFAULT_POOL_CAPACITY: usize = 256;

/// Ties a trigger strategy, an extractor, and a repository together
/// behind one call invoked at AFTER_AGENT / AFTER_MODEL.
pub struct LearningEngine<S, J>
where
    S: LearningStrategy + 'static,
    J: Judge + 'static,
{
    strategy: S,
    extractor: Arc<ExperienceExtractor<J>>,
    repository: LearningRepository,
    pool: LearningPool,
}

impl<S, J> LearningEngine<S, J>
where
    S: LearningStrategy + 'static,
    J: Judge + 'static,
{
    /// Build an engine with the default pool capacity.
    pub fn new(strategy: S, extractor: ExperienceExtractor<J>, repository: LearningRepository) -> Self {
        Self::with_pool_capacity(strategy, extractor, repository, DEFAULT_POOL_CAPACITY)
    }

    /// Build an engine with an explicit async pool capacity.
    pub fn with_pool_capacity(
        strategy: S,
        extractor: ExperienceExtractor<J>,
        repository: LearningRepository,
        pool_capacity: usize,
    ) -> Self {
        Self {
            strategy,
            extractor: Arc::new(extractor),
            repository,
            pool: LearningPool::new(pool_capacity),
        }
    }

    /// Run the trigger decision against a turn and, if warranted,
    /// extract and persist experiences. Never propagates a failure —
    /// extraction and persistence errors are logged and swallowed,
    /// matching the async path's "learning cannot fail a turn"
    /// contract for both execution modes.
    pub async fn on_turn_boundary(&self, ctx: LearningTriggerContext) {
        let decision = self.strategy.decide(&ctx);
        if !decision.should_learn {
            return;
        }

        match decision.mode {
            ExecutionMode::Sync => {
                run_and_persist(self.extractor.clone(), self.repository.clone(), ctx).await;
            }
            ExecutionMode::Async => {
                let extractor = self.extractor.clone();
                let repository = self.repository.clone();
                self.pool
                    .submit(async move {
                        run_and_persist(extractor, repository, ctx).await;
                    })
                    .await;
            }
        }
    }
}

async fn run_and_persist<J: Judge>(
    extractor: Arc<ExperienceExtractor<J>>,
    repository: LearningRepository,
    ctx: LearningTriggerContext,
) {
    match extractor.extract(&ctx).await {
        Ok(experiences) => {
            if let Err(e) = repository.save_batch(experiences).await {
                tracing::warn!(error = %e, "failed to persist extracted experiences");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "experience extraction failed");
        }
    }
}
