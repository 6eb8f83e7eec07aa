//! Sequential batch orchestration.

use crate::store::RunPlan;
use crate::{BlockReason, StoryboardStore};
use derive_getters::Getters;
use studio_core::{ShotId, ShotStatus, VideoRequest};
use studio_interface::{Connectivity, VideoGenerator};
use tracing::{info, instrument, warn};

/// Counts from a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct BatchSummary {
    /// Shots that ended completed
    completed: usize,
    /// Shots that ended failed, in processing order
    failed: Vec<ShotId>,
}

impl BatchSummary {
    /// Shots attempted.
    pub fn attempted(&self) -> usize {
        self.completed + self.failed.len()
    }
}

/// Outcome of asking the orchestrator to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Preconditions failed; no shot changed and no remote call was made
    Blocked(BlockReason),
    /// Every planned shot reached a terminal state
    Finished(BatchSummary),
}

/// Runs storyboard shots through a video generator, strictly one at a time.
///
/// Shot N+1 is never submitted before shot N is terminal. A failed shot is
/// recorded and the run moves on. The run flag is cleared when the loop ends
/// however many shots failed, and also when the run future is dropped early;
/// a shot left `processing` that way is marked failed. Shots are plain text-to-video using the
/// storyboard's aspect ratio.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator<G, C> {
    generator: G,
    connectivity: C,
}

impl<G: VideoGenerator, C: Connectivity> BatchOrchestrator<G, C> {
    /// Create an orchestrator.
    pub fn new(generator: G, connectivity: C) -> Self {
        Self {
            generator,
            connectivity,
        }
    }

    /// Generate every shot in collection order.
    ///
    /// Blocked when offline, when any prompt is blank, or when a run is
    /// already active.
    #[instrument(skip(self, store))]
    pub async fn run_all(&self, store: &StoryboardStore) -> BatchOutcome {
        if !self.connectivity.is_online() {
            return BatchOutcome::Blocked(BlockReason::Offline);
        }
        match store.begin_batch().await {
            Ok(plan) => BatchOutcome::Finished(self.execute(store, plan).await),
            Err(reason) => {
                info!(%reason, "Batch blocked");
                BatchOutcome::Blocked(reason)
            }
        }
    }

    /// Regenerate one shot, overwriting any prior result or error.
    ///
    /// Same preconditions and the same exclusion as a full batch.
    #[instrument(skip(self, store))]
    pub async fn run_shot(&self, store: &StoryboardStore, id: ShotId) -> BatchOutcome {
        if !self.connectivity.is_online() {
            return BatchOutcome::Blocked(BlockReason::Offline);
        }
        match store.begin_single(id).await {
            Ok(plan) => BatchOutcome::Finished(self.execute(store, plan).await),
            Err(reason) => {
                info!(%reason, "Shot run blocked");
                BatchOutcome::Blocked(reason)
            }
        }
    }

    async fn execute(&self, store: &StoryboardStore, plan: RunPlan) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let total = plan.shots.len();

        for (index, (id, prompt)) in plan.shots.iter().enumerate() {
            let id = *id;
            store.patch_status(id, ShotStatus::Processing).await;
            info!(shot_id = %id, position = index + 1, total, "Generating shot");

            let request = VideoRequest::text(prompt.clone(), plan.aspect_ratio);
            match self.generator.generate_video(&request).await {
                Ok(locator) => {
                    store.patch_status(id, ShotStatus::completed(locator)).await;
                    summary.completed += 1;
                }
                Err(e) => {
                    warn!(shot_id = %id, error = %e.kind, "Shot failed, continuing with next shot");
                    store.patch_status(id, ShotStatus::failed(e.message())).await;
                    summary.failed.push(id);
                }
            }
        }

        drop(plan);
        info!(
            completed = summary.completed,
            failed = summary.failed.len(),
            "Run finished"
        );
        summary
    }
}
