//! Shared storyboard state.

use crate::flow::INTERRUPTED_MESSAGE;
use crate::{BlockReason, ShotCollection};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use studio_config::StoryboardConfig;
use studio_core::{AspectRatio, ShotId, ShotStatus, ShotUpdate};
use studio_error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
use tracing::{debug, info, warn};

/// Title, aspect ratio and shots of one storyboard, plus the run flag.
///
/// Only built through [`Storyboard::new`] or [`Storyboard::from_config`], so
/// the shot collection invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Storyboard {
    /// Title, used for the export file name
    title: String,
    /// Aspect ratio used for every shot of a batch
    aspect_ratio: AspectRatio,
    /// Ordered shots
    shots: ShotCollection,
    /// Whether a batch or single-shot run is active
    batch_running: bool,
}

impl Storyboard {
    /// Create an idle storyboard.
    pub fn new(title: impl Into<String>, aspect_ratio: AspectRatio, shots: ShotCollection) -> Self {
        Self {
            title: title.into(),
            aspect_ratio,
            shots,
            batch_running: false,
        }
    }

    /// Create a storyboard from settings.
    pub fn from_config(config: &StoryboardConfig) -> Self {
        Self::new(
            config.title.clone(),
            config.aspect_ratio,
            ShotCollection::from_config(config),
        )
    }
}

impl Default for Storyboard {
    fn default() -> Self {
        Self::from_config(&StoryboardConfig::default())
    }
}

/// Work captured when a run starts: the shots to process, in order, and
/// the aspect ratio they share.
///
/// The plan owns the run flag. Dropping it, whether the run finished, was
/// cancelled or panicked, lowers the flag and fails every planned shot
/// still `processing`.
#[derive(Debug)]
pub(crate) struct RunPlan {
    pub(crate) shots: Vec<(ShotId, String)>,
    pub(crate) aspect_ratio: AspectRatio,
    store: StoryboardStore,
}

impl Drop for RunPlan {
    fn drop(&mut self) {
        let mut storyboard = self.store.write();
        for (id, _) in &self.shots {
            let interrupted = storyboard
                .shots
                .get(*id)
                .is_some_and(|shot| shot.status().is_processing());
            if interrupted {
                warn!(shot_id = %id, "Run stopped while shot was processing");
                storyboard
                    .shots
                    .patch_status(*id, ShotStatus::failed(INTERRUPTED_MESSAGE));
            }
        }
        storyboard.batch_running = false;
        debug!("Run flag cleared");
    }
}

/// Shared handle to a storyboard.
///
/// Clones share the same storyboard. All mutations are serialized through
/// one lock; the lock is never held across an `.await`. While a run is
/// active every user mutation is rejected with
/// [`StoryboardErrorKind::BatchInProgress`].
#[derive(Debug, Clone, Default)]
pub struct StoryboardStore {
    inner: Arc<RwLock<Storyboard>>,
}

impl StoryboardStore {
    /// Wrap a storyboard.
    pub fn new(storyboard: Storyboard) -> Self {
        Self {
            inner: Arc::new(RwLock::new(storyboard)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Storyboard> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Storyboard> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store with a storyboard built from settings.
    pub fn from_config(config: &StoryboardConfig) -> Self {
        Self::new(Storyboard::from_config(config))
    }

    /// Copy of the current state, for rendering or export.
    pub async fn snapshot(&self) -> Storyboard {
        self.read().clone()
    }

    /// Whether a run is active.
    pub async fn is_running(&self) -> bool {
        self.read().batch_running
    }

    fn ensure_idle(storyboard: &Storyboard) -> StoryboardResult<()> {
        if storyboard.batch_running {
            Err(StoryboardError::new(StoryboardErrorKind::BatchInProgress))
        } else {
            Ok(())
        }
    }

    /// Append a shot. `Ok(None)` when the cap is reached.
    pub async fn add_shot(&self) -> StoryboardResult<Option<ShotId>> {
        let mut storyboard = self.write();
        Self::ensure_idle(&storyboard)?;
        Ok(storyboard.shots.add())
    }

    /// Remove a shot. `Ok(false)` for the sole shot or an unknown id.
    pub async fn remove_shot(&self, id: ShotId) -> StoryboardResult<bool> {
        let mut storyboard = self.write();
        Self::ensure_idle(&storyboard)?;
        Ok(storyboard.shots.remove(id))
    }

    /// Edit one field of a shot. `Ok(false)` for an unknown id.
    pub async fn update_shot(&self, id: ShotId, update: ShotUpdate) -> StoryboardResult<bool> {
        let mut storyboard = self.write();
        Self::ensure_idle(&storyboard)?;
        Ok(storyboard.shots.update(id, update))
    }

    /// Put a shot back to idle. `Ok(false)` for an unknown id.
    pub async fn reset_shot(&self, id: ShotId) -> StoryboardResult<bool> {
        let mut storyboard = self.write();
        Self::ensure_idle(&storyboard)?;
        Ok(storyboard.shots.reset(id))
    }

    /// Rename the storyboard.
    pub async fn set_title(&self, title: impl Into<String>) -> StoryboardResult<()> {
        let mut storyboard = self.write();
        Self::ensure_idle(&storyboard)?;
        storyboard.title = title.into();
        Ok(())
    }

    /// Change the aspect ratio used by the next run.
    pub async fn set_aspect_ratio(&self, aspect_ratio: AspectRatio) -> StoryboardResult<()> {
        let mut storyboard = self.write();
        Self::ensure_idle(&storyboard)?;
        storyboard.aspect_ratio = aspect_ratio;
        Ok(())
    }

    /// Check preconditions and raise the run flag for all shots, atomically.
    pub(crate) async fn begin_batch(&self) -> Result<RunPlan, BlockReason> {
        let mut storyboard = self.write();
        if storyboard.batch_running {
            return Err(BlockReason::BatchInProgress);
        }
        if let Some(id) = storyboard.shots.first_missing_prompt() {
            debug!(shot_id = %id, "Batch blocked by blank prompt");
            return Err(BlockReason::MissingPrompt);
        }
        storyboard.batch_running = true;
        let plan = RunPlan {
            shots: storyboard
                .shots
                .iter()
                .map(|shot| (*shot.id(), shot.prompt().clone()))
                .collect(),
            aspect_ratio: storyboard.aspect_ratio,
            store: self.clone(),
        };
        info!(shots = plan.shots.len(), aspect_ratio = %plan.aspect_ratio, "Batch started");
        Ok(plan)
    }

    /// Check preconditions and raise the run flag for one shot, atomically.
    pub(crate) async fn begin_single(&self, id: ShotId) -> Result<RunPlan, BlockReason> {
        let mut storyboard = self.write();
        if storyboard.batch_running {
            return Err(BlockReason::BatchInProgress);
        }
        let shot = storyboard.shots.get(id).ok_or(BlockReason::ShotNotFound)?;
        if !shot.has_prompt() {
            return Err(BlockReason::MissingPrompt);
        }
        let plan = RunPlan {
            shots: vec![(id, shot.prompt().clone())],
            aspect_ratio: storyboard.aspect_ratio,
            store: self.clone(),
        };
        storyboard.batch_running = true;
        info!(shot_id = %id, "Single shot run started");
        Ok(plan)
    }

    /// Record an outcome during a run.
    pub(crate) async fn patch_status(&self, id: ShotId, status: ShotStatus) -> bool {
        self.write().shots.patch_status(id, status)
    }
}
