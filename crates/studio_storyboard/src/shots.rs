//! Ordered shot collection.

use serde::Serialize;
use studio_config::StoryboardConfig;
use studio_core::{MAX_SHOTS, Shot, ShotDuration, ShotId, ShotStatus, ShotUpdate, Transition};
use tracing::debug;

/// Ordered sequence of shots.
///
/// Order is the generation and export order. Every edit is keyed by
/// [`ShotId`], never by position, and touches only the addressed shot. The
/// collection is never empty.
///
/// # Examples
///
/// ```
/// use studio_core::ShotUpdate;
/// use studio_storyboard::ShotCollection;
///
/// let mut shots = ShotCollection::default();
/// assert_eq!(shots.len(), 3);
///
/// let id = shots.add().unwrap();
/// assert!(shots.update(id, ShotUpdate::SetPrompt("Closing shot".to_string())));
/// assert_eq!(shots.get(id).unwrap().prompt(), "Closing shot");
///
/// assert!(shots.remove(id));
/// assert_eq!(shots.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotCollection {
    shots: Vec<Shot>,
    max_shots: usize,
    default_duration: ShotDuration,
    default_transition: Transition,
}

impl ShotCollection {
    /// Create a collection of `initial` idle shots.
    ///
    /// `max_shots` is clamped to `[1, MAX_SHOTS]` and `initial` to `[1, max_shots]`.
    pub fn new(
        initial: usize,
        max_shots: usize,
        default_duration: ShotDuration,
        default_transition: Transition,
    ) -> Self {
        let max_shots = max_shots.clamp(1, MAX_SHOTS);
        let initial = initial.clamp(1, max_shots);
        let shots = (0..initial)
            .map(|_| Shot::new(default_duration, default_transition))
            .collect();
        Self {
            shots,
            max_shots,
            default_duration,
            default_transition,
        }
    }

    /// Create a collection from storyboard settings.
    pub fn from_config(config: &StoryboardConfig) -> Self {
        Self::new(
            config.initial_shots,
            config.max_shots,
            config.default_duration(),
            config.default_transition,
        )
    }

    /// Append a fresh idle shot. Returns `None` once the cap is reached.
    pub fn add(&mut self) -> Option<ShotId> {
        if self.is_full() {
            debug!(len = self.shots.len(), max = self.max_shots, "Shot cap reached");
            return None;
        }
        let shot = Shot::new(self.default_duration, self.default_transition);
        let id = *shot.id();
        self.shots.push(shot);
        debug!(shot_id = %id, len = self.shots.len(), "Shot added");
        Some(id)
    }

    /// Remove a shot. The sole remaining shot and unknown ids are left alone.
    pub fn remove(&mut self, id: ShotId) -> bool {
        if self.shots.len() <= 1 {
            return false;
        }
        match self.position(id) {
            Some(index) => {
                self.shots.remove(index);
                debug!(shot_id = %id, len = self.shots.len(), "Shot removed");
                true
            }
            None => false,
        }
    }

    /// Apply one field edit to a shot. Returns `false` for unknown ids.
    pub fn update(&mut self, id: ShotId, update: ShotUpdate) -> bool {
        match self.get_mut(id) {
            Some(shot) => {
                shot.apply(update);
                true
            }
            None => false,
        }
    }

    /// Record a generation outcome on a shot. Returns `false` for unknown ids.
    pub fn patch_status(&mut self, id: ShotId, status: ShotStatus) -> bool {
        match self.get_mut(id) {
            Some(shot) => {
                debug!(shot_id = %id, status = status.label(), "Shot status changed");
                shot.set_status(status);
                true
            }
            None => false,
        }
    }

    /// Put a shot back to idle, dropping any prior result or error.
    pub fn reset(&mut self, id: ShotId) -> bool {
        self.patch_status(id, ShotStatus::Idle)
    }

    /// Look up a shot.
    pub fn get(&self, id: ShotId) -> Option<&Shot> {
        self.shots.iter().find(|shot| *shot.id() == id)
    }

    fn get_mut(&mut self, id: ShotId) -> Option<&mut Shot> {
        self.shots.iter_mut().find(|shot| *shot.id() == id)
    }

    fn position(&self, id: ShotId) -> Option<usize> {
        self.shots.iter().position(|shot| *shot.id() == id)
    }

    /// Shots in order.
    pub fn iter(&self) -> impl Iterator<Item = &Shot> {
        self.shots.iter()
    }

    /// Shots in order as a slice.
    pub fn as_slice(&self) -> &[Shot] {
        &self.shots
    }

    /// Ids in order.
    pub fn ids(&self) -> Vec<ShotId> {
        self.shots.iter().map(|shot| *shot.id()).collect()
    }

    /// Number of shots; never zero.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Whether there are no shots; never true.
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Whether `add` would be a no-op.
    pub fn is_full(&self) -> bool {
        self.shots.len() >= self.max_shots
    }

    /// The configured cap.
    pub fn max_shots(&self) -> usize {
        self.max_shots
    }

    /// First shot whose prompt is blank, if any.
    pub fn first_missing_prompt(&self) -> Option<ShotId> {
        self.shots
            .iter()
            .find(|shot| !shot.has_prompt())
            .map(|shot| *shot.id())
    }

    /// Shots that completed with a result, in order.
    pub fn completed(&self) -> impl Iterator<Item = &Shot> {
        self.shots.iter().filter(|shot| shot.result().is_some())
    }
}

impl Default for ShotCollection {
    fn default() -> Self {
        Self::from_config(&StoryboardConfig::default())
    }
}

impl<'a> IntoIterator for &'a ShotCollection {
    type Item = &'a Shot;
    type IntoIter = std::slice::Iter<'a, Shot>;

    fn into_iter(self) -> Self::IntoIter {
        self.shots.iter()
    }
}
