//! Storyboard shot records.

use crate::{GenerationStatus, ResourceLocator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hard cap on the number of shots in one storyboard.
pub const MAX_SHOTS: usize = 10;

/// Status of a shot; the completed result is the generated video's locator.
pub type ShotStatus = GenerationStatus<ResourceLocator>;

/// Opaque identifier of a shot, unique for the lifetime of the process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct ShotId(Uuid);

impl ShotId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShotId {
    fn default() -> Self {
        Self::new()
    }
}

/// Transition into the next shot. Advisory metadata carried into the export.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Cross-fade through black
    #[default]
    #[display("fade")]
    Fade,
    /// Hard cut
    #[display("cut")]
    Cut,
    /// Cross-dissolve
    #[display("dissolve")]
    Dissolve,
}

impl std::str::FromStr for Transition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fade" => Ok(Transition::Fade),
            "cut" => Ok(Transition::Cut),
            "dissolve" => Ok(Transition::Dissolve),
            other => Err(format!("Unknown transition: {}", other)),
        }
    }
}

/// Shot length in whole seconds, clamped to `[1, 10]`.
///
/// Advisory only: it is exported with the manifest but never sent to the API.
///
/// # Examples
///
/// ```
/// use studio_core::ShotDuration;
///
/// assert_eq!(ShotDuration::clamped(0).seconds(), 1);
/// assert_eq!(ShotDuration::clamped(42).seconds(), 10);
/// assert_eq!(ShotDuration::default().seconds(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ShotDuration(u8);

impl ShotDuration {
    /// Shortest allowed duration.
    pub const MIN: u8 = 1;
    /// Longest allowed duration.
    pub const MAX: u8 = 10;
    /// Duration given to new shots.
    pub const DEFAULT: u8 = 5;

    /// Clamp any second count into the allowed range.
    pub fn clamped(seconds: u32) -> Self {
        let clamped = seconds.clamp(Self::MIN as u32, Self::MAX as u32);
        Self(clamped as u8)
    }

    /// Length in seconds.
    pub fn seconds(&self) -> u32 {
        self.0 as u32
    }
}

impl Default for ShotDuration {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u32> for ShotDuration {
    fn from(seconds: u32) -> Self {
        Self::clamped(seconds)
    }
}

impl From<ShotDuration> for u32 {
    fn from(duration: ShotDuration) -> Self {
        duration.seconds()
    }
}

/// One field edit applied to a shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotUpdate {
    /// Replace the prompt text
    SetPrompt(String),
    /// Replace the duration (clamped)
    SetDuration(u32),
    /// Replace the transition
    SetTransition(Transition),
}

/// One unit of video generation work.
///
/// # Examples
///
/// ```
/// use studio_core::{Shot, ShotDuration, ShotUpdate, Transition};
///
/// let mut shot = Shot::new(ShotDuration::default(), Transition::Fade);
/// shot.apply(ShotUpdate::SetPrompt("A city at sunrise".to_string()));
/// shot.apply(ShotUpdate::SetDuration(12));
///
/// assert_eq!(shot.prompt(), "A city at sunrise");
/// assert_eq!(shot.duration().seconds(), 10);
/// assert!(shot.result().is_none() && shot.error().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Shot {
    /// Stable identifier
    id: ShotId,
    /// Free-text description of the shot
    prompt: String,
    /// Advisory length
    duration: ShotDuration,
    /// Advisory transition into the next shot
    transition: Transition,
    /// Generation state, carrying the result or error when terminal
    #[serde(flatten)]
    status: ShotStatus,
}

impl Shot {
    /// Create an idle shot with an empty prompt and a fresh id.
    pub fn new(duration: ShotDuration, transition: Transition) -> Self {
        Self {
            id: ShotId::new(),
            prompt: String::new(),
            duration,
            transition,
            status: ShotStatus::Idle,
        }
    }

    /// Apply a single field edit. Status, id and other fields are untouched.
    pub fn apply(&mut self, update: ShotUpdate) {
        match update {
            ShotUpdate::SetPrompt(prompt) => self.prompt = prompt,
            ShotUpdate::SetDuration(seconds) => self.duration = ShotDuration::clamped(seconds),
            ShotUpdate::SetTransition(transition) => self.transition = transition,
        }
    }

    /// Replace the generation status.
    pub fn set_status(&mut self, status: ShotStatus) {
        self.status = status;
    }

    /// Whether the prompt is blank after trimming.
    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }

    /// Generated video locator, present only when completed.
    pub fn result(&self) -> Option<&ResourceLocator> {
        self.status.result()
    }

    /// Failure message, present only when failed.
    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }
}
