//! Generation status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle of one generation: `Idle → Processing → {Completed, Failed}`.
///
/// The result exists only in `Completed` and the error message only in
/// `Failed`, so "exactly one of result/error when terminal, neither otherwise"
/// holds by construction.
///
/// # Examples
///
/// ```
/// use studio_core::GenerationStatus;
///
/// let status: GenerationStatus<String> = GenerationStatus::Failed {
///     error: "quota exceeded".to_string(),
/// };
/// assert!(status.is_terminal());
/// assert_eq!(status.error(), Some("quota exceeded"));
/// assert!(status.result().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationStatus<T> {
    /// Nothing submitted yet, or reset by the user
    Idle,
    /// A remote call is in flight
    Processing,
    /// Finished with a result
    Completed {
        /// The produced output
        result: T,
    },
    /// Finished with an error
    Failed {
        /// Human-readable failure message
        error: String,
    },
}

impl<T> Default for GenerationStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> GenerationStatus<T> {
    /// Completed with the given output.
    pub fn completed(result: T) -> Self {
        Self::Completed { result }
    }

    /// Failed with the given message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// The output, when completed.
    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Completed { result } => Some(result),
            _ => None,
        }
    }

    /// The failure message, when failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Completed or failed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }

    /// A remote call is in flight.
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Short lowercase label ("idle", "processing", "completed", "failed").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}
