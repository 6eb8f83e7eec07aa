//! Storyboard model error types.

/// Conditions under which the storyboard rejects a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryboardErrorKind {
    /// A batch or single-shot run currently owns the storyboard
    #[display("A generation run is in progress; the storyboard cannot be edited")]
    BatchInProgress,
    /// No shot with the given id exists
    #[display("Shot '{}' not found", _0)]
    ShotNotFound(String),
    /// Credential check has not granted access
    #[display("Access to the generation API has not been granted")]
    AccessDenied,
}

/// Storyboard error with location tracking.
///
/// # Examples
///
/// ```
/// use studio_error::{StoryboardError, StoryboardErrorKind};
///
/// let err = StoryboardError::new(StoryboardErrorKind::BatchInProgress);
/// assert!(format!("{}", err).contains("in progress"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {} at line {} in {}", kind, line, file)]
pub struct StoryboardError {
    /// The specific error condition
    pub kind: StoryboardErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryboardError {
    /// Create a new StoryboardError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryboardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for storyboard mutations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
