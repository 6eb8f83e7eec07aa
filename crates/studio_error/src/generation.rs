//! Generation failure types.
//!
//! These are the failures a single generation (one video shot or one image
//! edit) can end in. The `Display` of each kind is the message shown next to
//! the failed item, so it carries no location or prefix noise.

/// Why a single generation did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Connectivity was absent when a remote call was about to be made
    #[display("You are currently offline. Please check your internet connection.")]
    Offline,
    /// The remote API reported an error during submit or poll
    #[display("{}", _0)]
    Remote(String),
    /// The job finished but its response carried no usable output
    #[display("{}", _0)]
    NoOutput(String),
    /// Polling exceeded the configured maximum wait
    #[display("Generation timed out after {} seconds", waited_secs)]
    TimedOut {
        /// Seconds spent waiting before giving up
        waited_secs: u64,
    },
}

impl GenerationErrorKind {
    /// Fallback message used when the remote error carried no text.
    pub const GENERIC_MESSAGE: &'static str = "Generation failed";

    /// Build a `Remote` kind, substituting the generic message for blank text.
    ///
    /// ```
    /// use studio_error::GenerationErrorKind;
    ///
    /// assert_eq!(GenerationErrorKind::remote("  ").to_string(), "Generation failed");
    /// assert_eq!(GenerationErrorKind::remote("quota exceeded").to_string(), "quota exceeded");
    /// ```
    pub fn remote(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Remote(Self::GENERIC_MESSAGE.to_string())
        } else {
            Self::Remote(message)
        }
    }

    /// Job completed without a video locator.
    pub fn no_video() -> Self {
        Self::NoOutput("No video URI returned.".to_string())
    }

    /// Image edit response contained no inline image.
    pub fn no_image() -> Self {
        Self::NoOutput("No image generated in response.".to_string())
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Remote(_) => "remote",
            Self::NoOutput(_) => "no_output",
            Self::TimedOut { .. } => "timed_out",
        }
    }
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use studio_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::no_video());
/// assert_eq!(err.message(), "No video URI returned.");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific failure
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Human-readable message suitable for display on a failed item.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Whether this failure was a connectivity short-circuit.
    pub fn is_offline(&self) -> bool {
        self.kind == GenerationErrorKind::Offline
    }
}

impl From<crate::GeminiError> for GenerationError {
    /// Any API-level failure is a remote failure from the flow's point of view.
    #[track_caller]
    fn from(err: crate::GeminiError) -> Self {
        Self::new(GenerationErrorKind::remote(err.kind.to_string()))
    }
}

/// Result type for a single generation.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
