//! Top-level error wrapper types.

use crate::{
    ConfigError, ExportError, GeminiError, GenerationError, HttpError, JsonError,
    StoryboardError,
};

/// Every error condition the Studio crates can surface.
///
/// # Examples
///
/// ```
/// use studio_error::{StudioError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StudioError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StudioErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Single generation failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Storyboard mutation rejected
    #[from(StoryboardError)]
    Storyboard(StoryboardError),
    /// Manifest export error
    #[from(ExportError)]
    Export(ExportError),
}

/// Studio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use studio_error::{StudioResult, ConfigError};
///
/// fn might_fail() -> StudioResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Studio Error: {}", _0)]
pub struct StudioError(Box<StudioErrorKind>);

impl StudioError {
    /// Create a new error from a kind.
    pub fn new(kind: StudioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StudioErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StudioErrorKind
impl<T> From<T> for StudioError
where
    T: Into<StudioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Studio operations.
pub type StudioResult<T> = std::result::Result<T, StudioError>;
