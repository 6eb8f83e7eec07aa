//! JSON error types.

/// JSON serialization/deserialization error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} ({}) at line {} in {}", message, context, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// What was being encoded or decoded when the error occurred
    pub context: &'static str,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_error::JsonError;
    ///
    /// let err = JsonError::new("expected value at line 1", "storyboard manifest");
    /// assert!(format!("{}", err).contains("storyboard manifest"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>, context: &'static str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            context,
            line: location.line(),
            file: location.file(),
        }
    }
}
