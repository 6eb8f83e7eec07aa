//! Manifest export error types.

/// Kinds of export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExportErrorKind {
    /// Failed to create the export directory
    #[display("Failed to create export directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write the manifest file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to download a generated asset
    #[display("Failed to download asset: {}", _0)]
    Download(String),
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use studio_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::FileWrite("/tmp/x.json".to_string()));
/// assert!(format!("{}", err).contains("Failed to write"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of export error
    pub kind: ExportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExportError {
    /// Create a new ExportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
