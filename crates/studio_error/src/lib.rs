//! Error types for the Studio toolkit.
//!
//! This crate provides the foundation error types used throughout the Studio workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use studio_error::{StudioResult, HttpError};
//!
//! fn fetch_status() -> StudioResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_status() {
//!     Ok(status) => println!("Got: {}", status),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod export;
mod gemini;
mod generation;
mod http;
mod json;
mod storyboard;

pub use config::ConfigError;
pub use error::{StudioError, StudioErrorKind, StudioResult};
pub use export::{ExportError, ExportErrorKind};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use http::HttpError;
pub use json::JsonError;
pub use storyboard::{StoryboardError, StoryboardErrorKind, StoryboardResult};
