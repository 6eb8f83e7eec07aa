//! Configuration for the Studio toolkit.
//!
//! Settings are layered with the `config` crate:
//! - Bundled defaults (`include_str!` from `studio.toml`)
//! - `~/.config/studio/studio.toml` (optional)
//! - `./studio.toml` (optional, highest precedence)
//!
//! Every section carries serde defaults equal to the bundled file, so a user
//! override only needs the keys it changes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{
    ExportConfig, GeminiConfig, PollingConfig, RetryConfig, StoryboardConfig, StudioConfig,
};
