//! Studio - storyboard video generation over the Gemini API
//!
//! Studio turns a storyboard of short text prompts into video clips, one shot
//! at a time, and exports the finished clips as a JSON manifest. It also offers
//! single video generation (text or image-to-video) and instruction-based image
//! editing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use studio::{ShotUpdate, StudioConfig, StudioSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     studio::init_console_telemetry()?;
//!
//!     let config = StudioConfig::load()?;
//!     let session = StudioSession::from_config(config);
//!     session.access().verify().await;
//!
//!     let store = session.store();
//!     for (i, id) in store.snapshot().await.shots().ids().into_iter().enumerate() {
//!         store.update_shot(id, ShotUpdate::SetPrompt(format!("Scene {}", i + 1))).await?;
//!     }
//!
//!     let outcome = session.run_batch().await?;
//!     println!("{:?}", outcome);
//!     session.export().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Studio is organized as a workspace with focused crates:
//!
//! - `studio_error` - Error types
//! - `studio_core` - Shots, media payloads, requests, generation status
//! - `studio_interface` - Traits at the remote API and host boundaries
//! - `studio_config` - Layered TOML configuration
//! - `studio_models` - Gemini client and the polling operation client
//! - `studio_storyboard` - Shot collection, flows, batch orchestrator, export
//!
//! This crate (`studio`) re-exports everything and adds the session context,
//! the access gate and telemetry setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod session;
pub mod telemetry;

pub use access::{AccessGate, AccessState, EnvAccessProvider};
pub use session::{StudioClient, StudioSession};
pub use telemetry::{init_console_telemetry, init_telemetry};

pub use studio_config::*;
pub use studio_core::*;
pub use studio_error::*;
pub use studio_interface::*;
pub use studio_models::*;
pub use studio_storyboard::*;
