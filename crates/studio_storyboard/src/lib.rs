//! Storyboard orchestration for Studio.
//!
//! This crate holds the client-side state of a storyboard and everything
//! that drives it:
//!
//! - **Shot collection**: ordered shots with id-keyed add/remove/update
//! - **Store**: the shared, lock-protected storyboard that UI edits and the
//!   orchestrator both go through
//! - **Flows**: single video generation and image editing, each an
//!   `idle → processing → completed/failed` state machine
//! - **Batch orchestrator**: runs every shot strictly one at a time and keeps
//!   going past failures
//! - **Manifest exporter**: writes the completed shots to a JSON file
//!
//! # Example
//!
//! ```rust,ignore
//! use studio_storyboard::{BatchOrchestrator, ManifestExporter, StoryboardStore};
//!
//! let store = StoryboardStore::default();
//! let ids = store.snapshot().await.shots().ids();
//! store.update_shot(ids[0], ShotUpdate::SetPrompt("Opening wide shot".into())).await?;
//!
//! let orchestrator = BatchOrchestrator::new(client, online);
//! orchestrator.run_all(&store).await;
//!
//! ManifestExporter::new("./exports").export(&store).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod flow;
mod manifest;
mod orchestrator;
mod shots;
mod store;

pub use flow::{BlockReason, ImageEditFlow, Submission, VideoFlow};
pub use manifest::{Manifest, ManifestExporter, ManifestShot};
pub use orchestrator::{BatchOrchestrator, BatchOutcome, BatchSummary};
pub use shots::ShotCollection;
pub use store::{Storyboard, StoryboardStore};
