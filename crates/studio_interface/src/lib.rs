//! Trait definitions for the Studio toolkit.
//!
//! The traits here are the seams between the generation core and everything
//! it treats as an external collaborator: the remote API, the host's
//! connectivity signal, and the credential selection dialog.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    AccessProvider, Connectivity, ImageEditing, ImageEditor, VideoGenerator, VideoOperations,
};
pub use types::{OnlineSignal, OperationHandle, OperationState};
