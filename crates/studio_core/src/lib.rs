//! Core data types for the Studio toolkit.
//!
//! This crate provides the plain data shared by every other Studio crate:
//! shots and their generation status, media payloads, and the requests sent
//! to the generation API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect_ratio;
mod media;
mod request;
mod shot;
mod status;

pub use aspect_ratio::AspectRatio;
pub use media::{MediaPayload, ResourceLocator};
pub use request::{ImageEditRequest, VideoRequest, VideoRequestBuilder};
pub use shot::{MAX_SHOTS, Shot, ShotDuration, ShotId, ShotStatus, ShotUpdate, Transition};
pub use status::GenerationStatus;
