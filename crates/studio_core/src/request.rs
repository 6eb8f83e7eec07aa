//! Requests sent to the generation API.

use crate::{AspectRatio, MediaPayload};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A video generation request: text-to-video, or image-to-video when a
/// source image is attached.
///
/// # Examples
///
/// ```
/// use studio_core::{AspectRatio, VideoRequest};
///
/// let request = VideoRequest::builder()
///     .prompt("A wide shot of a city at sunrise")
///     .aspect_ratio(AspectRatio::Portrait)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.aspect_ratio(), &AspectRatio::Portrait);
/// assert!(request.image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct VideoRequest {
    /// Description of the clip
    prompt: String,
    /// Output framing
    #[builder(default)]
    aspect_ratio: AspectRatio,
    /// Optional first frame for image-to-video
    #[builder(default, setter(into, strip_option))]
    image: Option<MediaPayload>,
}

impl VideoRequest {
    /// Creates a new builder for `VideoRequest`.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }

    /// Text-only request.
    pub fn text(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio,
            image: None,
        }
    }

    /// Request animating a source image.
    pub fn from_image(
        prompt: impl Into<String>,
        aspect_ratio: AspectRatio,
        image: MediaPayload,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio,
            image: Some(image),
        }
    }
}

/// An image edit request: one source image plus a natural language instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageEditRequest {
    /// Image to edit
    image: MediaPayload,
    /// What to change
    instruction: String,
}

impl ImageEditRequest {
    /// Create an edit request.
    pub fn new(image: MediaPayload, instruction: impl Into<String>) -> Self {
        Self {
            image,
            instruction: instruction.into(),
        }
    }
}
