//! Gemini REST API data transfer objects.
//!
//! Field names follow the API's camelCase JSON. Response types accept the
//! snake_case spellings some endpoints return as well.

use serde::{Deserialize, Serialize};
use studio_core::{ImageEditRequest, MediaPayload, ResourceLocator, VideoRequest};
use studio_error::{GeminiError, GeminiErrorKind};
use studio_interface::OperationState;

use super::GeminiResult;

//
// ─── VIDEO SUBMIT ───────────────────────────────────────────────────────────────
//

/// Body of a `models/{model}:predictLongRunning` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictLongRunningRequest {
    /// Exactly one instance per job
    pub instances: Vec<VideoInstance>,
    /// Output parameters
    pub parameters: VideoParameters,
}

impl PredictLongRunningRequest {
    /// Build the job body for a video request at the given resolution tier.
    pub fn from_request(request: &VideoRequest, resolution: &str) -> Self {
        Self {
            instances: vec![VideoInstance {
                prompt: request.prompt().clone(),
                image: request.image().as_ref().map(EncodedImage::from_payload),
            }],
            parameters: VideoParameters {
                aspect_ratio: request.aspect_ratio().to_string(),
                resolution: resolution.to_string(),
                sample_count: 1,
            },
        }
    }
}

/// One generation instance: the prompt and an optional first frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInstance {
    /// Text prompt
    pub prompt: String,
    /// Source image for image-to-video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EncodedImage>,
}

/// Base64 image embedded in a video instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    /// Base64 image bytes
    pub bytes_base64_encoded: String,
    /// MIME type of the image
    pub mime_type: String,
}

impl EncodedImage {
    fn from_payload(payload: &MediaPayload) -> Self {
        Self {
            bytes_base64_encoded: payload.to_base64(),
            mime_type: payload.mime_type().clone(),
        }
    }
}

/// Output parameters of a video job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    /// "16:9" or "9:16"
    pub aspect_ratio: String,
    /// Fixed resolution tier
    pub resolution: String,
    /// Number of clips; always one
    pub sample_count: u32,
}

//
// ─── OPERATIONS ─────────────────────────────────────────────────────────────────
//

/// A long-running operation as returned by both submit and poll.
///
/// # Example
///
/// ```
/// use studio_models::OperationResponse;
/// use studio_interface::OperationState;
///
/// let json = r#"{"name": "models/veo/operations/abc", "done": false}"#;
/// let op: OperationResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(op.into_state(), OperationState::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationResponse {
    /// Operation name, used as the poll path
    #[serde(default)]
    pub name: String,
    /// Whether the operation has finished
    #[serde(default)]
    pub done: bool,
    /// Result payload, present when finished successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<OperationResult>,
    /// Error payload, present when finished with an error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

impl OperationResponse {
    /// Interpret the operation as a poll outcome.
    pub fn into_state(self) -> OperationState {
        if !self.done {
            return OperationState::Pending;
        }
        if let Some(error) = self.error {
            return OperationState::Failed(error.message);
        }
        let locator = self
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|v| {
                v.generated_samples
                    .into_iter()
                    .find_map(|sample| sample.video.and_then(|video| video.uri))
            })
            .filter(|uri| !uri.trim().is_empty())
            .map(ResourceLocator::from);
        OperationState::Succeeded(locator)
    }
}

/// Operation error payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationError {
    /// gRPC-style status code
    #[serde(default)]
    pub code: i32,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Finished operation payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// Video generation output
    #[serde(default, alias = "generate_video_response")]
    pub generate_video_response: Option<VideoResponse>,
}

/// Video generation output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    /// Generated clips
    #[serde(default, alias = "generated_samples")]
    pub generated_samples: Vec<GeneratedSample>,
    /// Reasons clips were withheld by safety filters
    #[serde(default, alias = "rai_media_filtered_reasons")]
    pub rai_media_filtered_reasons: Vec<String>,
}

/// One generated clip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedSample {
    /// Clip location
    #[serde(default)]
    pub video: Option<GeneratedVideo>,
}

/// Clip location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedVideo {
    /// Download URI
    #[serde(default)]
    pub uri: Option<String>,
}

//
// ─── IMAGE EDIT ─────────────────────────────────────────────────────────────────
//

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// A single user turn
    pub contents: Vec<RequestContent>,
}

impl GenerateContentRequest {
    /// Image part first, instruction second.
    pub fn from_edit(request: &ImageEditRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    ContentPart::inline(request.image()),
                    ContentPart::text(request.instruction()),
                ],
            }],
        }
    }
}

/// One turn of content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestContent {
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

/// A text or inline-data part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPart {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Binary content
    #[serde(
        default,
        alias = "inline_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub inline_data: Option<InlineData>,
}

impl ContentPart {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline(payload: &MediaPayload) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: payload.mime_type().clone(),
                data: payload.to_base64(),
            }),
        }
    }
}

/// Base64 data with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Base64 bytes
    pub data: String,
}

/// Response of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate outputs
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Decode the first inline image of the first candidate, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the inline data is not valid base64.
    pub fn first_image(&self) -> GeminiResult<Option<MediaPayload>> {
        let inline = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.inline_data.as_ref()));

        match inline {
            Some(data) => MediaPayload::from_base64(data.mime_type.clone(), &data.data)
                .map(Some)
                .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string()))),
            None => Ok(None),
        }
    }
}

/// One candidate output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Output content
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateContent {
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

//
// ─── ERRORS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Pull the message out of a Gemini error body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}
