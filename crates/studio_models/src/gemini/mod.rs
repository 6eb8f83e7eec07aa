//! Google Gemini REST API client.
//!
//! Video generation uses the long-running `predictLongRunning` endpoint: the
//! submit call returns an operation name which is then polled with plain GETs
//! until `done`. Image edits use `generateContent` with an inline image part
//! and read the edited image back from the first inline data part.

mod client;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    Candidate, CandidateContent, ContentPart, EncodedImage, GenerateContentRequest, GenerateContentResponse,
    GeneratedSample, GeneratedVideo, InlineData, OperationError, OperationResponse,
    OperationResult, PredictLongRunningRequest, RequestContent, VideoInstance, VideoParameters,
    VideoResponse,
};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, studio_error::GeminiError>;
