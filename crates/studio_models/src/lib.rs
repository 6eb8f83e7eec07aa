//! Generative media clients for Studio.
//!
//! - [`GeminiClient`] speaks the Gemini REST API: long-running Veo video jobs
//!   (submit, then poll) and single-call image edits.
//! - [`OperationClient`] turns any submit/poll backend into the
//!   submit-and-await contract, applying the connectivity check, the fixed
//!   polling interval and the maximum wait.
//!
//! # Example
//!
//! ```no_run
//! use studio_config::StudioConfig;
//! use studio_core::{AspectRatio, VideoRequest};
//! use studio_interface::{OnlineSignal, VideoGenerator};
//! use studio_models::{GeminiClient, OperationClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StudioConfig::load()?;
//! let gemini = GeminiClient::new(&config)?;
//! let client = OperationClient::new(gemini, OnlineSignal::default(), config.polling);
//!
//! let request = VideoRequest::text("A lighthouse in a storm", AspectRatio::Landscape);
//! let locator = client.generate_video(&request).await?;
//! println!("Video ready at {}", locator);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod metrics;
mod operation;

pub use gemini::{
    Candidate, CandidateContent, ContentPart, EncodedImage, GeminiClient, GeminiResult,
    GenerateContentRequest, GenerateContentResponse, GeneratedSample, GeneratedVideo,
    InlineData, OperationError, OperationResponse, OperationResult, PredictLongRunningRequest,
    RequestContent, VideoInstance, VideoParameters, VideoResponse,
};
pub use metrics::GenerationMetrics;
pub use operation::OperationClient;
