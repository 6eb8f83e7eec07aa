//! Single-item generation flows.
//!
//! Each flow owns its inputs and a [`GenerationStatus`]. Submitting first
//! checks the preconditions; a violated precondition returns
//! [`Submission::Blocked`] without touching the status or calling the remote
//! API. Otherwise the status goes `processing`, then `completed` or `failed`.
//! A submission dropped while `processing` leaves the status `failed`.

use std::future::Future;
use studio_core::{
    AspectRatio, GenerationStatus, ImageEditRequest, MediaPayload, ResourceLocator, VideoRequest,
};
use studio_error::GenerationResult;
use studio_interface::{Connectivity, ImageEditor, VideoGenerator};
use tracing::{debug, instrument, warn};

/// Prompt used for image-to-video when the user gives none.
const DEFAULT_ANIMATE_PROMPT: &str = "Animate this image";

/// Error recorded for a generation whose future was dropped mid-flight.
pub(crate) const INTERRUPTED_MESSAGE: &str = "Generation was interrupted";

/// Why a submission did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BlockReason {
    /// A prompt is required but blank
    #[display("A prompt is required")]
    MissingPrompt,
    /// No source image chosen
    #[display("An image is required")]
    MissingImage,
    /// No edit instruction given
    #[display("An instruction is required")]
    MissingInstruction,
    /// Connectivity signal is false
    #[display("You are currently offline")]
    Offline,
    /// A batch or single-shot run is active
    #[display("A generation run is already in progress")]
    BatchInProgress,
    /// The addressed shot does not exist
    #[display("Shot not found")]
    ShotNotFound,
}

/// Result of asking a flow to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// Preconditions failed; nothing changed
    Blocked(BlockReason),
    /// The generation produced a result
    Completed(T),
    /// The generation failed with this message
    Failed(String),
}

impl<T> Submission<T> {
    /// Whether the submission never started.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Submission::Blocked(_))
    }
}

/// Holds a status at `processing` and fails it if dropped unsettled.
struct ProcessingGuard<'a, T> {
    status: &'a mut GenerationStatus<T>,
}

impl<'a, T> ProcessingGuard<'a, T> {
    fn start(status: &'a mut GenerationStatus<T>) -> Self {
        *status = GenerationStatus::Processing;
        Self { status }
    }

    fn settle(self, outcome: GenerationStatus<T>) {
        *self.status = outcome;
    }
}

impl<T> Drop for ProcessingGuard<'_, T> {
    fn drop(&mut self) {
        if self.status.is_processing() {
            warn!("Generation dropped while processing");
            *self.status = GenerationStatus::failed(INTERRUPTED_MESSAGE);
        }
    }
}

/// Drive one generation through `processing` to a terminal status.
async fn run_single<T, F>(status: &mut GenerationStatus<T>, generation: F) -> Submission<T>
where
    T: Clone,
    F: Future<Output = GenerationResult<T>>,
{
    let guard = ProcessingGuard::start(status);
    match generation.await {
        Ok(result) => {
            guard.settle(GenerationStatus::completed(result.clone()));
            Submission::Completed(result)
        }
        Err(e) => {
            let message = e.message();
            warn!(error = %message, "Generation failed");
            guard.settle(GenerationStatus::failed(message.clone()));
            Submission::Failed(message)
        }
    }
}

/// Single video generation: a prompt, an aspect ratio and an optional source image.
///
/// Without an image the prompt is required. With an image a blank prompt is
/// allowed and replaced by "Animate this image".
#[derive(Debug)]
pub struct VideoFlow<G, C> {
    generator: G,
    connectivity: C,
    prompt: String,
    aspect_ratio: AspectRatio,
    image: Option<MediaPayload>,
    status: GenerationStatus<ResourceLocator>,
}

impl<G: VideoGenerator, C: Connectivity> VideoFlow<G, C> {
    /// Create an idle flow.
    pub fn new(generator: G, connectivity: C) -> Self {
        Self {
            generator,
            connectivity,
            prompt: String::new(),
            aspect_ratio: AspectRatio::default(),
            image: None,
            status: GenerationStatus::Idle,
        }
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Attach or clear the source image.
    pub fn set_image(&mut self, image: Option<MediaPayload>) {
        self.image = image;
    }

    /// Current prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Current aspect ratio.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Current source image.
    pub fn image(&self) -> Option<&MediaPayload> {
        self.image.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> &GenerationStatus<ResourceLocator> {
        &self.status
    }

    /// Check the preconditions without submitting.
    pub fn check(&self) -> Result<(), BlockReason> {
        if self.image.is_none() && self.prompt.trim().is_empty() {
            return Err(BlockReason::MissingPrompt);
        }
        if !self.connectivity.is_online() {
            return Err(BlockReason::Offline);
        }
        Ok(())
    }

    fn request(&self) -> VideoRequest {
        match &self.image {
            Some(image) => {
                let prompt = if self.prompt.trim().is_empty() {
                    DEFAULT_ANIMATE_PROMPT.to_string()
                } else {
                    self.prompt.clone()
                };
                VideoRequest::from_image(prompt, self.aspect_ratio, image.clone())
            }
            None => VideoRequest::text(self.prompt.clone(), self.aspect_ratio),
        }
    }

    /// Submit the current inputs and wait for the video.
    #[instrument(skip(self), fields(aspect_ratio = %self.aspect_ratio, with_image = self.image.is_some()))]
    pub async fn submit(&mut self) -> Submission<ResourceLocator> {
        if let Err(reason) = self.check() {
            debug!(%reason, "Video submission blocked");
            return Submission::Blocked(reason);
        }
        let request = self.request();
        run_single(&mut self.status, self.generator.generate_video(&request)).await
    }
}

/// Image editing: one source image plus a natural language instruction.
///
/// Choosing a new image resets the flow to idle and drops the previous result.
#[derive(Debug)]
pub struct ImageEditFlow<E, C> {
    editor: E,
    connectivity: C,
    image: Option<MediaPayload>,
    instruction: String,
    status: GenerationStatus<MediaPayload>,
}

impl<E: ImageEditor, C: Connectivity> ImageEditFlow<E, C> {
    /// Create an idle flow.
    pub fn new(editor: E, connectivity: C) -> Self {
        Self {
            editor,
            connectivity,
            image: None,
            instruction: String::new(),
            status: GenerationStatus::Idle,
        }
    }

    /// Choose the source image. Resets status to idle and clears the result.
    pub fn set_image(&mut self, image: MediaPayload) {
        self.image = Some(image);
        self.status = GenerationStatus::Idle;
    }

    /// Replace the instruction.
    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }

    /// Current source image.
    pub fn image(&self) -> Option<&MediaPayload> {
        self.image.as_ref()
    }

    /// Current instruction.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Current status; the completed result is the edited image.
    pub fn status(&self) -> &GenerationStatus<MediaPayload> {
        &self.status
    }

    /// Edited image as a `data:` URI, when completed.
    pub fn result_data_uri(&self) -> Option<String> {
        self.status.result().map(MediaPayload::to_data_uri)
    }

    /// Check the preconditions without submitting.
    pub fn check(&self) -> Result<(), BlockReason> {
        if self.image.is_none() {
            return Err(BlockReason::MissingImage);
        }
        if self.instruction.trim().is_empty() {
            return Err(BlockReason::MissingInstruction);
        }
        if !self.connectivity.is_online() {
            return Err(BlockReason::Offline);
        }
        Ok(())
    }

    /// Submit the edit and wait for the result.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Submission<MediaPayload> {
        if let Err(reason) = self.check() {
            debug!(%reason, "Image edit blocked");
            return Submission::Blocked(reason);
        }
        let Some(image) = self.image.clone() else {
            return Submission::Blocked(BlockReason::MissingImage);
        };
        let request = ImageEditRequest::new(image, self.instruction.clone());
        run_single(&mut self.status, self.editor.edit(&request)).await
    }
}
