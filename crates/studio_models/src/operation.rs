//! Submit-and-await client over a submit/poll backend.

use async_trait::async_trait;
use derive_getters::Getters;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use studio_config::PollingConfig;
use studio_core::{ImageEditRequest, MediaPayload, ResourceLocator, VideoRequest};
use studio_error::{GenerationError, GenerationErrorKind, GenerationResult};
use studio_interface::{
    Connectivity, ImageEditing, ImageEditor, OperationState, VideoGenerator, VideoOperations,
};

use crate::GenerationMetrics;

/// Remote operation client.
///
/// Wraps a raw backend and a connectivity signal. Video jobs are submitted
/// once, then polled every `polling.interval_secs` until the backend reports
/// a terminal state or `polling.max_wait_secs` has elapsed. Connectivity is
/// sampled before the submit and before every poll; a missing connection fails
/// the job immediately with the offline message and is never retried.
///
/// Image edits go through the same connectivity check but are a single call.
#[derive(Debug, Clone, Getters)]
pub struct OperationClient<B, C> {
    /// The raw API backend
    backend: B,
    /// Host connectivity signal
    connectivity: C,
    /// Poll interval and maximum wait
    polling: PollingConfig,
}

impl<B, C: Connectivity> OperationClient<B, C> {
    /// Create a client over a backend.
    pub fn new(backend: B, connectivity: C, polling: PollingConfig) -> Self {
        Self {
            backend,
            connectivity,
            polling,
        }
    }

    fn ensure_online(&self) -> GenerationResult<()> {
        if self.connectivity.is_online() {
            Ok(())
        } else {
            Err(GenerationError::new(GenerationErrorKind::Offline))
        }
    }
}

impl<B: VideoOperations, C: Connectivity> OperationClient<B, C> {
    async fn await_video(&self, request: &VideoRequest) -> GenerationResult<ResourceLocator> {
        self.ensure_online()?;
        let handle = self.backend.submit(request).await?;

        let provider = self.backend.provider_name();
        let model = self.backend.model_name();
        let started = Instant::now();
        let mut polls: u64 = 0;

        loop {
            let waited = started.elapsed();
            if waited >= self.polling.max_wait() {
                warn!(operation = %handle, polls, waited_secs = waited.as_secs(), "Giving up on video job");
                return Err(GenerationError::new(GenerationErrorKind::TimedOut {
                    waited_secs: waited.as_secs(),
                }));
            }

            tokio::time::sleep(self.polling.interval()).await;
            self.ensure_online()?;

            polls += 1;
            GenerationMetrics::get().record_poll(provider, model);

            match self.backend.poll(&handle).await? {
                OperationState::Pending => {
                    debug!(operation = %handle, polls, "Video job still running");
                }
                OperationState::Succeeded(Some(locator)) => {
                    debug!(operation = %handle, polls, "Video job finished");
                    return Ok(locator);
                }
                OperationState::Succeeded(None) => {
                    return Err(GenerationError::new(GenerationErrorKind::no_video()));
                }
                OperationState::Failed(message) => {
                    return Err(GenerationError::new(GenerationErrorKind::remote(message)));
                }
            }
        }
    }
}

#[async_trait]
impl<B: VideoOperations, C: Connectivity> VideoGenerator for OperationClient<B, C> {
    #[instrument(
        skip(self, request),
        fields(
            provider = self.backend.provider_name(),
            model = %self.backend.model_name(),
            aspect_ratio = %request.aspect_ratio(),
        )
    )]
    async fn generate_video(&self, request: &VideoRequest) -> GenerationResult<ResourceLocator> {
        let started = Instant::now();
        let outcome = self.await_video(request).await;
        let secs = started.elapsed().as_secs_f64();

        let metrics = GenerationMetrics::get();
        let provider = self.backend.provider_name();
        let model = self.backend.model_name();
        match &outcome {
            Ok(_) => metrics.record_success("video", provider, model, secs),
            Err(e) => {
                warn!(error = %e.kind, "Video generation failed");
                metrics.record_failure("video", provider, model, e.kind.label(), secs);
            }
        }
        outcome
    }
}

#[async_trait]
impl<B: ImageEditing, C: Connectivity> ImageEditor for OperationClient<B, C> {
    #[instrument(skip(self, request), fields(model = %self.backend.image_model()))]
    async fn edit(&self, request: &ImageEditRequest) -> GenerationResult<MediaPayload> {
        let started = Instant::now();
        let outcome = match self.ensure_online() {
            Ok(()) => match self.backend.edit_image(request).await {
                Ok(Some(image)) if !image.is_empty() => Ok(image),
                Ok(_) => Err(GenerationError::new(GenerationErrorKind::no_image())),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        let secs = started.elapsed().as_secs_f64();

        let metrics = GenerationMetrics::get();
        let provider = self.backend.image_provider();
        let model = self.backend.image_model();
        match &outcome {
            Ok(_) => metrics.record_success("image", provider, model, secs),
            Err(e) => {
                warn!(error = %e.kind, "Image edit failed");
                metrics.record_failure("image", provider, model, e.kind.label(), secs);
            }
        }
        outcome
    }
}
