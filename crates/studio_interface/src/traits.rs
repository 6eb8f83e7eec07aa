//! Trait definitions for the remote API and host collaborators.

use crate::{OperationHandle, OperationState};
use async_trait::async_trait;
use std::sync::Arc;
use studio_core::{ImageEditRequest, MediaPayload, ResourceLocator, VideoRequest};
use studio_error::{GenerationResult, StudioResult};

/// Raw long-running video job API: one submit call, then repeated status polls.
///
/// Implementations make exactly one network call per method and never loop
/// or sleep; the polling policy lives in the caller.
#[async_trait]
pub trait VideoOperations: Send + Sync {
    /// Submit a generation job and return its handle.
    async fn submit(&self, request: &VideoRequest) -> GenerationResult<OperationHandle>;

    /// Query the current state of a submitted job.
    async fn poll(&self, handle: &OperationHandle) -> GenerationResult<OperationState>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used for video jobs.
    fn model_name(&self) -> &str;
}

/// Raw image edit API: a single request/response call.
#[async_trait]
pub trait ImageEditing: Send + Sync {
    /// Send the edit. `Ok(None)` means the response carried no image.
    async fn edit_image(&self, request: &ImageEditRequest)
    -> GenerationResult<Option<MediaPayload>>;

    /// Provider name for image edits (e.g., "gemini").
    fn image_provider(&self) -> &'static str;

    /// Model identifier used for image edits.
    fn image_model(&self) -> &str;
}

/// Submit-and-await contract: drives one video job to a terminal result.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Generate one video, returning its locator or a typed failure.
    async fn generate_video(&self, request: &VideoRequest) -> GenerationResult<ResourceLocator>;
}

/// Image edit contract with connectivity and empty-output rules applied.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Edit one image, returning the edited payload or a typed failure.
    async fn edit(&self, request: &ImageEditRequest) -> GenerationResult<MediaPayload>;
}

/// Host "is online" signal.
pub trait Connectivity: Send + Sync {
    /// Current connectivity.
    fn is_online(&self) -> bool;
}

/// External credential check and selection dialog.
#[async_trait]
pub trait AccessProvider: Send + Sync {
    /// Whether a usable credential is currently selected.
    async fn has_access(&self) -> StudioResult<bool>;

    /// Open the credential selection flow and wait for it to close.
    async fn open_selection(&self) -> StudioResult<()>;
}

impl<T: Connectivity + ?Sized> Connectivity for Arc<T> {
    fn is_online(&self) -> bool {
        (**self).is_online()
    }
}

#[async_trait]
impl<T: VideoOperations + ?Sized> VideoOperations for Arc<T> {
    async fn submit(&self, request: &VideoRequest) -> GenerationResult<OperationHandle> {
        (**self).submit(request).await
    }

    async fn poll(&self, handle: &OperationHandle) -> GenerationResult<OperationState> {
        (**self).poll(handle).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ImageEditing + ?Sized> ImageEditing for Arc<T> {
    async fn edit_image(
        &self,
        request: &ImageEditRequest,
    ) -> GenerationResult<Option<MediaPayload>> {
        (**self).edit_image(request).await
    }

    fn image_provider(&self) -> &'static str {
        (**self).image_provider()
    }

    fn image_model(&self) -> &str {
        (**self).image_model()
    }
}

#[async_trait]
impl<T: VideoGenerator + ?Sized> VideoGenerator for Arc<T> {
    async fn generate_video(&self, request: &VideoRequest) -> GenerationResult<ResourceLocator> {
        (**self).generate_video(request).await
    }
}

#[async_trait]
impl<T: ImageEditor + ?Sized> ImageEditor for Arc<T> {
    async fn edit(&self, request: &ImageEditRequest) -> GenerationResult<MediaPayload> {
        (**self).edit(request).await
    }
}

#[async_trait]
impl<T: AccessProvider + ?Sized> AccessProvider for Arc<T> {
    async fn has_access(&self) -> StudioResult<bool> {
        (**self).has_access().await
    }

    async fn open_selection(&self) -> StudioResult<()> {
        (**self).open_selection().await
    }
}
