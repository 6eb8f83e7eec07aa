//! Test utilities for studio tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use studio_core::{ImageEditRequest, MediaPayload, ResourceLocator, VideoRequest};
use studio_error::{GenerationResult, HttpError, StudioResult};
use studio_interface::{
    AccessProvider, ImageEditing, OperationHandle, OperationState, VideoOperations,
};

/// Access provider answering from a queue; the last answer repeats.
#[derive(Debug)]
pub struct MockAccessProvider {
    answers: Mutex<VecDeque<Option<bool>>>,
    last: Mutex<Option<bool>>,
    fail_selection: bool,
    check_count: Arc<Mutex<usize>>,
    selection_count: Arc<Mutex<usize>>,
}

impl MockAccessProvider {
    /// `Some(b)` answers `Ok(b)`, `None` answers with an error.
    pub fn answering(answers: Vec<Option<bool>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            last: Mutex::new(Some(false)),
            fail_selection: false,
            check_count: Arc::new(Mutex::new(0)),
            selection_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn granted() -> Self {
        Self::answering(vec![Some(true)])
    }

    pub fn failing_selection(mut self) -> Self {
        self.fail_selection = true;
        self
    }

    pub fn check_count(&self) -> usize {
        *self.check_count.lock().unwrap()
    }

    pub fn selection_count(&self) -> usize {
        *self.selection_count.lock().unwrap()
    }
}

#[async_trait]
impl AccessProvider for MockAccessProvider {
    async fn has_access(&self) -> StudioResult<bool> {
        *self.check_count.lock().unwrap() += 1;
        let answer = {
            let mut answers = self.answers.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            if let Some(next) = answers.pop_front() {
                *last = next;
            }
            *last
        };
        match answer {
            Some(present) => Ok(present),
            None => Err(HttpError::new("credential service unavailable").into()),
        }
    }

    async fn open_selection(&self) -> StudioResult<()> {
        *self.selection_count.lock().unwrap() += 1;
        if self.fail_selection {
            Err(HttpError::new("selection dialog unavailable").into())
        } else {
            Ok(())
        }
    }
}

/// Backend finishing every job on its first poll.
#[derive(Debug, Default)]
pub struct MockBackend {
    submits: Arc<Mutex<Vec<VideoRequest>>>,
}

impl MockBackend {
    pub fn submit_count(&self) -> usize {
        self.submits.lock().unwrap().len()
    }
}

#[async_trait]
impl VideoOperations for MockBackend {
    async fn submit(&self, request: &VideoRequest) -> GenerationResult<OperationHandle> {
        let mut submits = self.submits.lock().unwrap();
        submits.push(request.clone());
        Ok(OperationHandle::from(format!("operations/{}", submits.len())))
    }

    async fn poll(&self, handle: &OperationHandle) -> GenerationResult<OperationState> {
        Ok(OperationState::Succeeded(Some(ResourceLocator::from(format!(
            "https://example.com/{}.mp4",
            handle.name()
        )))))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-video"
    }
}

#[async_trait]
impl ImageEditing for MockBackend {
    async fn edit_image(
        &self,
        request: &ImageEditRequest,
    ) -> GenerationResult<Option<MediaPayload>> {
        Ok(Some(request.image().clone()))
    }

    fn image_provider(&self) -> &'static str {
        "mock"
    }

    fn image_model(&self) -> &str {
        "mock-image"
    }
}
