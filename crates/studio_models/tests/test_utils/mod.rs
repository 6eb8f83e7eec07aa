//! Test utilities for studio_models tests.
//!
//! Scripted backends that record how often they were called.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use studio_config::PollingConfig;
use studio_core::{ImageEditRequest, MediaPayload, VideoRequest};
use studio_error::{GenerationError, GenerationErrorKind, GenerationResult};
use studio_interface::{ImageEditing, OnlineSignal, OperationHandle, OperationState, VideoOperations};

/// Video backend returning a scripted sequence of poll states.
///
/// Once the script runs out every further poll reports `Pending`.
pub struct MockVideoOperations {
    submit_error: Option<String>,
    script: Mutex<VecDeque<OperationState>>,
    submit_count: Arc<Mutex<usize>>,
    poll_count: Arc<Mutex<usize>>,
    offline_after: Option<(usize, OnlineSignal)>,
}

impl MockVideoOperations {
    /// Backend whose polls follow `script`.
    pub fn new(script: Vec<OperationState>) -> Self {
        Self {
            submit_error: None,
            script: Mutex::new(script.into()),
            submit_count: Arc::new(Mutex::new(0)),
            poll_count: Arc::new(Mutex::new(0)),
            offline_after: None,
        }
    }

    /// Backend whose submit call fails with `message`.
    pub fn failing_submit(message: impl Into<String>) -> Self {
        let mut mock = Self::new(Vec::new());
        mock.submit_error = Some(message.into());
        mock
    }

    /// Flip `signal` offline once `polls` polls have been answered.
    pub fn offline_after(mut self, polls: usize, signal: OnlineSignal) -> Self {
        self.offline_after = Some((polls, signal));
        self
    }

    pub fn submit_count(&self) -> usize {
        *self.submit_count.lock().unwrap()
    }

    pub fn poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }
}

#[async_trait]
impl VideoOperations for MockVideoOperations {
    async fn submit(&self, _request: &VideoRequest) -> GenerationResult<OperationHandle> {
        let mut count = self.submit_count.lock().unwrap();
        *count += 1;
        match &self.submit_error {
            Some(message) => Err(GenerationError::new(GenerationErrorKind::remote(
                message.clone(),
            ))),
            None => Ok(OperationHandle::from(format!("operations/mock-{}", *count))),
        }
    }

    async fn poll(&self, _handle: &OperationHandle) -> GenerationResult<OperationState> {
        let polls = {
            let mut count = self.poll_count.lock().unwrap();
            *count += 1;
            *count
        };
        if let Some((after, signal)) = &self.offline_after {
            if polls >= *after {
                signal.set_online(false);
            }
        }
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or(OperationState::Pending))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-veo"
    }
}

/// Image backend returning a fixed answer.
pub struct MockImageEditing {
    output: Option<MediaPayload>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageEditing {
    pub fn returning(output: Option<MediaPayload>) -> Self {
        Self {
            output,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ImageEditing for MockImageEditing {
    async fn edit_image(
        &self,
        _request: &ImageEditRequest,
    ) -> GenerationResult<Option<MediaPayload>> {
        *self.call_count.lock().unwrap() += 1;
        Ok(self.output.clone())
    }

    fn image_provider(&self) -> &'static str {
        "mock"
    }

    fn image_model(&self) -> &str {
        "mock-image"
    }
}

/// Five second polls with the given maximum wait.
pub fn polling(max_wait_secs: u64) -> PollingConfig {
    PollingConfig {
        interval_secs: 5,
        max_wait_secs,
    }
}

/// A tiny PNG-ish payload.
pub fn sample_image() -> MediaPayload {
    MediaPayload::new("image/png", vec![0x89, 0x50, 0x4E, 0x47])
}
