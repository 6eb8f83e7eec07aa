//! Test utilities for studio_storyboard tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studio_core::{ImageEditRequest, MediaPayload, ResourceLocator, ShotUpdate, VideoRequest};
use studio_error::{GenerationError, GenerationErrorKind, GenerationResult};
use studio_interface::{ImageEditor, VideoGenerator};
use studio_storyboard::StoryboardStore;
use tokio::sync::Notify;

/// What the mock does for one call.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Return a locator
    Succeed,
    /// Finish without output
    NoOutput,
    /// Fail with a remote message
    Fail(String),
    /// Panic inside the call
    Panic,
}

/// Video generator following a per-call script, recording every request.
///
/// Calls beyond the script succeed. Each call takes `latency` of (virtual)
/// time, and the mock tracks how many calls were ever in flight at once.
pub struct MockGenerator {
    script: Vec<Outcome>,
    latency: Duration,
    requests: Arc<Mutex<Vec<VideoRequest>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    started: Option<Arc<Notify>>,
    release: Option<Arc<Notify>>,
}

impl MockGenerator {
    pub fn succeeding() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<Outcome>) -> Self {
        Self {
            script,
            latency: Duration::from_secs(5),
            requests: Arc::new(Mutex::new(Vec::new())),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            started: None,
            release: None,
        }
    }

    /// Signal `started` on the first call and hold it until `release` fires.
    pub fn gated(started: Arc<Notify>, release: Arc<Notify>) -> Self {
        let mut mock = Self::succeeding();
        mock.started = Some(started);
        mock.release = Some(release);
        mock
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt().clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<VideoRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoGenerator for MockGenerator {
    async fn generate_video(&self, request: &VideoRequest) -> GenerationResult<ResourceLocator> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if index == 0 {
            if let Some(started) = &self.started {
                started.notify_one();
            }
            if let Some(release) = &self.release {
                release.notified().await;
            }
        }
        tokio::time::sleep(self.latency).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.script.get(index).cloned().unwrap_or(Outcome::Succeed) {
            Outcome::Succeed => Ok(ResourceLocator::from(format!(
                "https://example.com/videos/{}.mp4",
                index + 1
            ))),
            Outcome::NoOutput => Err(GenerationError::new(GenerationErrorKind::no_video())),
            Outcome::Fail(message) => Err(GenerationError::new(GenerationErrorKind::remote(
                message,
            ))),
            Outcome::Panic => panic!("generator crashed"),
        }
    }
}

/// Image editor returning a fixed answer.
pub struct MockEditor {
    output: Option<MediaPayload>,
    call_count: Arc<Mutex<usize>>,
}

impl MockEditor {
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
impl ImageEditor for MockEditor {
    async fn edit(&self, _request: &ImageEditRequest) -> GenerationResult<MediaPayload> {
        *self.call_count.lock().unwrap() += 1;
        self.output
            .clone()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::no_image()))
    }
}

/// Fill every shot's prompt with "Shot N".
pub async fn fill_prompts(store: &StoryboardStore) -> anyhow::Result<()> {
    let ids = store.snapshot().await.shots().ids();
    for (i, id) in ids.into_iter().enumerate() {
        store
            .update_shot(id, ShotUpdate::SetPrompt(format!("Shot {}", i + 1)))
            .await?;
    }
    Ok(())
}

pub fn sample_image() -> MediaPayload {
    MediaPayload::new("image/png", vec![0x89, 0x50, 0x4E, 0x47])
}
