//! Gemini REST client for Veo video jobs and image edits.
//!
//! Each public call is a single logical API call. Transient HTTP failures
//! (408, 429, 5xx, dropped connections) are retried with exponential backoff
//! and jitter when retry is enabled; permanent failures return immediately.
//! Polling is not done here; see [`crate::OperationClient`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, info, instrument, warn};

use studio_config::{GeminiConfig, RetryConfig, StudioConfig};
use studio_core::{ImageEditRequest, MediaPayload, ResourceLocator, VideoRequest};
use studio_error::{
    ExportError, ExportErrorKind, GeminiError, GeminiErrorKind, GenerationResult, HttpError,
    RetryableError, StudioResult,
};
use studio_interface::{ImageEditing, OperationHandle, OperationState, VideoOperations};

use super::GeminiResult;
use super::dto::{
    GenerateContentRequest, GenerateContentResponse, OperationResponse, PredictLongRunningRequest,
    error_message,
};

/// Header carrying the API key on every JSON call.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Ceiling on a single backoff delay.
const MAX_RETRY_DELAY_SECS: u64 = 60;

/// Gemini REST API client.
///
/// Holds the API key for the session; it is sent as a header and never logged.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    config: GeminiConfig,
    retry: RetryConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.config.base_url)
            .field("video_model", &self.config.video_model)
            .field("image_model", &self.config.image_model)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client, reading the API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key variable is not set
    /// - The HTTP client cannot be initialized
    #[instrument(name = "gemini_client_new", skip_all)]
    pub fn new(config: &StudioConfig) -> GeminiResult<Self> {
        let var = &config.gemini.api_key_env;
        let api_key = std::env::var(var)
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey(var.clone())))?;

        Self::with_api_key(api_key, config.gemini.clone(), config.retry)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(name = "gemini_client_with_api_key", skip_all)]
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: GeminiConfig,
        retry: RetryConfig,
    ) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey(
                config.api_key_env.clone(),
            )));
        }

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(
            base_url = %config.base_url,
            video_model = %config.video_model,
            image_model = %config.image_model,
            "Gemini client created"
        );

        Ok(Self {
            http,
            api_key,
            config,
            retry,
        })
    }

    /// Endpoint settings.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    fn operation_url(&self, handle: &OperationHandle) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            handle.name().trim_start_matches('/')
        )
    }

    /// Send one request and decode the JSON body.
    async fn send_once<T: DeserializeOwned>(&self, request: RequestBuilder) -> GeminiResult<T> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.without_url().to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: error_message(&body),
            }));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string())))
    }

    /// Run an attempt, retrying transient failures per the retry policy.
    async fn with_retry<T, F, Fut>(&self, operation: &'static str, attempt: F) -> GeminiResult<T>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = GeminiResult<T>> + Send,
        T: Send,
    {
        if !self.retry.enabled {
            return attempt().await;
        }

        let strategy = ExponentialBackoff::from_millis(self.retry.initial_backoff_ms)
            .factor(2)
            .max_delay(Duration::from_secs(MAX_RETRY_DELAY_SECS))
            .map(jitter)
            .take(self.retry.max_retries);

        Retry::spawn(strategy, || {
            let fut = attempt();
            async move {
                match fut.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(operation, error = %e, "Transient Gemini error, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(operation, error = %e, "Permanent Gemini error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }

    /// Submit a video generation job.
    #[instrument(skip(self, request), fields(model = %self.config.video_model, with_image = request.image().is_some()))]
    pub async fn submit_video(&self, request: &VideoRequest) -> GeminiResult<OperationHandle> {
        let body = PredictLongRunningRequest::from_request(request, &self.config.resolution);
        let url = self.model_url(&self.config.video_model, "predictLongRunning");

        let operation: OperationResponse = self
            .with_retry("submit_video", || self.send_once(self.http.post(&url).json(&body)))
            .await?;

        if operation.name.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::InvalidResponse(
                "operation name missing from submit response".to_string(),
            )));
        }

        info!(operation = %operation.name, "Video job submitted");
        Ok(OperationHandle::from(operation.name))
    }

    /// Fetch the current state of a video job.
    #[instrument(skip(self), fields(operation = %handle))]
    pub async fn poll_operation(&self, handle: &OperationHandle) -> GeminiResult<OperationState> {
        let url = self.operation_url(handle);
        let operation: OperationResponse = self
            .with_retry("poll_operation", || self.send_once(self.http.get(&url)))
            .await?;

        let state = operation.into_state();
        debug!(done = state.is_done(), "Polled video job");
        Ok(state)
    }

    /// Send an image edit and decode the returned image, if any.
    #[instrument(skip(self, request), fields(model = %self.config.image_model, mime_type = %request.image().mime_type()))]
    pub async fn generate_image_edit(
        &self,
        request: &ImageEditRequest,
    ) -> GeminiResult<Option<MediaPayload>> {
        let body = GenerateContentRequest::from_edit(request);
        let url = self.model_url(&self.config.image_model, "generateContent");

        let response: GenerateContentResponse = self
            .with_retry("edit_image", || self.send_once(self.http.post(&url).json(&body)))
            .await?;

        response.first_image()
    }

    /// Locator with the API key appended as the `key` query parameter.
    ///
    /// Generated clips are only downloadable with the key attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the locator is not an absolute URL.
    pub fn authorized_url(&self, locator: &ResourceLocator) -> GeminiResult<Url> {
        let mut url = Url::parse(locator.as_str())
            .map_err(|e| GeminiError::new(GeminiErrorKind::InvalidLocator(e.to_string())))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Download a generated clip to `path`, returning the number of bytes written.
    #[instrument(skip(self, locator, path), fields(path = %path.as_ref().display()))]
    pub async fn download_video(
        &self,
        locator: &ResourceLocator,
        path: impl AsRef<Path>,
    ) -> StudioResult<u64> {
        let url = self.authorized_url(locator)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::new(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::with_status(
                status.as_u16(),
                format!("Video download failed with status {}", status),
            )
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            ExportError::new(ExportErrorKind::Download(e.without_url().to_string()))
        })?;

        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ExportError::new(ExportErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        tokio::fs::write(path, &bytes).await.map_err(|e| {
            ExportError::new(ExportErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        info!(bytes = bytes.len(), "Video downloaded");
        Ok(bytes.len() as u64)
    }
}

#[async_trait]
impl VideoOperations for GeminiClient {
    async fn submit(&self, request: &VideoRequest) -> GenerationResult<OperationHandle> {
        Ok(self.submit_video(request).await?)
    }

    async fn poll(&self, handle: &OperationHandle) -> GenerationResult<OperationState> {
        Ok(self.poll_operation(handle).await?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.config.video_model
    }
}

#[async_trait]
impl ImageEditing for GeminiClient {
    async fn edit_image(
        &self,
        request: &ImageEditRequest,
    ) -> GenerationResult<Option<MediaPayload>> {
        Ok(self.generate_image_edit(request).await?)
    }

    fn image_provider(&self) -> &'static str {
        "gemini"
    }

    fn image_model(&self) -> &str {
        &self.config.image_model
    }
}
