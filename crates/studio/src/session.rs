//! The session context shared by every Studio component.

use std::path::PathBuf;
use std::sync::Arc;
use studio_config::StudioConfig;
use studio_error::{StoryboardError, StoryboardErrorKind, StudioResult};
use studio_interface::{AccessProvider, ImageEditing, OnlineSignal, VideoOperations};
use studio_models::{GeminiClient, OperationClient};
use studio_storyboard::{
    BatchOrchestrator, BatchOutcome, ImageEditFlow, ManifestExporter, StoryboardStore, VideoFlow,
};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::{AccessGate, EnvAccessProvider};

/// Submit-and-await client used by a session.
pub type StudioClient<B = GeminiClient> = OperationClient<B, OnlineSignal>;

type BackendFactory<B> = Box<dyn Fn(&StudioConfig) -> StudioResult<B> + Send + Sync>;

/// Everything a Studio front end needs, passed explicitly.
///
/// Holds the configuration, the connectivity signal, the access gate and the
/// storyboard. The remote client is created on first use, and only once
/// access has been granted; it then lives as long as the session.
pub struct StudioSession<P, B = GeminiClient> {
    config: StudioConfig,
    online: OnlineSignal,
    access: AccessGate<P>,
    store: StoryboardStore,
    exporter: ManifestExporter,
    factory: BackendFactory<B>,
    client: OnceCell<Arc<StudioClient<B>>>,
}

impl<P, B> std::fmt::Debug for StudioSession<P, B>
where
    P: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioSession")
            .field("config", &self.config)
            .field("online", &self.online)
            .field("access", &self.access)
            .field("exporter", &self.exporter)
            .field("client_ready", &self.client.initialized())
            .finish_non_exhaustive()
    }
}

impl<P: AccessProvider> StudioSession<P, GeminiClient> {
    /// Session talking to the Gemini API.
    ///
    /// The API key is read from the configured environment variable when the
    /// client is first needed.
    pub fn new(config: StudioConfig, provider: P) -> Self {
        Self::with_backend(config, provider, |config| Ok(GeminiClient::new(config)?))
    }
}

impl StudioSession<EnvAccessProvider, GeminiClient> {
    /// Gemini session gated on the configured API key variable.
    pub fn from_config(config: StudioConfig) -> Self {
        let provider = EnvAccessProvider::from_config(&config.gemini);
        Self::new(config, provider)
    }
}

impl<P, B> StudioSession<P, B>
where
    P: AccessProvider,
    B: VideoOperations + ImageEditing + 'static,
{
    /// Session over a custom backend, built by `factory` on first use.
    pub fn with_backend<F>(config: StudioConfig, provider: P, factory: F) -> Self
    where
        F: Fn(&StudioConfig) -> StudioResult<B> + Send + Sync + 'static,
    {
        Self {
            store: StoryboardStore::from_config(&config.storyboard),
            exporter: ManifestExporter::from_config(&config.export),
            online: OnlineSignal::default(),
            access: AccessGate::new(provider),
            factory: Box::new(factory),
            client: OnceCell::new(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Connectivity signal; the host flips it with [`OnlineSignal::set_online`].
    pub fn online(&self) -> &OnlineSignal {
        &self.online
    }

    /// Credential gate.
    pub fn access(&self) -> &AccessGate<P> {
        &self.access
    }

    /// Shared storyboard.
    pub fn store(&self) -> &StoryboardStore {
        &self.store
    }

    /// Manifest exporter for the configured directory.
    pub fn exporter(&self) -> &ManifestExporter {
        &self.exporter
    }

    /// The remote client, created on first call.
    ///
    /// # Errors
    ///
    /// Fails with [`StoryboardErrorKind::AccessDenied`] until access is
    /// granted, or with the backend's error if it cannot be created.
    #[instrument(skip(self))]
    pub async fn client(&self) -> StudioResult<Arc<StudioClient<B>>> {
        let state = self.access.state().await;
        if !state.is_granted() {
            debug!(%state, "Client requested without access");
            return Err(StoryboardError::new(StoryboardErrorKind::AccessDenied).into());
        }

        let client = self
            .client
            .get_or_try_init(|| async {
                let backend = (self.factory)(&self.config)?;
                debug!("Remote client created");
                Ok::<_, studio_error::StudioError>(Arc::new(OperationClient::new(
                    backend,
                    self.online.clone(),
                    self.config.polling,
                )))
            })
            .await?;
        Ok(client.clone())
    }

    /// Batch orchestrator over the session client.
    pub async fn orchestrator(
        &self,
    ) -> StudioResult<BatchOrchestrator<Arc<StudioClient<B>>, OnlineSignal>> {
        Ok(BatchOrchestrator::new(self.client().await?, self.online.clone()))
    }

    /// Fresh single video flow.
    pub async fn video_flow(&self) -> StudioResult<VideoFlow<Arc<StudioClient<B>>, OnlineSignal>> {
        let mut flow = VideoFlow::new(self.client().await?, self.online.clone());
        flow.set_aspect_ratio(self.config.storyboard.aspect_ratio);
        Ok(flow)
    }

    /// Fresh image edit flow.
    pub async fn image_edit_flow(
        &self,
    ) -> StudioResult<ImageEditFlow<Arc<StudioClient<B>>, OnlineSignal>> {
        Ok(ImageEditFlow::new(self.client().await?, self.online.clone()))
    }

    /// Generate every shot of the storyboard.
    pub async fn run_batch(&self) -> StudioResult<BatchOutcome> {
        Ok(self.orchestrator().await?.run_all(&self.store).await)
    }

    /// Export completed shots. `Ok(None)` when there are none.
    pub async fn export(&self) -> StudioResult<Option<PathBuf>> {
        self.exporter.export(&self.store).await
    }
}
