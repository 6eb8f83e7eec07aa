//! Credential gating.
//!
//! Nothing in the session talks to the remote API until access has been
//! granted. Choosing a credential is a two-step protocol: the gate first
//! enters [`AccessState::AssumedGranted`], then immediately re-runs the
//! authoritative check, which may revert it.

use async_trait::async_trait;
use studio_config::GeminiConfig;
use studio_error::StudioResult;
use studio_interface::AccessProvider;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Where the gate stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AccessState {
    /// The first check has not finished
    #[default]
    #[display("checking")]
    Checking,
    /// The provider confirmed a usable credential
    #[display("granted")]
    Granted,
    /// No usable credential
    #[display("denied")]
    Denied,
    /// A credential was just selected and is awaiting confirmation
    #[display("assumed granted")]
    AssumedGranted,
}

impl AccessState {
    /// Whether generation may proceed.
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessState::Granted | AccessState::AssumedGranted)
    }
}

/// Access gate over an [`AccessProvider`].
#[derive(Debug)]
pub struct AccessGate<P> {
    provider: P,
    state: RwLock<AccessState>,
}

impl<P: AccessProvider> AccessGate<P> {
    /// Create a gate in the `Checking` state.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: RwLock::new(AccessState::Checking),
        }
    }

    /// Current state.
    pub async fn state(&self) -> AccessState {
        *self.state.read().await
    }

    /// Run the authoritative check and record the answer.
    ///
    /// A provider error is logged; the state then becomes `Denied` unless
    /// access was already granted.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> AccessState {
        let answer = self.provider.has_access().await;
        let mut state = self.state.write().await;
        match answer {
            Ok(true) => *state = AccessState::Granted,
            Ok(false) => *state = AccessState::Denied,
            Err(e) => {
                warn!(error = %e, "Error checking access credential");
                if !state.is_granted() {
                    *state = AccessState::Denied;
                }
            }
        }
        info!(state = %*state, "Access checked");
        *state
    }

    /// Open credential selection, assume success, then re-verify.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the selection could not be opened; the
    /// state is left unchanged in that case.
    #[instrument(skip(self))]
    pub async fn select(&self) -> StudioResult<AccessState> {
        self.provider.open_selection().await?;
        *self.state.write().await = AccessState::AssumedGranted;
        debug!("Credential selected, re-checking");
        Ok(self.verify().await)
    }
}

/// Access provider backed by an environment variable.
///
/// A `.env` file in the working directory is loaded first, so either source
/// works. Selection has no dialog here; it re-reads `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAccessProvider {
    var: String,
}

impl EnvAccessProvider {
    /// Provider checking `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Provider checking the configured API key variable.
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.api_key_env.clone())
    }

    /// Variable name.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvAccessProvider {
    fn default() -> Self {
        Self::from_config(&GeminiConfig::default())
    }
}

#[async_trait]
impl AccessProvider for EnvAccessProvider {
    async fn has_access(&self) -> StudioResult<bool> {
        dotenvy::dotenv().ok();
        let present = std::env::var(&self.var)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false);
        debug!(var = %self.var, present, "Checked credential variable");
        Ok(present)
    }

    async fn open_selection(&self) -> StudioResult<()> {
        dotenvy::dotenv_override().ok();
        Ok(())
    }
}
