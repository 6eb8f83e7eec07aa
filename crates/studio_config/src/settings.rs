//! Configuration structures and layered loading.

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use studio_core::{AspectRatio, MAX_SHOTS, ShotDuration, Transition};
use studio_error::{ConfigError, StudioError, StudioResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../studio.toml");

/// Remote API endpoint and model selection.
///
/// ```toml
/// [gemini]
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// video_model = "veo-3.1-fast-generate-preview"
/// image_model = "gemini-2.5-flash-image"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// REST base URL, without trailing slash
    pub base_url: String,
    /// Model used for long-running video jobs
    pub video_model: String,
    /// Model used for image edits
    pub image_model: String,
    /// Fixed output resolution tier sent with every video job
    pub resolution: String,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            resolution: "720p".to_string(),
            request_timeout_secs: 60,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl GeminiConfig {
    /// HTTP timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Polling policy for long-running jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds slept before each status query
    pub interval_secs: u64,
    /// Upper bound on the total wait for one job
    pub max_wait_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            max_wait_secs: 3600,
        }
    }
}

impl PollingConfig {
    /// Sleep between polls.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Maximum total wait.
    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

/// Retry policy for transient HTTP failures of a single API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retry transient failures at all
    pub enabled: bool,
    /// Attempts after the first
    pub max_retries: usize,
    /// First backoff delay; later delays grow exponentially
    pub initial_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            initial_backoff_ms: 1000,
        }
    }
}

/// Defaults for a new storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoryboardConfig {
    /// Initial title
    pub title: String,
    /// Number of idle shots a new storyboard starts with
    pub initial_shots: usize,
    /// Cap on the number of shots, at most 10
    pub max_shots: usize,
    /// Duration given to new shots
    pub default_duration_secs: u32,
    /// Transition given to new shots
    pub default_transition: Transition,
    /// Aspect ratio shared by every shot in a batch
    pub aspect_ratio: AspectRatio,
}

impl Default for StoryboardConfig {
    fn default() -> Self {
        Self {
            title: "My Storyboard".to_string(),
            initial_shots: 3,
            max_shots: 10,
            default_duration_secs: ShotDuration::DEFAULT as u32,
            default_transition: Transition::Fade,
            aspect_ratio: AspectRatio::Landscape,
        }
    }
}

impl StoryboardConfig {
    /// Default duration, clamped into the valid range.
    pub fn default_duration(&self) -> ShotDuration {
        ShotDuration::clamped(self.default_duration_secs)
    }
}

/// Where manifests are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target directory, created on first export
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Top-level Studio configuration.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Bundled defaults (`studio.toml` shipped with the library)
/// 2. `~/.config/studio/studio.toml`
/// 3. `./studio.toml`
///
/// # Example
///
/// ```no_run
/// use studio_config::StudioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StudioConfig::load()?;
/// println!("Polling every {:?}", config.polling.interval());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StudioConfig {
    /// Remote API settings
    pub gemini: GeminiConfig,
    /// Long-running job polling
    pub polling: PollingConfig,
    /// Transient failure retry
    pub retry: RetryConfig,
    /// New storyboard defaults
    pub storyboard: StoryboardConfig,
    /// Manifest export
    pub export: ExportConfig,
}

impl StudioConfig {
    /// Load configuration from a specific file path.
    ///
    /// Keys missing from the file fall back to the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StudioResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StudioError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StudioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> StudioResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/studio/studio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("studio").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                StudioError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StudioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse the bundled defaults only, ignoring user files.
    pub fn bundled() -> StudioResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(|e| {
                StudioError::from(ConfigError::new(format!(
                    "Failed to build bundled configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StudioError::from(ConfigError::new(format!(
                    "Failed to parse bundled configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::new("polling.interval_secs must be positive"));
        }
        if self.polling.max_wait_secs < self.polling.interval_secs {
            return Err(ConfigError::new(format!(
                "polling.max_wait_secs ({}) must be at least polling.interval_secs ({})",
                self.polling.max_wait_secs, self.polling.interval_secs
            )));
        }
        if self.storyboard.max_shots == 0 || self.storyboard.max_shots > MAX_SHOTS {
            return Err(ConfigError::new(format!(
                "storyboard.max_shots ({}) must be between 1 and {}",
                self.storyboard.max_shots, MAX_SHOTS
            )));
        }
        if self.storyboard.initial_shots == 0
            || self.storyboard.initial_shots > self.storyboard.max_shots
        {
            return Err(ConfigError::new(format!(
                "storyboard.initial_shots ({}) must be between 1 and max_shots ({})",
                self.storyboard.initial_shots, self.storyboard.max_shots
            )));
        }
        let min = ShotDuration::MIN as u32;
        let max = ShotDuration::MAX as u32;
        if !(min..=max).contains(&self.storyboard.default_duration_secs) {
            return Err(ConfigError::new(format!(
                "storyboard.default_duration_secs ({}) must be between {} and {}",
                self.storyboard.default_duration_secs, min, max
            )));
        }
        if self.gemini.base_url.trim().is_empty() {
            return Err(ConfigError::new("gemini.base_url must not be empty"));
        }
        Ok(())
    }
}
