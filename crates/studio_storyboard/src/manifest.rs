//! Storyboard manifest export.

use crate::{Storyboard, StoryboardStore};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use studio_config::ExportConfig;
use studio_core::{ResourceLocator, ShotDuration, Transition};
use studio_error::{ExportError, ExportErrorKind, JsonError, StudioResult};
use tracing::{debug, info, instrument};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Valid whitespace regex"));

/// Suffix appended to the file name stem.
const FILE_SUFFIX: &str = "-storyboard.json";

/// One completed shot in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestShot {
    /// Shot prompt
    pub prompt: String,
    /// Generated video locator
    pub video_uri: ResourceLocator,
    /// Advisory duration in seconds
    pub duration: ShotDuration,
    /// Advisory transition
    pub transition: Transition,
}

/// Exported storyboard document.
///
/// ```json
/// {
///   "title": "My Storyboard",
///   "shots": [{"prompt": "...", "videoUri": "...", "duration": 5, "transition": "fade"}],
///   "createdAt": "2025-01-01T12:00:00.000Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Storyboard title
    pub title: String,
    /// Completed shots, in storyboard order
    pub shots: Vec<ManifestShot>,
    /// Export time, ISO-8601 UTC with milliseconds
    #[serde(serialize_with = "serialize_millis", deserialize_with = "deserialize_rfc3339")]
    pub created_at: DateTime<Utc>,
}

fn serialize_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_rfc3339<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

impl Manifest {
    /// Build a manifest from the completed shots, or `None` if there are none.
    pub fn from_storyboard(storyboard: &Storyboard, created_at: DateTime<Utc>) -> Option<Self> {
        let shots: Vec<ManifestShot> = storyboard
            .shots()
            .iter()
            .filter_map(|shot| {
                shot.result().map(|locator| ManifestShot {
                    prompt: shot.prompt().clone(),
                    video_uri: locator.clone(),
                    duration: *shot.duration(),
                    transition: *shot.transition(),
                })
            })
            .collect();

        if shots.is_empty() {
            return None;
        }

        Some(Self {
            title: storyboard.title().clone(),
            shots,
            created_at,
        })
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, JsonError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(e.to_string(), "storyboard manifest"))
    }
}

/// Writes manifests into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestExporter {
    directory: PathBuf,
}

impl ManifestExporter {
    /// Exporter writing into `directory`, created on demand.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Exporter for the configured directory.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.directory.clone())
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name for a title: whitespace runs become `-`, then `-storyboard.json`.
    ///
    /// Path separators are replaced too so the file always lands in the
    /// export directory.
    ///
    /// ```
    /// use studio_storyboard::ManifestExporter;
    ///
    /// assert_eq!(ManifestExporter::file_name("My  Storyboard"), "My-Storyboard-storyboard.json");
    /// ```
    pub fn file_name(title: &str) -> String {
        let stem = WHITESPACE.replace_all(title, "-").replace(['/', '\\'], "-");
        format!("{}{}", stem, FILE_SUFFIX)
    }

    /// Export the store's current state. See [`ManifestExporter::export_storyboard`].
    pub async fn export(&self, store: &StoryboardStore) -> StudioResult<Option<PathBuf>> {
        let storyboard = store.snapshot().await;
        self.export_storyboard(&storyboard).await
    }

    /// Write the completed shots of `storyboard`, stamped with the current time.
    ///
    /// Returns `Ok(None)` without writing anything when no shot has completed.
    #[instrument(skip(self, storyboard), fields(title = %storyboard.title(), directory = %self.directory.display()))]
    pub async fn export_storyboard(&self, storyboard: &Storyboard) -> StudioResult<Option<PathBuf>> {
        let Some(manifest) = Manifest::from_storyboard(storyboard, Utc::now()) else {
            debug!("No completed shots, nothing to export");
            return Ok(None);
        };

        let json = manifest.to_json()?;
        let path = self.directory.join(Self::file_name(&manifest.title));
        self.write_atomic(&path, json.as_bytes()).await?;

        info!(path = %path.display(), shots = manifest.shots.len(), "Manifest exported");
        Ok(Some(path))
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), ExportError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                ExportError::new(ExportErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    self.directory.display(),
                    e
                )))
            })?;

        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, contents).await.map_err(|e| {
            ExportError::new(ExportErrorKind::FileWrite(format!(
                "{}: {}",
                temp.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp, path).await.map_err(|e| {
            ExportError::new(ExportErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(())
    }
}
