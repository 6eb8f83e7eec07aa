//! Output aspect ratio.

use serde::{Deserialize, Serialize};

/// Aspect ratio of a generated video.
///
/// # Examples
///
/// ```
/// use studio_core::AspectRatio;
///
/// let ratio: AspectRatio = "9:16".parse().unwrap();
/// assert_eq!(ratio, AspectRatio::Portrait);
/// assert_eq!(AspectRatio::default().as_str(), "16:9");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// 16:9 landscape
    #[default]
    #[serde(rename = "16:9")]
    #[display("16:9")]
    Landscape,
    /// 9:16 portrait
    #[serde(rename = "9:16")]
    #[display("9:16")]
    Portrait,
}

impl AspectRatio {
    /// Wire representation expected by the generation API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            other => Err(format!("Unknown aspect ratio: {}", other)),
        }
    }
}
