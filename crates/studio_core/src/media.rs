//! Media payloads and remote resource locators.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Binary media content with its declared MIME type.
///
/// Used both for source images uploaded by the user and for edited images
/// returned by the API.
///
/// # Examples
///
/// ```
/// use studio_core::MediaPayload;
///
/// let png = MediaPayload::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(png.to_data_uri(), "data:image/png;base64,iVBORw==");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct MediaPayload {
    /// MIME type, e.g. "image/png"
    mime_type: String,
    /// Raw bytes
    data: Vec<u8>,
}

impl MediaPayload {
    /// Create a payload from raw bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Decode a payload from base64 text as returned inline by the API.
    pub fn from_base64(
        mime_type: impl Into<String>,
        encoded: &str,
    ) -> Result<Self, base64::DecodeError> {
        Ok(Self::new(mime_type, STANDARD.decode(encoded)?))
    }

    /// Base64 encoding of the bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// `data:` URI for immediate display.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// True when no bytes are present.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Opaque URI identifying a generated asset on the remote service.
///
/// ```
/// use studio_core::ResourceLocator;
///
/// let uri = ResourceLocator::from("https://example.com/v1/files/abc:download?alt=media");
/// assert!(uri.as_str().starts_with("https://"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ResourceLocator(String);

impl ResourceLocator {
    /// Borrow the locator text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceLocator {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
