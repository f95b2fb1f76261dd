//! Image styles, aspect ratios and embedded image payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use insightgen_error::{PublishError, PublishErrorKind};
use serde::{Deserialize, Serialize};

/// Art style modifier for generated images.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum ImageStyle {
    /// Clean, sparse composition
    #[default]
    Minimalist,
    /// Photographic rendering
    Photorealistic,
    /// Abstract shapes and color fields
    Abstract,
    /// Neon, high-tech aesthetic
    Cyberpunk,
    /// Polished business look
    Corporate,
    /// Soft painted look
    Watercolor,
}

/// Aspect ratios accepted by the image backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum AspectRatio {
    /// 1:1
    #[serde(rename = "1:1")]
    Square,
    /// 4:3
    #[serde(rename = "4:3")]
    Landscape,
    /// 16:9
    #[serde(rename = "16:9")]
    Widescreen,
    /// 3:4
    #[serde(rename = "3:4")]
    Portrait,
    /// 9:16
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    /// Wire form, e.g. `"16:9"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Tall => "9:16",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary image returned by the image backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl ImageData {
    /// Create an image payload.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Encode as a `data:<mime>;base64,<payload>` URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use insightgen_core::ImageData;
    ///
    /// let image = ImageData::new("image/png", vec![1, 2, 3]);
    /// assert_eq!(image.to_data_uri(), "data:image/png;base64,AQID");
    /// ```
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// Decode a base64 data URI.
    ///
    /// Returns `Ok(None)` when `uri` is not a data URI at all (for instance a
    /// remote `https://` reference).
    ///
    /// # Errors
    ///
    /// A [`PublishErrorKind::InvalidImage`] error when `uri` is a data URI
    /// that cannot be decoded.
    pub fn from_data_uri(uri: &str) -> Result<Option<Self>, PublishError> {
        let Some(rest) = uri.strip_prefix("data:") else {
            return Ok(None);
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid_image("data URI has no payload separator".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid_image(format!("data URI is not base64 encoded: {}", header)))?;
        let mime_type = if mime_type.is_empty() {
            "application/octet-stream"
        } else {
            mime_type
        };

        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| invalid_image(format!("invalid base64 payload: {}", e)))?;

        Ok(Some(Self::new(mime_type, data)))
    }
}

#[track_caller]
fn invalid_image(reason: String) -> PublishError {
    PublishError::new(PublishErrorKind::InvalidImage(reason))
}
