//! Image prompt construction.

use insightgen_core::{AspectRatio, GenerationRequest, ImageStyle};

/// Caller choices for the illustration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// Art style
    pub style: ImageStyle,
    /// Explicit aspect ratio; the platform default applies otherwise
    pub aspect_ratio: Option<AspectRatio>,
    /// Free-text description replacing the topic-derived subject
    pub description: Option<String>,
}

impl ImageOptions {
    /// Options with only a style set.
    pub fn with_style(style: ImageStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// The aspect ratio to request for `request`.
    pub fn resolve_aspect_ratio(&self, request: &GenerationRequest) -> AspectRatio {
        self.aspect_ratio
            .unwrap_or_else(|| request.platform().default_aspect_ratio())
    }
}

impl From<ImageStyle> for ImageOptions {
    fn from(style: ImageStyle) -> Self {
        Self::with_style(style)
    }
}

/// Prompt for the image call.
///
/// A non-blank manual description replaces the topic; either way the prompt
/// forbids text inside the image.
pub fn image_prompt(
    request: &GenerationRequest,
    options: &ImageOptions,
    aspect_ratio: AspectRatio,
) -> String {
    let subject = match options
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        Some(description) => format!(
            "Create a digital illustration based on this description: \"{}\".",
            description
        ),
        None => format!(
            "Create a professional, modern, high-quality digital illustration suitable for a {} post about: \"{}\".",
            request.platform().display_name(),
            request.effective_topic()
        ),
    };

    format!(
        "{}\nStyle: {} art style.\nMood: {}.\nAspect Ratio: {}.\nImportant: Do not include any text or words inside the image.",
        subject,
        options.style,
        request.tone(),
        aspect_ratio
    )
}
