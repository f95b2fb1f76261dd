//! Generative backend trait and its request/response types.

use async_trait::async_trait;
use derive_getters::Getters;
use insightgen_core::{AspectRatio, ImageData};
use insightgen_error::InsightgenResult;
use serde::{Deserialize, Serialize};

/// Grounded text generation call.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct TextRequest {
    /// User prompt
    prompt: String,
    /// System instruction sent alongside the prompt
    #[builder(default)]
    system_instruction: Option<String>,
    /// Enable search augmentation
    #[builder(default)]
    search_enabled: bool,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Extended reasoning budget hint, in tokens
    #[builder(default)]
    reasoning_budget: Option<u32>,
    /// Override of the backend's default text model
    #[builder(default)]
    model: Option<String>,
}

impl TextRequest {
    /// Start building a text request.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

/// A citation candidate as reported by the backend.
///
/// Either field may be missing; the deduplicator drops incomplete entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Page title
    pub title: Option<String>,
    /// Page locator
    pub uri: Option<String>,
}

impl Citation {
    /// A citation with both fields present.
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            uri: Some(uri.into()),
        }
    }
}

/// Reply to a [`TextRequest`].
#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct TextResponse {
    /// Raw model text; empty when the backend returned no text part
    text: String,
    /// Citation metadata in backend order
    citations: Vec<Citation>,
}

impl TextResponse {
    /// Create a response.
    pub fn new(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            text: text.into(),
            citations,
        }
    }
}

/// Image generation call.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Full image prompt
    prompt: String,
    /// Requested aspect ratio
    aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// Start building an image request.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// A generative AI backend.
///
/// Implementations own transport and classify backend failures into the
/// named error kinds once, at this boundary.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate text, optionally grounded in web search.
    ///
    /// # Errors
    ///
    /// Returns a generation error on transport or backend failure and a
    /// tier-required error when the backend reports an entitlement or quota
    /// condition.
    async fn generate_text(&self, request: &TextRequest) -> InsightgenResult<TextResponse>;

    /// Generate an image. `Ok(None)` means the backend answered without one.
    ///
    /// # Errors
    ///
    /// Same classification as [`GenerativeBackend::generate_text`].
    async fn generate_image(&self, request: &ImageRequest) -> InsightgenResult<Option<ImageData>>;

    /// Backend name for logging.
    fn backend_name(&self) -> &str;
}
