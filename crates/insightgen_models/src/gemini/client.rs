//! Gemini REST client.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use insightgen_core::ImageData;
use insightgen_error::{ConfigError, GenerationError, GenerationErrorKind, InsightgenResult};
use insightgen_interface::{Citation, GenerativeBackend, ImageRequest, TextRequest, TextResponse};
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, GoogleSearch,
    ImageConfig, ThinkingConfig, Tool,
};
use super::error::classify_failure;

/// Public Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for grounded text and rewrites.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Model used for images.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Gemini backend over the `generateContent` REST endpoint.
///
/// One attempt per call; failures are classified once and returned.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client with the default endpoint and models.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `api_key` is blank.
    #[instrument(skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> InsightgenResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::new(
                "Gemini API key is missing. Set GEMINI_API_KEY or [gemini].api_key",
            )
            .into());
        }

        debug!(
            base_url = DEFAULT_BASE_URL,
            text_model = DEFAULT_TEXT_MODEL,
            image_model = DEFAULT_IMAGE_MODEL,
            "Created Gemini client"
        );

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        })
    }

    /// Point the client at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the default text model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Override the image model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Default text model.
    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    /// Image model.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    #[instrument(skip(self, body), fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> InsightgenResult<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(url = %url, "Sending request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GenerationError::new(GenerationErrorKind::ApiRequest(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Gemini API error");
            return Err(classify_failure(status.as_u16(), &error_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            GenerationError::new(GenerationErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        if parsed.candidates.is_empty() {
            let reason = parsed
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            error!(reason = %reason, "Gemini returned no candidates");
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        debug!(
            candidates = parsed.candidates.len(),
            finish_reason = ?parsed.candidates[0].finish_reason,
            "Received response"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    #[instrument(
        skip(self, request),
        fields(
            search = request.search_enabled(),
            temperature = ?request.temperature(),
            prompt_len = request.prompt().len()
        )
    )]
    async fn generate_text(&self, request: &TextRequest) -> InsightgenResult<TextResponse> {
        let model = request.model().as_deref().unwrap_or(self.text_model.as_str());

        let tools = if *request.search_enabled() {
            vec![Tool {
                google_search: GoogleSearch::default(),
            }]
        } else {
            Vec::new()
        };

        let body = GenerateContentRequest::builder()
            .contents(vec![Content::user(request.prompt().clone())])
            .system_instruction(request.system_instruction().clone().map(Content::instruction))
            .tools(tools)
            .generation_config(Some(GenerationConfig {
                temperature: *request.temperature(),
                thinking_config: (*request.reasoning_budget()).map(|budget| ThinkingConfig {
                    thinking_budget: budget,
                }),
                image_config: None,
            }))
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::ApiRequest(e.to_string())))?;

        let response = self.generate_content(model, &body).await?;

        let citations: Vec<Citation> = response
            .web_chunks()
            .map(|chunk| Citation {
                title: chunk.title.clone(),
                uri: chunk.uri.clone(),
            })
            .collect();
        let text = response.text();

        debug!(
            text_len = text.len(),
            citations = citations.len(),
            "Text generation complete"
        );
        Ok(TextResponse::new(text, citations))
    }

    #[instrument(skip(self, request), fields(aspect_ratio = %request.aspect_ratio()))]
    async fn generate_image(&self, request: &ImageRequest) -> InsightgenResult<Option<ImageData>> {
        let body = GenerateContentRequest::builder()
            .contents(vec![Content::user(request.prompt().clone())])
            .generation_config(Some(GenerationConfig {
                temperature: None,
                thinking_config: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: request.aspect_ratio().as_str().to_string(),
                }),
            }))
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::ApiRequest(e.to_string())))?;

        let response = self.generate_content(&self.image_model, &body).await?;

        let Some(inline) = response.inline_data() else {
            debug!("Image response carried no inline data");
            return Ok(None);
        };

        let data = STANDARD.decode(inline.data.as_bytes()).map_err(|e| {
            GenerationError::new(GenerationErrorKind::ResponseParsing(format!(
                "Invalid base64 image payload: {}",
                e
            )))
        })?;

        debug!(mime_type = %inline.mime_type, bytes = data.len(), "Image generation complete");
        Ok(Some(ImageData::new(inline.mime_type.clone(), data)))
    }

    fn backend_name(&self) -> &str {
        "gemini"
    }
}
