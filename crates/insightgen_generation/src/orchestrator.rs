//! Generation orchestration.

use std::time::Instant;

use insightgen_core::{
    Audience, GeneratedPost, GenerationRequest, GroundingSource, ImageStyle, Platform,
};
use insightgen_error::{InsightgenError, InsightgenResult, ValidationError};
use insightgen_interface::{GenerativeBackend, ImageRequest, TextRequest};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    ExtractedContent, GenerationSettings, ImageOptions, RewriteMode, SYSTEM_INSTRUCTION,
    append_hashtags, build_prompt, dedupe_sources, extract, image_prompt, rewrite_prompt,
};

/// Coordinates prompt construction, the two backend calls, extraction and
/// post assembly.
///
/// The backend is called once per operation; retries are the caller's
/// decision.
#[derive(Debug)]
pub struct GenerationOrchestrator<B: GenerativeBackend> {
    backend: B,
    settings: GenerationSettings,
}

impl<B: GenerativeBackend> GenerationOrchestrator<B> {
    /// Creates an orchestrator with default settings.
    pub fn new(backend: B) -> Self {
        debug!(backend = backend.backend_name(), "Created orchestrator");
        Self {
            backend,
            settings: GenerationSettings::default(),
        }
    }

    /// Creates an orchestrator with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the settings fail
    /// [`GenerationSettings::validate`], e.g. a grounded-text temperature
    /// outside 0.7 to 0.85.
    pub fn with_settings(backend: B, settings: GenerationSettings) -> InsightgenResult<Self> {
        settings.validate()?;
        debug!(backend = backend.backend_name(), ?settings, "Created orchestrator");
        Ok(Self { backend, settings })
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Active settings.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generate a post with the default image options.
    ///
    /// # Errors
    ///
    /// See [`GenerationOrchestrator::generate_with`].
    pub async fn generate(&self, request: &GenerationRequest) -> InsightgenResult<GeneratedPost> {
        self.generate_with(request, &ImageOptions::default()).await
    }

    /// Generate a post, running the text and image calls concurrently.
    ///
    /// A text failure fails the whole operation as soon as it happens, even
    /// while the image call is still running (the image future is dropped).
    /// An image failure only leaves the post without an image.
    ///
    /// # Errors
    ///
    /// - validation error for a `Custom` topic without text; the backend is
    ///   not called
    /// - generation or tier-required error from the text call
    #[instrument(
        skip(self, request, image),
        fields(
            platform = %request.platform(),
            tone = %request.tone(),
            topic = request.effective_topic(),
            style = %image.style
        )
    )]
    pub async fn generate_with(
        &self,
        request: &GenerationRequest,
        image: &ImageOptions,
    ) -> InsightgenResult<GeneratedPost> {
        request.validate()?;
        let start = Instant::now();

        let text_request = TextRequest::builder()
            .prompt(build_prompt(request, *self.settings.strip_emphasis()))
            .system_instruction(Some(SYSTEM_INSTRUCTION.to_string()))
            .search_enabled(*self.settings.search_enabled())
            .temperature(Some(*self.settings.temperature()))
            .reasoning_budget(self.settings.reasoning_budget())
            .model(self.settings.text_model().clone())
            .build()
            .map_err(|e| ValidationError::new(e.to_string()))?;

        debug!("Issuing text and image calls");

        let text = async {
            let response = self.backend.generate_text(&text_request).await.map_err(|e| {
                error!(error = %e, "Text generation failed");
                e
            })?;
            let extracted = extract(response.text(), *self.settings.strip_emphasis());
            let sources = dedupe_sources(response.citations());
            debug!(
                degraded = extracted.degraded,
                citations = response.citations().len(),
                sources = sources.len(),
                "Text response processed"
            );
            Ok::<_, InsightgenError>((extracted, sources))
        };
        let illustration =
            async { Ok::<_, InsightgenError>(self.image_or_none(request, image).await) };

        let ((extracted, sources), image_url) = tokio::try_join!(text, illustration)?;

        let post = self.assemble(request, extracted, sources, image_url)?;

        info!(
            duration_ms = start.elapsed().as_millis(),
            chars = post.content().chars().count(),
            sources = post.sources().len(),
            has_image = post.image_url().is_some(),
            "Post generated"
        );
        Ok(post)
    }

    fn assemble(
        &self,
        request: &GenerationRequest,
        extracted: ExtractedContent,
        sources: Vec<GroundingSource>,
        image_url: Option<String>,
    ) -> InsightgenResult<GeneratedPost> {
        let content = append_hashtags(
            &extracted.post_content,
            &extracted.hashtags,
            request.options().hashtags,
            *request.platform(),
        );

        GeneratedPost::builder()
            .research_summary(extracted.research_summary)
            .content_angle(extracted.content_angle)
            .content(content)
            .hashtags(extracted.hashtags)
            .sources(sources)
            .image_url(image_url)
            .build()
            .map_err(|e| ValidationError::new(e.to_string()).into())
    }

    /// Generate a replacement image for an existing post.
    ///
    /// Returns a data URI, or `None` when the backend produced nothing or
    /// failed. Text content is untouched.
    #[instrument(skip(self, request), fields(platform = %request.platform()))]
    pub async fn regenerate_image(
        &self,
        request: &GenerationRequest,
        style: ImageStyle,
    ) -> Option<String> {
        self.image_or_none(request, &ImageOptions::with_style(style))
            .await
    }

    /// Like [`GenerationOrchestrator::regenerate_image`] with full options.
    pub async fn regenerate_image_with(
        &self,
        request: &GenerationRequest,
        options: &ImageOptions,
    ) -> Option<String> {
        self.image_or_none(request, options).await
    }

    /// Image step shared by generation and regeneration. Failures are
    /// absorbed here and never escape.
    async fn image_or_none(
        &self,
        request: &GenerationRequest,
        options: &ImageOptions,
    ) -> Option<String> {
        let aspect_ratio = options.resolve_aspect_ratio(request);
        let image_request = match ImageRequest::builder()
            .prompt(image_prompt(request, options, aspect_ratio))
            .aspect_ratio(aspect_ratio)
            .build()
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Could not build image request");
                return None;
            }
        };

        match self.backend.generate_image(&image_request).await {
            Ok(Some(image)) => {
                debug!(mime_type = %image.mime_type, bytes = image.data.len(), "Image attached");
                Some(image.to_data_uri())
            }
            Ok(None) => {
                debug!("Backend returned no image");
                None
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed; continuing without image");
                None
            }
        }
    }

    /// Rewrite `content` for `audience`.
    ///
    /// An empty backend reply returns `content` unchanged. In
    /// [`RewriteMode::BestEffort`] a backend failure does too.
    ///
    /// # Errors
    ///
    /// In [`RewriteMode::Strict`], generation and tier-required errors from
    /// the backend.
    #[instrument(skip(self, content), fields(%platform, %audience, %mode, len = content.len()))]
    pub async fn rewrite(
        &self,
        content: &str,
        platform: Platform,
        audience: Audience,
        mode: RewriteMode,
    ) -> InsightgenResult<String> {
        let request = TextRequest::builder()
            .prompt(rewrite_prompt(content, platform, audience))
            .temperature(Some(*self.settings.rewrite_temperature()))
            .model(self.settings.rewrite_model().clone())
            .build()
            .map_err(|e| ValidationError::new(e.to_string()))?;

        match self.backend.generate_text(&request).await {
            Ok(response) if response.text().trim().is_empty() => {
                warn!("Rewrite returned no text; keeping original");
                Ok(content.to_string())
            }
            Ok(response) => {
                info!(chars = response.text().chars().count(), "Rewrite complete");
                Ok(response.text().clone())
            }
            Err(e) if mode == RewriteMode::BestEffort => {
                warn!(error = %e, "Rewrite failed; keeping original");
                Ok(content.to_string())
            }
            Err(e) => {
                error!(error = %e, "Rewrite failed");
                Err(e)
            }
        }
    }
}
