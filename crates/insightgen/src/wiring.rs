//! Construction of the runtime components from an [`InsightgenConfig`].

use std::sync::Arc;

use insightgen_error::{ConfigError, InsightgenResult};
use insightgen_generation::{GenerationOrchestrator, GenerationSettings};
use insightgen_models::GeminiClient;
use insightgen_social::{
    FileCredentialStore, GraphApiClient, GraphApiSettings, PublishSessionManager,
};
use tracing::{debug, instrument};

use crate::InsightgenConfig;

/// Orchestrator over the Gemini backend.
pub type GeminiOrchestrator = GenerationOrchestrator<GeminiClient>;

/// Session manager over the Graph API with the file store.
pub type FacebookSessionManager = PublishSessionManager<GraphApiClient, FileCredentialStore>;

impl InsightgenConfig {
    /// Gemini client for the configured key, endpoint and models.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is configured.
    pub fn gemini_client(&self) -> InsightgenResult<GeminiClient> {
        let gemini = self.gemini();
        let key = gemini.api_key().clone().unwrap_or_default();
        Ok(GeminiClient::new(key)?
            .with_base_url(gemini.base_url().clone())
            .with_text_model(gemini.text_model().clone())
            .with_image_model(gemini.image_model().clone()))
    }

    /// Validated generation settings, with the `[gemini]` rewrite model
    /// applied unless `[generation]` already names one.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for out-of-range temperatures.
    pub fn generation_settings(&self) -> InsightgenResult<GenerationSettings> {
        let settings = self.generation();
        settings.validate()?;

        if settings.rewrite_model().is_some() || self.gemini().rewrite_model().is_none() {
            return Ok(settings.clone());
        }

        GenerationSettings::builder()
            .temperature(*settings.temperature())
            .rewrite_temperature(*settings.rewrite_temperature())
            .thinking_budget(*settings.thinking_budget())
            .strip_emphasis(*settings.strip_emphasis())
            .search_enabled(*settings.search_enabled())
            .text_model(settings.text_model().clone())
            .rewrite_model(self.gemini().rewrite_model().clone())
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Generation orchestrator ready to use.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the API key is missing or the
    /// generation settings are invalid.
    #[instrument(skip(self))]
    pub fn orchestrator(&self) -> InsightgenResult<GeminiOrchestrator> {
        let settings = self.generation_settings()?;
        let client = self.gemini_client()?;
        debug!("Building generation orchestrator");
        GenerationOrchestrator::with_settings(client, settings)
    }

    /// Graph API connection settings.
    pub fn graph_settings(&self) -> GraphApiSettings {
        let facebook = self.facebook();
        GraphApiSettings::builder()
            .base_url(facebook.graph_base_url().clone())
            .version(facebook.graph_version().clone())
            .user_access_token(facebook.user_access_token().clone())
            .build()
            .unwrap_or_default()
    }

    /// Credential store at the configured or default location.
    ///
    /// # Errors
    ///
    /// Returns a store error when no location is configured and the platform
    /// has no per-user configuration directory.
    pub fn credential_store(&self) -> InsightgenResult<FileCredentialStore> {
        let path = match self.facebook().store_path() {
            Some(path) => path.clone(),
            None => FileCredentialStore::default_location()?,
        };
        Ok(FileCredentialStore::new(path))
    }

    /// Publish session manager. Call
    /// [`initialize`](PublishSessionManager::initialize) before use.
    ///
    /// # Errors
    ///
    /// See [`InsightgenConfig::credential_store`].
    #[instrument(skip(self))]
    pub fn session_manager(&self) -> InsightgenResult<FacebookSessionManager> {
        let platform = Arc::new(GraphApiClient::new(self.graph_settings()));
        let store = self.credential_store()?;
        debug!(path = %store.path().display(), "Building publish session manager");
        Ok(PublishSessionManager::new(
            platform,
            store,
            self.facebook().app_id().clone(),
        ))
    }
}
