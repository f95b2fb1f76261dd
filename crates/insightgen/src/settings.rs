//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `insightgen.toml` in the working directory, or an explicit file
//! 3. `INSIGHTGEN_<SECTION>__<KEY>` environment variables, after `.env`
//!
//! The unprefixed `GEMINI_API_KEY` / `API_KEY` and `FACEBOOK_APP_ID`
//! variables fill the Gemini key and the Facebook app id when no layer set
//! them.

use std::collections::HashMap;
use std::path::PathBuf;

use derive_getters::Getters;
use insightgen_core::LogFormat;
use insightgen_error::{ConfigError, InsightgenResult};
use insightgen_generation::GenerationSettings;
use insightgen_models::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use insightgen_social::{DEFAULT_GRAPH_BASE_URL, DEFAULT_GRAPH_VERSION};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// File read from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "insightgen.toml";

/// Prefix of the layered environment variables.
pub const ENV_PREFIX: &str = "INSIGHTGEN";

/// `[gemini]`
#[derive(Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    /// API key; see the module docs for fallbacks
    api_key: Option<String>,
    /// REST endpoint
    base_url: String,
    /// Model for grounded text
    text_model: String,
    /// Model for images
    image_model: String,
    /// Model for rewrites; the text model when unset
    rewrite_model: Option<String>,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            rewrite_model: None,
        }
    }
}

impl std::fmt::Debug for GeminiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("rewrite_model", &self.rewrite_model)
            .finish()
    }
}

/// `[facebook]`
#[derive(Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookSection {
    /// Default App ID, ahead of the persisted one
    app_id: Option<String>,
    /// Graph API host
    graph_base_url: String,
    /// Graph API version segment
    graph_version: String,
    /// User access token from an out-of-process login
    user_access_token: Option<String>,
    /// Credential store file; `<config_dir>/insightgen/publish.json` when unset
    store_path: Option<PathBuf>,
}

impl Default for FacebookSection {
    fn default() -> Self {
        Self {
            app_id: None,
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            graph_version: DEFAULT_GRAPH_VERSION.to_string(),
            user_access_token: None,
            store_path: None,
        }
    }
}

impl std::fmt::Debug for FacebookSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookSection")
            .field("app_id", &self.app_id)
            .field("graph_base_url", &self.graph_base_url)
            .field("graph_version", &self.graph_version)
            .field(
                "user_access_token",
                &self.user_access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("store_path", &self.store_path)
            .finish()
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Default, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightgenConfig {
    /// Generative backend
    gemini: GeminiSection,
    /// Generation pipeline
    generation: GenerationSettings,
    /// Publishing
    facebook: FacebookSection,
    /// Log output format
    log_format: LogFormat,
}

impl InsightgenConfig {
    /// Load from the default sources.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load`].
    pub fn load() -> InsightgenResult<Self> {
        ConfigLoader::new().load()
    }
}

fn config_error(err: ::config::ConfigError) -> ConfigError {
    ConfigError::new(err.to_string())
}

/// Assembles the configuration layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Defaults, optional `insightgen.toml`, process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this file instead of `insightgen.toml`. It must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Use `vars` instead of the process environment and skip `.env`.
    pub fn with_env<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    fn var(&self, key: &str) -> Option<String> {
        match &self.env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
        .filter(|value| !value.trim().is_empty())
    }

    /// Merge the layers and deserialize.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when an explicit file is missing, a
    /// file or variable does not parse, or a value has the wrong type.
    #[instrument(skip(self), fields(file = ?self.file))]
    pub fn load(&self) -> InsightgenResult<InsightgenConfig> {
        if self.env.is_none() && dotenvy::dotenv().is_ok() {
            debug!("Loaded .env");
        }

        let defaults =
            ::config::Config::try_from(&InsightgenConfig::default()).map_err(config_error)?;

        let file = match &self.file {
            Some(path) => ::config::File::from(path.as_path())
                .format(::config::FileFormat::Toml)
                .required(true),
            None => ::config::File::new(DEFAULT_CONFIG_FILE, ::config::FileFormat::Toml)
                .required(false),
        };

        let env = ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(self.env.clone());

        let mut loaded: InsightgenConfig = ::config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(env)
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        if loaded.gemini.api_key.is_none() {
            loaded.gemini.api_key = self.var("GEMINI_API_KEY").or_else(|| self.var("API_KEY"));
        }
        if loaded.facebook.app_id.is_none() {
            loaded.facebook.app_id = self.var("FACEBOOK_APP_ID");
        }

        info!(
            has_gemini_key = loaded.gemini.api_key.is_some(),
            has_app_id = loaded.facebook.app_id.is_some(),
            text_model = %loaded.gemini.text_model,
            "Configuration loaded"
        );
        Ok(loaded)
    }
}
