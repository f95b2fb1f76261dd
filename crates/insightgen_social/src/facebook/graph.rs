//! Graph API client.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use derive_getters::Getters;
use insightgen_core::{ImageData, PublishIdentity, PublishReceipt, PublishTarget};
use insightgen_error::{
    CredentialError, CredentialErrorKind, InsightgenResult, JsonError, LoginCancelledError,
    PublishError, PublishErrorKind,
};
use insightgen_interface::{LoginToken, PublishPlatform};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::json_models::{AccountsJson, CreatedJson, MeJson};

/// Graph API host.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Graph API version the requests are written against.
pub const DEFAULT_GRAPH_VERSION: &str = "v19.0";

const LOGIN_DECLINED: &str = "User cancelled login or did not fully authorize.";

/// Connection settings for [`GraphApiClient`].
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct GraphApiSettings {
    /// Host, without version
    base_url: String,
    /// API version path segment, e.g. `v19.0`
    version: String,
    /// User access token obtained by the presentation layer's login flow
    user_access_token: Option<String>,
}

impl Default for GraphApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            version: DEFAULT_GRAPH_VERSION.to_string(),
            user_access_token: None,
        }
    }
}

impl GraphApiSettings {
    /// Start building settings from the defaults.
    pub fn builder() -> GraphApiSettingsBuilder {
        GraphApiSettingsBuilder::default()
    }
}

impl std::fmt::Debug for GraphApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphApiSettings")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field(
                "user_access_token",
                &self.user_access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// [`PublishPlatform`] over the Facebook Graph API.
///
/// Identity and page listing use plain GET requests, photos go up as
/// multipart uploads and text posts as form posts to the page feed. Any
/// non-2xx response, or a body carrying an `error` object, becomes
/// [`PublishErrorKind::Rejected`] with the body verbatim.
pub struct GraphApiClient {
    client: Client,
    settings: GraphApiSettings,
    app_id: Mutex<Option<String>>,
    ready: AtomicBool,
}

impl std::fmt::Debug for GraphApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphApiClient")
            .field("settings", &self.settings)
            .field("ready", &self.ready.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl GraphApiClient {
    /// Create a client. It becomes ready after [`PublishPlatform::init`].
    pub fn new(settings: GraphApiSettings) -> Self {
        debug!(?settings, "Created Graph API client");
        Self {
            client: Client::new(),
            settings,
            app_id: Mutex::new(None),
            ready: AtomicBool::new(false),
        }
    }

    /// Use `token` as the logged-in user's access token.
    pub fn with_user_token(mut self, token: impl Into<String>) -> Self {
        self.settings.user_access_token = Some(token.into());
        self
    }

    /// Active settings.
    pub fn settings(&self) -> &GraphApiSettings {
        &self.settings
    }

    /// App id applied by the last successful `init`.
    pub fn app_id(&self) -> Option<String> {
        self.app_id.lock().ok().and_then(|guard| guard.clone())
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.version,
            path.trim_start_matches('/')
        )
    }

    fn user_token(&self) -> Option<LoginToken> {
        self.settings
            .user_access_token
            .as_ref()
            .filter(|token| !token.trim().is_empty())
            .map(|token| LoginToken(token.clone()))
    }
}

fn transport(err: reqwest::Error) -> PublishError {
    error!(error = ?err, "Graph API request failed");
    PublishError::new(PublishErrorKind::Transport(err.to_string()))
}

/// Turn a Graph response into `T`, or a rejection carrying the body.
async fn read_graph<T: DeserializeOwned>(response: reqwest::Response) -> InsightgenResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    let rejected = |body: String| {
        error!(status = %status, body = %body, "Graph API rejected request");
        PublishError::new(PublishErrorKind::Rejected {
            status_code: Some(status.as_u16()),
            reason: body,
        })
    };

    if !status.is_success() {
        return Err(rejected(body).into());
    }

    let value: serde_json::Value = serde_json::from_str(&body).map_err(JsonError::from)?;
    if value.get("error").is_some_and(|e| !e.is_null()) {
        return Err(rejected(body).into());
    }

    Ok(serde_json::from_value(value).map_err(JsonError::from)?)
}

#[async_trait]
impl PublishPlatform for GraphApiClient {
    #[instrument(skip(self))]
    async fn init(&self, app_id: Option<&str>) -> InsightgenResult<()> {
        if let Some(id) = app_id {
            let mut current = self.app_id.lock().map_err(|_| {
                PublishError::new(PublishErrorKind::SdkUnavailable)
            })?;
            *current = Some(id.to_string());
        } else {
            debug!("Initialised without an app id; waiting for one");
        }
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    #[instrument(skip(self))]
    async fn check_login_status(&self, app_id: &str) -> InsightgenResult<LoginToken> {
        if app_id.trim().is_empty() {
            return Err(CredentialError::new(CredentialErrorKind::Missing).into());
        }
        self.user_token().ok_or_else(|| {
            debug!("Not connected");
            PublishError::new(PublishErrorKind::NotLoggedIn).into()
        })
    }

    #[instrument(skip(self))]
    async fn login(&self, app_id: &str, scopes: &[&str]) -> InsightgenResult<LoginToken> {
        if app_id.trim().is_empty() {
            return Err(CredentialError::new(CredentialErrorKind::Missing).into());
        }
        match self.user_token() {
            Some(token) => {
                info!(scope = %scopes.join(","), "Using delegated user token");
                Ok(token)
            }
            None => {
                warn!("No user token was granted");
                Err(LoginCancelledError::new(LOGIN_DECLINED).into())
            }
        }
    }

    #[instrument(skip(self, token))]
    async fn fetch_identity(&self, token: &LoginToken) -> InsightgenResult<PublishIdentity> {
        let response = self
            .client
            .get(self.url("me"))
            .query(&[("fields", "name,id,picture"), ("access_token", token.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let me: MeJson = read_graph(response).await?;
        debug!(id = %me.id, "Fetched identity");
        Ok(me.into())
    }

    #[instrument(skip(self, token))]
    async fn list_targets(
        &self,
        token: &LoginToken,
        identity_id: &str,
    ) -> InsightgenResult<Vec<PublishTarget>> {
        let response = self
            .client
            .get(self.url(&format!("{}/accounts", identity_id)))
            .query(&[
                ("fields", "name,access_token,id,category"),
                ("access_token", token.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let accounts: AccountsJson = read_graph(response).await?;
        debug!(pages = accounts.data.len(), "Fetched managed pages");
        Ok(accounts.data.into_iter().map(PublishTarget::from).collect())
    }

    #[instrument(
        skip(self, access_token, image, caption),
        fields(mime_type = %image.mime_type, bytes = image.data.len())
    )]
    async fn upload_binary(
        &self,
        target_id: &str,
        access_token: &str,
        image: &ImageData,
        caption: &str,
    ) -> InsightgenResult<PublishReceipt> {
        let extension = image.mime_type.rsplit('/').next().unwrap_or("png");
        let source = Part::bytes(image.data.clone())
            .file_name(format!("insightgen.{}", extension))
            .mime_str(&image.mime_type)
            .map_err(|e| PublishError::new(PublishErrorKind::InvalidImage(e.to_string())))?;

        let form = Form::new()
            .text("access_token", access_token.to_string())
            .text("message", caption.to_string())
            .part("source", source);

        let response = self
            .client
            .post(self.url(&format!("{}/photos", target_id)))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let created: CreatedJson = read_graph(response).await?;
        info!(id = %created.id, "Photo published");
        Ok(created.into())
    }

    #[instrument(skip(self, access_token, text), fields(len = text.len()))]
    async fn post_text(
        &self,
        target_id: &str,
        access_token: &str,
        text: &str,
    ) -> InsightgenResult<PublishReceipt> {
        let response = self
            .client
            .post(self.url(&format!("{}/feed", target_id)))
            .form(&[("message", text), ("access_token", access_token)])
            .send()
            .await
            .map_err(transport)?;

        let created: CreatedJson = read_graph(response).await?;
        info!(id = %created.id, "Feed post published");
        Ok(created.into())
    }

    fn platform_name(&self) -> &str {
        "facebook"
    }
}
