//! Publish platform trait.

use async_trait::async_trait;
use insightgen_core::{ImageData, PublishIdentity, PublishReceipt, PublishTarget};
use insightgen_error::InsightgenResult;

/// Opaque user credential returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginToken(pub String);

impl LoginToken {
    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for LoginToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LoginToken(<redacted>)")
    }
}

/// A social platform that supports direct publishing.
#[async_trait]
pub trait PublishPlatform: Send + Sync {
    /// Load and initialise the platform SDK with `app_id`, if one is known.
    ///
    /// # Errors
    ///
    /// Returns an error when initialisation fails. Callers treat this as
    /// non-fatal.
    async fn init(&self, app_id: Option<&str>) -> InsightgenResult<()>;

    /// True once the SDK is loaded and usable.
    fn is_ready(&self) -> bool;

    /// Silent session check; returns the token of an existing session.
    ///
    /// # Errors
    ///
    /// Fails when no session is connected.
    async fn check_login_status(&self, app_id: &str) -> InsightgenResult<LoginToken>;

    /// Interactive login requesting `scopes`.
    ///
    /// # Errors
    ///
    /// Fails with a login-cancelled error if the user aborts or declines.
    async fn login(&self, app_id: &str, scopes: &[&str]) -> InsightgenResult<LoginToken>;

    /// The account behind `token`.
    ///
    /// # Errors
    ///
    /// Fails when the platform rejects the token.
    async fn fetch_identity(&self, token: &LoginToken) -> InsightgenResult<PublishIdentity>;

    /// Destinations managed by `identity_id`.
    ///
    /// # Errors
    ///
    /// Fails when the platform rejects the request.
    async fn list_targets(
        &self,
        token: &LoginToken,
        identity_id: &str,
    ) -> InsightgenResult<Vec<PublishTarget>>;

    /// Upload `image` to `target_id` with `caption`.
    ///
    /// # Errors
    ///
    /// Fails with a publish error carrying the platform payload verbatim.
    async fn upload_binary(
        &self,
        target_id: &str,
        access_token: &str,
        image: &ImageData,
        caption: &str,
    ) -> InsightgenResult<PublishReceipt>;

    /// Post `text` to the feed of `target_id`.
    ///
    /// # Errors
    ///
    /// Fails with a publish error carrying the platform payload verbatim.
    async fn post_text(
        &self,
        target_id: &str,
        access_token: &str,
        text: &str,
    ) -> InsightgenResult<PublishReceipt>;

    /// Platform name for logging.
    fn platform_name(&self) -> &str;
}
