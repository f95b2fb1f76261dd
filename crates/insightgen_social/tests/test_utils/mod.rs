//! Scripted publish platform for session and dispatcher tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use insightgen_core::{ImageData, PublishIdentity, PublishReceipt, PublishTarget};
use insightgen_error::{
    InsightgenResult, LoginCancelledError, PublishError, PublishErrorKind,
};
use insightgen_interface::{LoginToken, PublishPlatform};

/// Body a rejecting platform reports.
#[allow(dead_code)]
pub const REJECTION: &str = r#"{"error":{"message":"(#324) Requires upload file","code":324}}"#;

/// Records every call and answers from a script.
#[allow(dead_code)]
pub struct StubPlatform {
    /// Whether `init` makes the SDK ready
    pub init_succeeds: bool,
    /// Token returned by the silent session check
    pub existing_session: Option<String>,
    /// Whether interactive login is granted
    pub grant_login: bool,
    /// Whether identity fetch fails
    pub identity_fails: bool,
    /// Targets returned for the identity
    pub targets: Vec<PublishTarget>,
    /// Whether uploads and text posts are rejected
    pub reject_publish: bool,

    pub ready: AtomicBool,
    pub init_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub last_init_app_id: Mutex<Option<String>>,
    pub last_scopes: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<(String, String, ImageData, String)>>,
    pub text_posts: Mutex<Vec<(String, String, String)>>,
}

#[allow(dead_code)]
impl StubPlatform {
    pub fn new() -> Self {
        Self {
            init_succeeds: true,
            existing_session: None,
            grant_login: true,
            identity_fails: false,
            targets: vec![
                PublishTarget::new("page-1", "InsightGen", "page-token-1", "Software"),
                PublishTarget::new("page-2", "Side Project", "page-token-2", "Community"),
            ],
            reject_publish: false,
            ready: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            last_init_app_id: Mutex::new(None),
            last_scopes: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            text_posts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_session(mut self, token: &str) -> Self {
        self.existing_session = Some(token.to_string());
        self
    }

    pub fn declining_login(mut self) -> Self {
        self.grant_login = false;
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.init_succeeds = false;
        self
    }

    pub fn failing_identity(mut self) -> Self {
        self.identity_fails = true;
        self
    }

    pub fn without_targets(mut self) -> Self {
        self.targets.clear();
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.reject_publish = true;
        self
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    fn rejection() -> PublishError {
        PublishError::new(PublishErrorKind::Rejected {
            status_code: Some(400),
            reason: REJECTION.to_string(),
        })
    }
}

#[async_trait]
impl PublishPlatform for StubPlatform {
    async fn init(&self, app_id: Option<&str>) -> InsightgenResult<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_init_app_id.lock().unwrap() = app_id.map(str::to_string);
        if !self.init_succeeds {
            return Err(PublishError::new(PublishErrorKind::SdkUnavailable).into());
        }
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn check_login_status(&self, _app_id: &str) -> InsightgenResult<LoginToken> {
        self.existing_session
            .clone()
            .map(LoginToken)
            .ok_or_else(|| PublishError::new(PublishErrorKind::NotLoggedIn).into())
    }

    async fn login(&self, _app_id: &str, scopes: &[&str]) -> InsightgenResult<LoginToken> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_scopes.lock().unwrap() = scopes.iter().map(|s| s.to_string()).collect();
        if self.grant_login {
            Ok(LoginToken("user-token".to_string()))
        } else {
            Err(LoginCancelledError::new("User cancelled login or did not fully authorize.").into())
        }
    }

    async fn fetch_identity(&self, _token: &LoginToken) -> InsightgenResult<PublishIdentity> {
        if self.identity_fails {
            return Err(Self::rejection().into());
        }
        Ok(PublishIdentity::new("user-1", "Ada Lovelace", None))
    }

    async fn list_targets(
        &self,
        _token: &LoginToken,
        _identity_id: &str,
    ) -> InsightgenResult<Vec<PublishTarget>> {
        Ok(self.targets.clone())
    }

    async fn upload_binary(
        &self,
        target_id: &str,
        access_token: &str,
        image: &ImageData,
        caption: &str,
    ) -> InsightgenResult<PublishReceipt> {
        self.uploads.lock().unwrap().push((
            target_id.to_string(),
            access_token.to_string(),
            image.clone(),
            caption.to_string(),
        ));
        if self.reject_publish {
            return Err(Self::rejection().into());
        }
        Ok(PublishReceipt::new("photo-1", Some("post-1".to_string())))
    }

    async fn post_text(
        &self,
        target_id: &str,
        access_token: &str,
        text: &str,
    ) -> InsightgenResult<PublishReceipt> {
        self.text_posts.lock().unwrap().push((
            target_id.to_string(),
            access_token.to_string(),
            text.to_string(),
        ));
        if self.reject_publish {
            return Err(Self::rejection().into());
        }
        Ok(PublishReceipt::new("feed-1", None))
    }

    fn platform_name(&self) -> &str {
        "stub"
    }
}
