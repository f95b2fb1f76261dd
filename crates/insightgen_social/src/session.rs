//! Publish session state machine.

use std::sync::Arc;

use derive_getters::Getters;
use insightgen_core::{
    GeneratedPost, PublishCredentialConfig, PublishIdentity, PublishMode, PublishReceipt,
    PublishTarget,
};
use insightgen_error::{
    CredentialError, CredentialErrorKind, InsightgenResult, PublishError, PublishErrorKind,
};
use insightgen_interface::{
    CREDENTIAL_ID_KEY, CredentialStore, LoginToken, MANUAL_MODE_KEY, PublishPlatform,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{MANUAL_SHARE_URL, PUBLISH_SCOPES, PublishDispatcher, validate_credential};

/// Identity, its targets and the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LoggedInSession {
    /// Logged-in account
    identity: PublishIdentity,
    /// Targets managed by the account
    targets: Vec<PublishTarget>,
    /// Id of the selected target
    selected: Option<String>,
}

impl LoggedInSession {
    /// The selected target.
    pub fn selected_target(&self) -> Option<&PublishTarget> {
        let id = self.selected.as_deref()?;
        self.targets.iter().find(|t| t.id() == id)
    }
}

/// Where the session manager is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing loaded yet
    #[default]
    Uninitialized,
    /// Platform SDK is loading
    SdkLoading,
    /// SDK ready, no credential configured
    NeedsCredential,
    /// SDK ready with a credential, nobody logged in
    LoggedOut,
    /// Interactive login in progress
    LoggingIn,
    /// Logged in
    LoggedIn(LoggedInSession),
}

/// What the primary publish button should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishAction {
    /// Publish through the API to this target
    Direct {
        /// Selected target
        target_id: String,
    },
    /// Copy `text` and open `open_url` for the user
    Manual {
        /// Post text to copy
        text: String,
        /// Page to open
        open_url: String,
    },
}

/// Login, target selection and publishing for one platform.
///
/// The credential config is owned here and changed only by
/// [`set_credential`](Self::set_credential) and
/// [`toggle_manual_mode`](Self::toggle_manual_mode), both of which persist
/// the change to the store.
pub struct PublishSessionManager<P: PublishPlatform, S: CredentialStore> {
    platform: Arc<P>,
    store: S,
    config: PublishCredentialConfig,
    state: SessionState,
}

impl<P: PublishPlatform, S: CredentialStore> PublishSessionManager<P, S> {
    /// Create a manager, resolving the credential from `env_credential`,
    /// then the store, then nothing; and the publish mode from the store.
    ///
    /// Unreadable store entries are logged and treated as absent.
    #[instrument(skip_all, fields(platform = platform.platform_name()))]
    pub fn new(platform: Arc<P>, store: S, env_credential: Option<String>) -> Self {
        let stored = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Could not read persisted setting");
                None
            }
        };

        let app_id = env_credential
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .or_else(|| stored(CREDENTIAL_ID_KEY).filter(|id| !id.trim().is_empty()));
        let mode = match stored(MANUAL_MODE_KEY).as_deref() {
            Some("true") => PublishMode::Manual,
            _ => PublishMode::Auto,
        };

        debug!(has_credential = app_id.is_some(), %mode, "Resolved publish config");

        Self {
            platform,
            store,
            config: PublishCredentialConfig::new(app_id, mode),
            state: SessionState::Uninitialized,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current credential config.
    pub fn config(&self) -> &PublishCredentialConfig {
        &self.config
    }

    /// True when no credential is configured.
    pub fn needs_credential(&self) -> bool {
        self.config.app_id().is_none()
    }

    /// True when manual mode is on.
    pub fn is_manual(&self) -> bool {
        self.config.is_manual()
    }

    /// The logged-in session, if any.
    pub fn session(&self) -> Option<&LoggedInSession> {
        match &self.state {
            SessionState::LoggedIn(session) => Some(session),
            _ => None,
        }
    }

    /// The logged-in identity, if any.
    pub fn identity(&self) -> Option<&PublishIdentity> {
        self.session().map(LoggedInSession::identity)
    }

    /// Targets of the logged-in identity.
    pub fn targets(&self) -> &[PublishTarget] {
        self.session()
            .map(|s| s.targets().as_slice())
            .unwrap_or_default()
    }

    /// The selected target, if any.
    pub fn selected_target(&self) -> Option<&PublishTarget> {
        self.session().and_then(LoggedInSession::selected_target)
    }

    /// The platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// A dispatcher sharing this manager's platform.
    pub fn dispatcher(&self) -> PublishDispatcher<P> {
        PublishDispatcher::new(Arc::clone(&self.platform))
    }

    fn settle_ready(&mut self) {
        self.state = if !self.platform.is_ready() {
            SessionState::Uninitialized
        } else if self.config.app_id().is_some() {
            SessionState::LoggedOut
        } else {
            SessionState::NeedsCredential
        };
    }

    /// Startup sequence: nothing in manual mode, otherwise bootstrap and, with
    /// a credential, a silent session restore.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) {
        if self.config.is_manual() {
            info!("Manual mode; skipping platform bootstrap");
            return;
        }
        self.bootstrap().await;
        if self.config.app_id().is_some() {
            self.restore_session().await;
        }
    }

    /// Load the platform SDK, applying the current credential if one is
    /// configured. Safe to call repeatedly; failures are logged, never
    /// returned.
    #[instrument(skip(self))]
    pub async fn bootstrap(&mut self) {
        let app_id = self.config.app_id().clone();

        if self.platform.is_ready() {
            match &app_id {
                Some(id) => {
                    if let Err(e) = self.platform.init(Some(id.as_str())).await {
                        warn!(error = %e, "Re-applying credential failed");
                    }
                }
                None => debug!("SDK already loaded; no credential to apply"),
            }
        } else {
            self.state = SessionState::SdkLoading;
            if let Err(e) = self.platform.init(app_id.as_deref()).await {
                warn!(error = %e, "Platform SDK init failed");
            }
        }

        if !matches!(self.state, SessionState::LoggedIn(_)) {
            self.settle_ready();
        }
        debug!(state = ?self.state, "Bootstrap finished");
    }

    /// Validate, persist and apply a new credential.
    ///
    /// # Errors
    ///
    /// - credential error when `raw` is blank or not numeric
    /// - store error when the credential cannot be persisted; the config is
    ///   left unchanged
    #[instrument(skip(self, raw))]
    pub async fn set_credential(&mut self, raw: &str) -> InsightgenResult<()> {
        let id = validate_credential(raw)?;
        self.store.set(CREDENTIAL_ID_KEY, &id)?;
        self.config = self.config.clone().with_app_id(Some(id.clone()));

        if let Err(e) = self.platform.init(Some(id.as_str())).await {
            warn!(error = %e, "Platform init with new credential failed");
        }
        if !matches!(self.state, SessionState::LoggedIn(_)) {
            self.settle_ready();
        }
        info!("Publish credential updated");
        Ok(())
    }

    /// Try to pick up an existing platform session without user interaction.
    ///
    /// Returns true when the manager ended up logged in. Any failure leaves
    /// it logged out and is only logged.
    #[instrument(skip(self))]
    pub async fn restore_session(&mut self) -> bool {
        if self.config.is_manual() {
            return false;
        }
        let Some(app_id) = self.config.app_id().clone() else {
            debug!("No credential; nothing to restore");
            return false;
        };
        if !self.platform.is_ready() {
            debug!("SDK not ready; nothing to restore");
            return false;
        }

        let token = match self.platform.check_login_status(&app_id).await {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "No existing session");
                self.settle_ready();
                return false;
            }
        };

        match self.establish(&token).await {
            Ok(identity) => {
                info!(identity = %identity.display_name(), "Session restored");
                true
            }
            Err(e) => {
                warn!(error = %e, "Session restore failed");
                self.settle_ready();
                false
            }
        }
    }

    /// Interactive login.
    ///
    /// A `pending_credential` is applied through
    /// [`set_credential`](Self::set_credential) first. On success the
    /// identity's targets are listed and the first one is selected.
    ///
    /// # Errors
    ///
    /// - credential error when no valid credential is available
    /// - login-cancelled error when the user aborts or declines
    /// - publish error when the SDK is unavailable or the platform rejects
    ///   the identity or target requests
    #[instrument(skip(self, pending_credential))]
    pub async fn login(
        &mut self,
        pending_credential: Option<&str>,
    ) -> InsightgenResult<PublishIdentity> {
        if let Some(raw) = pending_credential {
            self.set_credential(raw).await?;
        }
        let app_id = self
            .config
            .app_id()
            .clone()
            .ok_or_else(|| CredentialError::new(CredentialErrorKind::Missing))?;

        if !self.platform.is_ready() {
            self.bootstrap().await;
        }
        if !self.platform.is_ready() {
            return Err(PublishError::new(PublishErrorKind::SdkUnavailable).into());
        }

        self.state = SessionState::LoggingIn;
        let token = match self.platform.login(&app_id, PUBLISH_SCOPES).await {
            Ok(token) => token,
            Err(e) => {
                if e.is_login_cancelled() {
                    info!("Login cancelled");
                } else {
                    error!(error = %e, "Login failed");
                }
                self.settle_ready();
                return Err(e);
            }
        };

        match self.establish(&token).await {
            Ok(identity) => {
                info!(identity = %identity.display_name(), targets = self.targets().len(), "Logged in");
                Ok(identity)
            }
            Err(e) => {
                error!(error = %e, "Could not load identity or targets");
                self.settle_ready();
                Err(e)
            }
        }
    }

    async fn establish(&mut self, token: &LoginToken) -> InsightgenResult<PublishIdentity> {
        let identity = self.platform.fetch_identity(token).await?;
        let targets = self.platform.list_targets(token, identity.id()).await?;
        let selected = targets.first().map(|t| t.id().clone());

        debug!(targets = targets.len(), selected = ?selected, "Loaded targets");
        self.state = SessionState::LoggedIn(LoggedInSession {
            identity: identity.clone(),
            targets,
            selected,
        });
        Ok(identity)
    }

    /// Select the target with `target_id`. Unknown ids are ignored.
    ///
    /// Returns true when the selection changed to `target_id`.
    pub fn select_target(&mut self, target_id: &str) -> bool {
        let SessionState::LoggedIn(session) = &mut self.state else {
            return false;
        };
        if !session.targets.iter().any(|t| t.id() == target_id) {
            debug!(target_id, "Ignoring unknown target");
            return false;
        }
        session.selected = Some(target_id.to_string());
        true
    }

    /// Turn manual mode on or off and persist the choice.
    ///
    /// Switching mode clears any logged-in identity. After turning manual
    /// mode off, call [`initialize`](Self::initialize) to reconnect.
    ///
    /// # Errors
    ///
    /// Fails when the flag cannot be persisted; the mode is left unchanged.
    #[instrument(skip(self))]
    pub fn toggle_manual_mode(&mut self, enabled: bool) -> InsightgenResult<()> {
        self.store
            .set(MANUAL_MODE_KEY, if enabled { "true" } else { "false" })?;
        let mode = if enabled {
            PublishMode::Manual
        } else {
            PublishMode::Auto
        };
        self.config = self.config.clone().with_mode(mode);

        if matches!(
            self.state,
            SessionState::LoggedIn(_) | SessionState::LoggingIn
        ) {
            self.settle_ready();
        }
        info!(%mode, "Publish mode changed");
        Ok(())
    }

    /// Forget the identity, targets and selection.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if matches!(self.state, SessionState::LoggedIn(_)) {
            self.settle_ready();
            info!("Logged out");
        }
    }

    /// What the primary publish action does for `post` right now.
    pub fn primary_action(&self, post: &GeneratedPost) -> PublishAction {
        match self.selected_target() {
            Some(target) if !self.config.is_manual() => PublishAction::Direct {
                target_id: target.id().clone(),
            },
            _ => PublishAction::Manual {
                text: post.content().clone(),
                open_url: MANUAL_SHARE_URL.to_string(),
            },
        }
    }

    /// Publish `post` to the selected target.
    ///
    /// # Errors
    ///
    /// - [`PublishErrorKind::NotLoggedIn`] without a session
    /// - [`PublishErrorKind::NoTargetSelected`] without a selection
    /// - any error from [`PublishDispatcher::publish`]
    #[instrument(skip(self, post))]
    pub async fn publish(&self, post: &GeneratedPost) -> InsightgenResult<PublishReceipt> {
        let session = self
            .session()
            .ok_or_else(|| PublishError::new(PublishErrorKind::NotLoggedIn))?;
        let target = session
            .selected_target()
            .ok_or_else(|| PublishError::new(PublishErrorKind::NoTargetSelected))?;

        self.dispatcher()
            .publish(
                target.id(),
                target.access_token(),
                post.content(),
                post.image_url().as_deref(),
            )
            .await
    }
}
