//! Publishing for InsightGen.
//!
//! This crate takes a finished [`GeneratedPost`](insightgen_core::GeneratedPost)
//! and gets it onto a social platform, either directly through the platform
//! API or, in manual mode, by handing the text back to the caller together
//! with a URL to open.
//!
//! # Components
//!
//! - [`PublishSessionManager`] - login state machine, credential handling and
//!   target selection
//! - [`PublishDispatcher`] - picks the binary-upload or text-only path for a
//!   post and reports platform rejections verbatim
//! - [`GraphApiClient`] - Facebook Graph API implementation of
//!   [`PublishPlatform`](insightgen_interface::PublishPlatform)
//! - [`InMemoryCredentialStore`] and [`FileCredentialStore`] - durable
//!   settings for the app id and the manual-mode flag
//!
//! Interactive OAuth happens in the presentation layer. The Graph client is
//! handed the resulting user access token and never sees a password.

#![warn(missing_docs)]

mod credential;
mod dispatcher;
mod facebook;
mod session;
mod store;

pub use credential::{MANUAL_SHARE_URL, PUBLISH_SCOPES, validate_credential};
pub use dispatcher::PublishDispatcher;
pub use facebook::{
    DEFAULT_GRAPH_BASE_URL, DEFAULT_GRAPH_VERSION, GraphApiClient, GraphApiSettings,
    GraphApiSettingsBuilder,
};
pub use session::{LoggedInSession, PublishAction, PublishSessionManager, SessionState};
pub use store::{FileCredentialStore, InMemoryCredentialStore};
