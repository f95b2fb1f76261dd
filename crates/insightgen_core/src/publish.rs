//! Publishing identities, targets and the persisted credential config.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The logged-in account on the publishing platform.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PublishIdentity {
    /// Platform user id
    id: String,
    /// Name shown in the UI
    display_name: String,
    /// Profile picture
    avatar_url: Option<String>,
}

impl PublishIdentity {
    /// Create an identity.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url,
        }
    }
}

/// A destination (e.g. a managed page) under an identity.
///
/// Each target carries its own access token.
#[derive(Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PublishTarget {
    /// Target id
    id: String,
    /// Target name
    name: String,
    /// Token scoped to this target
    access_token: String,
    /// Platform category, e.g. "Software Company"
    category: String,
}

impl PublishTarget {
    /// Create a target.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        access_token: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            access_token: access_token.into(),
            category: category.into(),
        }
    }
}

// Keeps access tokens out of logs.
impl std::fmt::Debug for PublishTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishTarget")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("access_token", &"<redacted>")
            .field("category", &self.category)
            .finish()
    }
}

/// Platform acknowledgement of a published post.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Id of the created object (photo or feed story)
    id: String,
    /// Feed post id, when the platform reports one separately
    post_id: Option<String>,
}

impl PublishReceipt {
    /// Create a receipt.
    pub fn new(id: impl Into<String>, post_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            post_id,
        }
    }
}

/// How the primary publish action behaves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum PublishMode {
    /// Publish directly through the platform API
    #[default]
    Auto,
    /// Copy the text and open the platform for the user
    Manual,
}

/// Process-wide publish credential settings.
///
/// Persisted across sessions and mutated only by explicit user action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct PublishCredentialConfig {
    /// Platform application id
    app_id: Option<String>,
    /// Publish mode
    mode: PublishMode,
}

impl PublishCredentialConfig {
    /// Create a config.
    pub fn new(app_id: Option<String>, mode: PublishMode) -> Self {
        Self { app_id, mode }
    }

    /// Copy with a different app id.
    pub fn with_app_id(self, app_id: Option<String>) -> Self {
        Self { app_id, ..self }
    }

    /// Copy with a different mode.
    pub fn with_mode(self, mode: PublishMode) -> Self {
        Self { mode, ..self }
    }

    /// True when manual mode is on.
    pub fn is_manual(&self) -> bool {
        self.mode == PublishMode::Manual
    }
}
