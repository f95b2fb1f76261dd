//! Error types for the InsightGen library.
//!
//! Every failure the core can report is a small struct carrying the source
//! location where it was raised. The structs aggregate into
//! [`InsightgenErrorKind`], and [`InsightgenError`] boxes the kind so results
//! stay small.
//!
//! Propagation policy:
//! - extraction failures never become errors (the extractor degrades instead)
//! - backend and network failures always escalate, without retry
//! - image generation failures are absorbed by the orchestrator

#![warn(missing_docs)]

mod config;
mod generation;
mod json;
mod publish;
mod store;
mod validation;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind, TierRequiredError};
pub use json::JsonError;
pub use publish::{
    CredentialError, CredentialErrorKind, LoginCancelledError, PublishError, PublishErrorKind,
};
pub use store::{StoreError, StoreErrorKind};
pub use validation::ValidationError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum InsightgenErrorKind {
    /// Missing or malformed configuration
    Config(ConfigError),
    /// Invalid request shape
    Validation(ValidationError),
    /// Generative backend failure
    Generation(GenerationError),
    /// Backend requires an elevated credential
    TierRequired(TierRequiredError),
    /// Publish credential failed validation
    Credential(CredentialError),
    /// User abandoned the login flow
    LoginCancelled(LoginCancelledError),
    /// Publish attempt failed
    Publish(PublishError),
    /// Persisted store failure
    Store(StoreError),
    /// JSON serialization/deserialization error
    Json(JsonError),
}

impl std::fmt::Display for InsightgenErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightgenErrorKind::Config(e) => write!(f, "{}", e),
            InsightgenErrorKind::Validation(e) => write!(f, "{}", e),
            InsightgenErrorKind::Generation(e) => write!(f, "{}", e),
            InsightgenErrorKind::TierRequired(e) => write!(f, "{}", e),
            InsightgenErrorKind::Credential(e) => write!(f, "{}", e),
            InsightgenErrorKind::LoginCancelled(e) => write!(f, "{}", e),
            InsightgenErrorKind::Publish(e) => write!(f, "{}", e),
            InsightgenErrorKind::Store(e) => write!(f, "{}", e),
            InsightgenErrorKind::Json(e) => write!(f, "{}", e),
        }
    }
}

/// InsightGen error with kind discrimination.
#[derive(Debug)]
pub struct InsightgenError(Box<InsightgenErrorKind>);

impl InsightgenError {
    /// Create a new error from a kind.
    pub fn new(kind: InsightgenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &InsightgenErrorKind {
        &self.0
    }

    /// True when the caller should re-prompt for an elevated credential.
    pub fn is_tier_required(&self) -> bool {
        matches!(*self.0, InsightgenErrorKind::TierRequired(_))
    }

    /// True when the user abandoned the login flow.
    pub fn is_login_cancelled(&self) -> bool {
        matches!(*self.0, InsightgenErrorKind::LoginCancelled(_))
    }

    /// True for missing or malformed configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(*self.0, InsightgenErrorKind::Config(_))
    }

    /// True for rejected request shapes.
    pub fn is_validation(&self) -> bool {
        matches!(*self.0, InsightgenErrorKind::Validation(_))
    }

    /// The platform's reported reason, when this is a publish failure.
    pub fn publish_reason(&self) -> Option<String> {
        match self.kind() {
            InsightgenErrorKind::Publish(e) => Some(e.reason()),
            _ => None,
        }
    }
}

impl std::fmt::Display for InsightgenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InsightGen Error: {}", self.0)
    }
}

impl std::error::Error for InsightgenError {}

// Generic From implementation for any type that converts to InsightgenErrorKind
impl<T> From<T> for InsightgenError
where
    T: Into<InsightgenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for InsightGen operations.
pub type InsightgenResult<T> = std::result::Result<T, InsightgenError>;
