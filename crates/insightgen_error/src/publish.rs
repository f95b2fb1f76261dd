//! Publishing error types.
//!
//! Covers credential validation, the login flow, and the publish call itself.

use std::fmt;

/// Credential failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CredentialErrorKind {
    /// Value is not a numeric App ID
    #[display(
        "Invalid App ID '{}'. It must be a numeric ID (e.g. 123456789), not a profile id, e-mail or name",
        _0
    )]
    InvalidFormat(String),
    /// No credential configured yet
    #[display("Facebook App ID is missing. Please enter it to proceed")]
    Missing,
}

/// Credential error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Credential Error: {} at line {} in {}", kind, line, file)]
pub struct CredentialError {
    /// The kind of error that occurred
    pub kind: CredentialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CredentialError {
    /// Create a new CredentialError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use insightgen_error::{CredentialError, CredentialErrorKind};
    ///
    /// let err = CredentialError::new(CredentialErrorKind::InvalidFormat("me@example.com".into()));
    /// assert!(format!("{}", err).contains("numeric"));
    /// ```
    #[track_caller]
    pub fn new(kind: CredentialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// The user aborted the login flow or declined the requested permissions.
///
/// Not alarming; presentation layers usually show it quietly.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Login Cancelled: {} at line {} in {}", message, line, file)]
pub struct LoginCancelledError {
    /// Reason reported by the platform
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LoginCancelledError {
    /// Create a new LoginCancelledError with automatic location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Publish failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublishErrorKind {
    /// Platform rejected the request; `reason` is its payload verbatim
    Rejected {
        /// HTTP status, when the rejection came over HTTP
        status_code: Option<u16>,
        /// Raw error payload reported by the platform
        reason: String,
    },
    /// No identity is logged in
    NotLoggedIn,
    /// No publish target has been selected
    NoTargetSelected,
    /// Embedded image could not be decoded
    InvalidImage(String),
    /// Transport failure before the platform answered
    Transport(String),
    /// Platform SDK is not available
    SdkUnavailable,
}

impl fmt::Display for PublishErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                status_code: Some(code),
                reason,
            } => write!(f, "Platform rejected publish (HTTP {code}): {reason}"),
            Self::Rejected {
                status_code: None,
                reason,
            } => write!(f, "Platform rejected publish: {reason}"),
            Self::NotLoggedIn => write!(f, "Not logged in to the publishing platform"),
            Self::NoTargetSelected => write!(f, "No publish target selected"),
            Self::InvalidImage(msg) => write!(f, "Invalid embedded image: {msg}"),
            Self::Transport(msg) => write!(f, "Transport failure: {msg}"),
            Self::SdkUnavailable => write!(f, "Platform SDK not ready"),
        }
    }
}

/// Publish error with source location tracking.
#[derive(Debug, Clone)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use insightgen_error::{PublishError, PublishErrorKind};
    ///
    /// let err = PublishError::new(PublishErrorKind::Rejected {
    ///     status_code: Some(400),
    ///     reason: r#"{"error":{"message":"bad"}}"#.to_string(),
    /// });
    /// assert_eq!(err.reason(), r#"{"error":{"message":"bad"}}"#);
    /// ```
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Human-readable reason; for rejections, the platform payload verbatim.
    pub fn reason(&self) -> String {
        match &self.kind {
            PublishErrorKind::Rejected { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Publish Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for PublishError {}
