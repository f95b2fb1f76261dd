//! Generative backend error types.

/// Generation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// Request could not be delivered (connection refused, DNS, TLS, ...)
    ApiRequest(String),
    /// Backend answered with a non-success status
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message reported by the backend
        message: String,
    },
    /// Backend reply could not be decoded
    ResponseParsing(String),
    /// Backend reply contained no usable candidate
    EmptyResponse,
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::ApiRequest(msg) => {
                write!(f, "Generative backend request failed: {}", msg)
            }
            GenerationErrorKind::HttpError {
                status_code,
                message,
            } => write!(f, "HTTP {} error: {}", status_code, message),
            GenerationErrorKind::ResponseParsing(msg) => {
                write!(f, "Failed to parse backend response: {}", msg)
            }
            GenerationErrorKind::EmptyResponse => {
                write!(f, "Backend returned no usable content")
            }
        }
    }
}

/// Generation error with source location tracking.
///
/// Surfaced verbatim to the user as a retryable condition. The core never
/// retries on its own.
///
/// # Examples
///
/// ```
/// use insightgen_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::HttpError {
///     status_code: 500,
///     message: "internal".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 500"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GenerationError {}

/// The backend refused the request for entitlement or quota reasons.
///
/// Recoverable by re-authorizing with an elevated credential. Callers should
/// prompt for credential selection instead of only showing an error.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Tier Required: {} at line {} in {}", message, line, file)]
pub struct TierRequiredError {
    /// Backend message that triggered the classification
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TierRequiredError {
    /// Create a new TierRequiredError with automatic location tracking.
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
