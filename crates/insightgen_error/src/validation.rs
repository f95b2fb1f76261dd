//! Request validation error types.

/// Invalid request shape, e.g. a custom topic with no text.
///
/// # Examples
///
/// ```
/// use insightgen_error::ValidationError;
///
/// let err = ValidationError::new("custom topic must not be empty");
/// assert!(format!("{}", err).contains("custom topic"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// What was wrong with the request
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
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
