//! Persisted configuration store error types.

/// Kinds of store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// I/O error reading or writing the backing file
    #[display("I/O error: {}", _0)]
    Io(String),
    /// Backing file exists but is not valid JSON
    #[display("Corrupt store: {}", _0)]
    Corrupt(String),
    /// Store location could not be determined
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use insightgen_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Io("permission denied".to_string()));
/// assert!(format!("{}", err).contains("permission denied"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        StoreError::new(StoreErrorKind::Io(err.to_string()))
    }
}
