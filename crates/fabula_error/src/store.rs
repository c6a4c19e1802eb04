//! Node store transport error types.

/// Kinds of store errors.
///
/// These cover transport and serialization failures inside a store or
/// accessor implementation, as opposed to the domain-level not-found and
/// conflict conditions which have their own types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// The backing store reported a failure
    #[display("Store backend error: {}", _0)]
    Backend(String),
    /// A stored record could not be decoded
    #[display("Stored record could not be decoded: {}", _0)]
    Corrupt(String),
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Backend("connection refused".to_string()));
/// assert!(format!("{}", err).contains("refused"));
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

    /// Shorthand for a backend failure message.
    #[track_caller]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Backend(message.into()))
    }
}
