//! Character resolution error types.

/// Specific error conditions for character resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CharacterErrorKind {
    /// No character with the given name exists in the story
    #[display(
        "There is no character called {} {} in story {}",
        first_name,
        last_name,
        story
    )]
    NotFound {
        /// Given name the caller asked for
        first_name: String,
        /// Family name the caller asked for
        last_name: String,
        /// Display name of the story that was searched
        story: String,
    },
}

/// Character error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{CharacterError, CharacterErrorKind};
///
/// let err = CharacterError::new(CharacterErrorKind::NotFound {
///     first_name: "John".to_string(),
///     last_name: "Doe".to_string(),
///     story: "The Long Night".to_string(),
/// });
/// assert!(format!("{}", err).contains("John"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Character Error: {} at line {} in {}", kind, line, file)]
pub struct CharacterError {
    /// The specific error condition
    pub kind: CharacterErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CharacterError {
    /// Create a new CharacterError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CharacterErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
