//! Story lookup error types.

use fabula_core::StoryId;

/// Specific error conditions for story lookups.
///
/// Ownership mismatches are deliberately reported as `NotFound`: a caller
/// probing someone else's story id cannot tell it apart from an id that was
/// never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Story missing, or not visible to the caller
    #[display("Story {} not found", _0)]
    NotFound(StoryId),
}

/// Story error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{StoryError, StoryErrorKind};
/// use fabula_core::StoryId;
///
/// let err = StoryError::new(StoryErrorKind::NotFound(StoryId::from(12)));
/// assert!(format!("{}", err).contains("12"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for the common not-found case.
    #[track_caller]
    pub fn not_found(story_id: StoryId) -> Self {
        Self::new(StoryErrorKind::NotFound(story_id))
    }
}
