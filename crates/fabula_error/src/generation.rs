//! Generation chain error types.

use std::time::Duration;

/// Which step of a generation chain was executing when a failure occurred.
///
/// Inside `generate` the two stages run strictly in sequence; a failure in
/// either stage aborts the whole operation and the stage is surfaced so the
/// caller knows nothing was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationStage {
    /// The continuation call that produces new plot text
    #[display("continuation")]
    Continuation,
    /// The summarization call that condenses prior context plus the new text
    #[display("summarization")]
    Summarization,
    /// The standalone character-background call
    #[display("character background")]
    CharacterBackground,
}

/// Specific error conditions for the generation chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The text generation client reported a failure
    #[display("Generation failed at the {} stage: {}", stage, message)]
    Failed {
        /// Stage that was executing
        stage: GenerationStage,
        /// Client-reported failure message
        message: String,
    },
    /// The text generation client did not answer within the deadline
    #[display("Generation timed out at the {} stage after {:?}", stage, after)]
    TimedOut {
        /// Stage that was executing
        stage: GenerationStage,
        /// Deadline that elapsed
        after: Duration,
    },
}

impl GenerationErrorKind {
    /// The stage that was executing when the chain failed.
    pub fn stage(&self) -> GenerationStage {
        match self {
            GenerationErrorKind::Failed { stage, .. } => *stage,
            GenerationErrorKind::TimedOut { stage, .. } => *stage,
        }
    }
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{GenerationError, GenerationErrorKind, GenerationStage};
///
/// let err = GenerationError::new(GenerationErrorKind::Failed {
///     stage: GenerationStage::Summarization,
///     message: "connection reset".to_string(),
/// });
/// assert_eq!(err.kind.stage(), GenerationStage::Summarization);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
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
