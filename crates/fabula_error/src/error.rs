//! Top-level error wrapper types.

use crate::{
    CharacterError, GeminiError, GenerationError, NodeError, StoreError, StoryError,
};

/// This is the foundation error enum, aggregating every error family in the
/// Fabula workspace.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, NodeError, NodeErrorKind};
/// use fabula_core::NodeId;
///
/// let node_err = NodeError::not_found(NodeId::from(3));
/// let err: FabulaError = node_err.into();
/// assert!(format!("{}", err).contains("Node"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// Story lookup error
    #[from(StoryError)]
    Story(StoryError),
    /// Node hierarchy error
    #[from(NodeError)]
    Node(NodeError),
    /// Character resolution error
    #[from(CharacterError)]
    Character(CharacterError),
    /// Generation chain error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Store transport error
    #[from(StoreError)]
    Store(StoreError),
    /// Gemini client error
    #[from(GeminiError)]
    Gemini(GeminiError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, StoreError};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(StoreError::backend("connection refused"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, StoreError};
///
/// fn fetch() -> FabulaResult<String> {
///     Err(StoreError::backend("404 Not Found"))?
/// }
/// ```
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
