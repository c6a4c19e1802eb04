//! Node hierarchy error types.

use fabula_core::{NodeId, StoryId};

/// Specific error conditions for node operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NodeErrorKind {
    /// Node missing from the store
    #[display("Node {} not found", _0)]
    NotFound(NodeId),
    /// Node exists but belongs to a different story
    #[display("Node {} does not belong to story {}", node, story)]
    StoryMismatch {
        /// The node that was fetched
        node: NodeId,
        /// The story the caller claimed it belongs to
        story: StoryId,
    },
    /// Attempted to mutate a node that has children
    #[display("Node {} has children and its content can no longer be edited", _0)]
    EditConflict(NodeId),
    /// Hierarchy materialization exceeded the defensive recursion bound,
    /// which indicates corrupted parent links in external data
    #[display("Node hierarchy deeper than {} levels, refusing to materialize", _0)]
    DepthExceeded(usize),
    /// Hierarchy materialization was cancelled by the caller
    #[display("Hierarchy materialization cancelled")]
    Cancelled,
}

/// Node error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{NodeError, NodeErrorKind};
/// use fabula_core::NodeId;
///
/// let err = NodeError::new(NodeErrorKind::EditConflict(NodeId::from(5)));
/// assert!(format!("{}", err).contains("children"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Node Error: {} at line {} in {}", kind, line, file)]
pub struct NodeError {
    /// The specific error condition
    pub kind: NodeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NodeError {
    /// Create a new NodeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NodeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for the common not-found case.
    #[track_caller]
    pub fn not_found(node_id: NodeId) -> Self {
        Self::new(NodeErrorKind::NotFound(node_id))
    }
}
