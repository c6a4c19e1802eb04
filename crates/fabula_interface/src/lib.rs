//! Collaborator trait definitions for the Fabula story-authoring backend.
//!
//! The hierarchy engine consumes four external collaborators: story and
//! character lookups, the node store, and the text generation client. This
//! crate defines their interfaces, plus the materialized-tree types the
//! engine returns.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod tree;

pub use traits::{CharacterAccessor, NodeStore, StoryAccessor, TextGenerator};
pub use tree::{NodeTree, StoryForest};
