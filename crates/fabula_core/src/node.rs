//! The narrative node record and its edit surface.

use crate::{CharacterRef, NodeId, StoryId, UserId};
use serde::{Deserialize, Serialize};

/// A single narrative beat in a story tree.
///
/// A node is created bare (content fields empty) anchored to an optional
/// parent, populated via [`LeafEdit`] while it is still a leaf, and becomes
/// read-only for its content fields once it acquires children. The engine
/// enforces the leaf-only invariant; the store just persists what it is
/// given.
///
/// `characters` is a first-class ordered list. How a store serializes it
/// (JSON column, join table, ...) is the store's own concern.
///
/// # Examples
///
/// ```
/// use fabula_core::{Node, NodeId, StoryId, UserId};
///
/// let node = Node::bare(
///     NodeId::from(10),
///     StoryId::from(1),
///     Some(UserId::from(3)),
///     None,
/// );
/// assert!(node.is_root());
/// assert!(node.result.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned identifier, unique per node.
    pub node_id: NodeId,
    /// Parent node, `None` for a root. Immutable after creation.
    pub parent_id: Option<NodeId>,
    /// Owning story. Immutable after creation.
    pub story_id: StoryId,
    /// Creating user. `None` marks a record that lost its author; hierarchy
    /// materialization skips such nodes rather than erroring.
    pub user_id: Option<UserId>,
    /// Author-supplied direction for this beat.
    pub context: String,
    /// Shot/scene description.
    pub description: String,
    /// AI-generated continuation text.
    pub result: String,
    /// Condensed carry-forward summary of everything up to this beat.
    pub summary: String,
    /// Display label.
    pub node_name: String,
    /// Characters in scope for this beat, in author order.
    pub characters: Vec<CharacterRef>,
}

impl Node {
    /// Construct a bare node with all content fields empty.
    pub fn bare(
        node_id: NodeId,
        story_id: StoryId,
        user_id: Option<UserId>,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            node_id,
            parent_id,
            story_id,
            user_id,
            context: String::new(),
            description: String::new(),
            result: String::new(),
            summary: String::new(),
            node_name: String::new(),
            characters: Vec::new(),
        }
    }

    /// Whether this node is a root of its story's forest.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Overwrite the mutable content fields from an edit.
    ///
    /// `result` is only touched when the edit carries one, so an ordinary
    /// content edit never clobbers a previously persisted generation result.
    pub fn apply(&mut self, edit: LeafEdit) {
        self.description = edit.description;
        self.context = edit.context;
        self.node_name = edit.node_name;
        self.summary = edit.summary;
        self.characters = edit.characters;
        if let Some(result) = edit.result {
            self.result = result;
        }
    }
}

/// What `create_node` hands to the store: the immutable anchors of a new
/// node. Content fields start empty and the store assigns the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDraft {
    /// Owning story.
    pub story_id: StoryId,
    /// Creating user.
    pub user_id: UserId,
    /// Optional parent. Deliberately not validated at creation time; a
    /// dangling parent is resolved to root framing at generation time.
    pub parent_id: Option<NodeId>,
}

/// The writable surface of a leaf node.
///
/// # Examples
///
/// ```
/// use fabula_core::LeafEditBuilder;
///
/// let edit = LeafEditBuilder::default()
///     .node_name("Chapter 1")
///     .context("A dragon appears")
///     .build()
///     .unwrap();
/// assert!(edit.result.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct LeafEdit {
    /// Shot/scene description.
    pub description: String,
    /// Author-supplied direction.
    pub context: String,
    /// Display label.
    pub node_name: String,
    /// Carry-forward summary.
    pub summary: String,
    /// Characters in scope, in author order.
    pub characters: Vec<CharacterRef>,
    /// Generation result to persist; `None` leaves the stored value alone.
    pub result: Option<String>,
}
