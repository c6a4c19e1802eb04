//! Materialized hierarchy types.

use fabula_core::{Node, NodeId, StoryId};
use serde::{Deserialize, Serialize};

/// A node together with its recursively materialized children.
///
/// Mirrors the persisted parent/child edges exactly; construction is the
/// engine's job, this type just carries the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTree {
    /// The node at this position in the tree.
    pub node: Node,
    /// Direct children, each with their own subtrees.
    pub children: Vec<NodeTree>,
}

impl NodeTree {
    /// A leaf tree with no children.
    pub fn leaf(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, itself included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(NodeTree::len).sum::<usize>()
    }

    /// Whether the subtree consists of just this node.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first iteration over every node in the subtree.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut nodes = Vec::with_capacity(self.len());
        self.collect_into(&mut nodes);
        nodes.into_iter()
    }

    /// Whether a node id occurs anywhere in the subtree.
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.iter().any(|n| n.node_id == node_id)
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.node);
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

/// The materialized forest of a story: every root node with its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryForest {
    /// The story the forest belongs to.
    pub story_id: StoryId,
    /// One tree per root node, in store order.
    pub roots: Vec<NodeTree>,
}

impl StoryForest {
    /// Total number of nodes across all roots.
    pub fn len(&self) -> usize {
        self.roots.iter().map(NodeTree::len).sum()
    }

    /// Whether the forest has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first iteration over every node in the forest.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().flat_map(NodeTree::iter)
    }
}
