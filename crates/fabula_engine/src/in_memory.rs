//! In-memory collaborator implementations for testing.
//!
//! This module provides simple HashMap-based implementations of the store
//! and accessor traits. Useful for unit tests and for embedding the engine
//! without a persistence layer. All data is lost on drop.

use async_trait::async_trait;
use fabula_core::{
    CharacterRecord, Node, NodeDraft, NodeId, StoryId, StoryRecord,
};
use fabula_error::{FabulaResult, StoryError};
use fabula_interface::{CharacterAccessor, NodeStore, StoryAccessor};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory node store.
///
/// Nodes live in a HashMap behind an RwLock for thread-safe access; ids are
/// assigned from a monotonically increasing counter. `delete` is idempotent
/// as the [`NodeStore`] contract requires.
///
/// # Example
/// ```no_run
/// use fabula_engine::InMemoryNodeStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryNodeStore::new();
///     assert!(store.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryNodeStore {
    nodes: Arc<RwLock<HashMap<NodeId, Node>>>,
    next_id: Arc<RwLock<i64>>,
}

impl InMemoryNodeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    /// Number of stored nodes (for testing).
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Whether the store holds no nodes (for testing).
    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }

    /// Insert a fully formed node at its own id, bumping the id counter past
    /// it. Lets tests seed exact hierarchies without going through the
    /// engine.
    pub async fn seed(&self, node: Node) {
        let mut next_id = self.next_id.write().await;
        if node.node_id.0 >= *next_id {
            *next_id = node.node_id.0 + 1;
        }
        drop(next_id);
        self.nodes.write().await.insert(node.node_id, node);
    }
}

#[async_trait]
impl NodeStore for InMemoryNodeStore {
    async fn insert(&self, draft: &NodeDraft) -> FabulaResult<NodeId> {
        let mut next_id_guard = self.next_id.write().await;
        let node_id = NodeId::from(*next_id_guard);
        *next_id_guard += 1;
        drop(next_id_guard);

        let node = Node::bare(
            node_id,
            draft.story_id,
            Some(draft.user_id),
            draft.parent_id,
        );
        self.nodes.write().await.insert(node_id, node);
        Ok(node_id)
    }

    async fn node(&self, node_id: NodeId) -> FabulaResult<Option<Node>> {
        Ok(self.nodes.read().await.get(&node_id).cloned())
    }

    async fn children_of(&self, parent_id: NodeId) -> FabulaResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut children: Vec<Node> = nodes
            .values()
            .filter(|n| n.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by_key(|n| n.node_id);
        Ok(children)
    }

    async fn roots_of(&self, story_id: StoryId) -> FabulaResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut roots: Vec<Node> = nodes
            .values()
            .filter(|n| n.story_id == story_id && n.parent_id.is_none())
            .cloned()
            .collect();
        roots.sort_by_key(|n| n.node_id);
        Ok(roots)
    }

    async fn update(&self, node: &Node) -> FabulaResult<()> {
        self.nodes.write().await.insert(node.node_id, node.clone());
        Ok(())
    }

    async fn delete(&self, node_id: NodeId) -> FabulaResult<()> {
        // Absent ids are a successful no-op per the trait contract.
        self.nodes.write().await.remove(&node_id);
        Ok(())
    }
}

/// In-memory story accessor keyed by story id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryAccessor {
    stories: Arc<RwLock<HashMap<StoryId, StoryRecord>>>,
}

impl InMemoryStoryAccessor {
    /// Create a new empty accessor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a story record.
    pub async fn insert(&self, story: StoryRecord) {
        self.stories.write().await.insert(*story.story_id(), story);
    }
}

#[async_trait]
impl StoryAccessor for InMemoryStoryAccessor {
    async fn story(&self, story_id: StoryId) -> FabulaResult<StoryRecord> {
        self.stories
            .read()
            .await
            .get(&story_id)
            .cloned()
            .ok_or_else(|| StoryError::not_found(story_id).into())
    }
}

/// In-memory character accessor with per-story exact-name lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharacterAccessor {
    characters: Arc<RwLock<Vec<CharacterRecord>>>,
}

impl InMemoryCharacterAccessor {
    /// Create a new empty accessor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character record.
    pub async fn insert(&self, character: CharacterRecord) {
        self.characters.write().await.push(character);
    }
}

#[async_trait]
impl CharacterAccessor for InMemoryCharacterAccessor {
    async fn find_character(
        &self,
        story_id: StoryId,
        first_name: &str,
        last_name: &str,
    ) -> FabulaResult<Option<CharacterRecord>> {
        let characters = self.characters.read().await;
        Ok(characters
            .iter()
            .find(|c| {
                *c.story_id() == story_id
                    && c.first_name() == first_name
                    && c.last_name() == last_name
            })
            .cloned())
    }
}
