//! Trait definitions for the engine's external collaborators.

use async_trait::async_trait;
use fabula_core::{CharacterRecord, Node, NodeDraft, NodeId, StoryId, StoryRecord};
use fabula_error::FabulaResult;
use std::time::Duration;

/// Read-only access to story metadata.
///
/// The engine treats stories as externally owned; it only ever looks them up
/// to validate ownership and read genre and tier.
#[async_trait]
pub trait StoryAccessor: Send + Sync {
    /// Fetch a story by id.
    ///
    /// # Errors
    ///
    /// Returns a story not-found error when the id is unknown.
    async fn story(&self, story_id: StoryId) -> FabulaResult<StoryRecord>;
}

/// Read-only access to character records, resolved per-story by name.
#[async_trait]
pub trait CharacterAccessor: Send + Sync {
    /// Look up a character by (first name, last name) within a story.
    ///
    /// Returns `Ok(None)` when no such character exists; the engine decides
    /// whether that is an error for the operation at hand.
    async fn find_character(
        &self,
        story_id: StoryId,
        first_name: &str,
        last_name: &str,
    ) -> FabulaResult<Option<CharacterRecord>>;
}

/// Persistence abstraction for narrative nodes.
///
/// Implementations own their storage layout entirely, including how the
/// `characters` list is serialized. The engine issues short, independent
/// calls; no multi-step transaction ever spans a text generation call.
///
/// # Delete idempotency
///
/// `delete` MUST treat an already-deleted (or never-existing) id as a
/// successful no-op. The breadth-first subtree teardown queries children
/// level by level, and two teardowns racing over overlapping subtrees may
/// both visit the same node; the traversal is only safe under that race if
/// redundant deletes succeed.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Persist a bare node and return its store-assigned id.
    async fn insert(&self, draft: &NodeDraft) -> FabulaResult<NodeId>;

    /// Fetch a node by id, `None` if absent.
    async fn node(&self, node_id: NodeId) -> FabulaResult<Option<Node>>;

    /// Fetch the direct children of a node.
    async fn children_of(&self, parent_id: NodeId) -> FabulaResult<Vec<Node>>;

    /// Fetch the root nodes (no parent) of a story.
    async fn roots_of(&self, story_id: StoryId) -> FabulaResult<Vec<Node>>;

    /// Overwrite a stored node with the given record, matched by id.
    async fn update(&self, node: &Node) -> FabulaResult<()>;

    /// Delete a node by id. Idempotent; see the trait-level contract.
    async fn delete(&self, node_id: NodeId) -> FabulaResult<()>;
}

/// A single opaque text completion call.
///
/// One prompt in, one generated text out. No retries, no caching, no
/// conversation state: the engine composes full prompts itself and chains
/// calls explicitly where outputs feed later inputs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt using the caller's credential.
    ///
    /// Implementations must give up once `timeout` elapses and report that
    /// as a failure; the engine treats a timeout like any other client
    /// failure and never retries.
    async fn complete(
        &self,
        credential: &str,
        prompt: &str,
        timeout: Duration,
    ) -> FabulaResult<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}
