//! The node hierarchy engine.
//!
//! Composes the prompt module with the four collaborator traits to implement
//! node creation, leaf-only editing, the two-step generation chain, subtree
//! teardown, and hierarchy materialization. The engine holds no mutable
//! state of its own; the node store is the only shared mutable resource it
//! touches, and no store call is ever held open across a text generation
//! call.

use crate::prompt;
use fabula_core::{
    CancelToken, CharacterRecord, CharacterRef, GeneratedBeat, LeafEdit, Node, NodeDraft, NodeId,
    StoryId, StoryRecord, UserId,
};
use fabula_error::{
    CharacterError, CharacterErrorKind, FabulaResult, GenerationError, GenerationErrorKind,
    GenerationStage, NodeError, NodeErrorKind, StoryError,
};
use fabula_interface::{CharacterAccessor, NodeStore, NodeTree, StoryAccessor, StoryForest, TextGenerator};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default deadline for a single text generation call.
const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default recursion bound for hierarchy materialization.
const DEFAULT_MAX_DEPTH: usize = 64;

/// Orchestrates the story node hierarchy.
///
/// Generic over the four collaborators so tests can substitute in-memory
/// implementations and a scripted text generator. Each operation runs
/// independently; the engine carries only configuration between calls.
///
/// Validation failures are synchronous and non-retryable. The two text
/// generation calls inside [`generate`](Self::generate) are never retried:
/// if the second fails after the first succeeded, the whole operation fails
/// with the stage attached and the already-produced continuation is
/// discarded.
pub struct HierarchyEngine<S, C, N, G> {
    stories: S,
    characters: C,
    nodes: N,
    generator: G,
    completion_timeout: Duration,
    max_depth: usize,
}

impl<S, C, N, G> HierarchyEngine<S, C, N, G>
where
    S: StoryAccessor,
    C: CharacterAccessor,
    N: NodeStore,
    G: TextGenerator,
{
    /// Create an engine over the given collaborators with default limits.
    pub fn new(stories: S, characters: C, nodes: N, generator: G) -> Self {
        Self {
            stories,
            characters,
            nodes,
            generator,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the deadline applied to each text generation call.
    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    /// Set the defensive recursion bound for hierarchy materialization.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Create a bare node in a story the caller owns.
    ///
    /// The parent id, if given, is deliberately not validated here: a parent
    /// deleted between creation and generation must not poison the node, so
    /// dangling parents are resolved to root framing at generation time
    /// instead.
    ///
    /// # Errors
    ///
    /// Story lookup failures and ownership mismatches both surface as story
    /// not-found, so a non-owner cannot distinguish someone else's story
    /// from an id that was never allocated.
    #[tracing::instrument(skip(self))]
    pub async fn create_node(
        &self,
        user_id: UserId,
        story_id: StoryId,
        parent_id: Option<NodeId>,
    ) -> FabulaResult<NodeId> {
        let story = self.stories.story(story_id).await?;
        if *story.owner() != user_id {
            return Err(StoryError::not_found(story_id))?;
        }

        let draft = NodeDraft {
            story_id,
            user_id,
            parent_id,
        };
        let node_id = self.nodes.insert(&draft).await?;
        tracing::debug!(%node_id, "created bare node");
        Ok(node_id)
    }

    /// Overwrite the content fields of a leaf node.
    ///
    /// # Errors
    ///
    /// A missing node or a story mismatch surfaces as story not-found; a
    /// node with children refuses the edit with an edit conflict.
    #[tracing::instrument(skip(self, edit))]
    pub async fn edit_leaf(
        &self,
        story_id: StoryId,
        node_id: NodeId,
        edit: LeafEdit,
    ) -> FabulaResult<Node> {
        let mut node = self
            .nodes
            .node(node_id)
            .await?
            .ok_or_else(|| StoryError::not_found(story_id))?;
        if node.story_id != story_id {
            return Err(StoryError::not_found(story_id))?;
        }
        if !self.nodes.children_of(node_id).await?.is_empty() {
            return Err(NodeError::new(NodeErrorKind::EditConflict(node_id)))?;
        }

        node.apply(edit);
        self.nodes.update(&node).await?;
        Ok(node)
    }

    /// Fetch a node, validating that it belongs to the given story.
    #[tracing::instrument(skip(self))]
    pub async fn get_node(&self, story_id: StoryId, node_id: NodeId) -> FabulaResult<Node> {
        let node = self
            .nodes
            .node(node_id)
            .await?
            .ok_or_else(|| NodeError::not_found(node_id))?;
        if node.story_id != story_id {
            return Err(NodeError::new(NodeErrorKind::StoryMismatch {
                node: node_id,
                story: story_id,
            }))?;
        }
        Ok(node)
    }

    /// Run the two-step generation chain for a new beat.
    ///
    /// Resolves every named character before the first external call, so a
    /// bad character reference fails fast with zero completion calls. The
    /// continuation call runs first; its output feeds the summarization
    /// prompt, so the two calls are strictly sequential. Nothing is
    /// persisted: the caller decides whether to write the returned pair back
    /// through [`edit_leaf`](Self::edit_leaf), which keeps generation
    /// side-effect-free on the store and safe to re-invoke.
    ///
    /// A parent id pointing at a node that no longer exists gets root
    /// framing, exactly like no parent at all.
    ///
    /// # Errors
    ///
    /// Story not-found, character not-found (naming the character and the
    /// story), or a generation failure carrying the stage that failed. On a
    /// second-stage failure the first stage's output is discarded.
    #[tracing::instrument(skip(self, credential, direction))]
    pub async fn generate(
        &self,
        credential: &str,
        story_id: StoryId,
        parent_id: Option<NodeId>,
        direction: &str,
        character_refs: &[CharacterRef],
    ) -> FabulaResult<GeneratedBeat> {
        let story = self.stories.story(story_id).await?;

        // Dangling parent references resolve to root framing by policy.
        let parent = match parent_id {
            Some(id) => self.nodes.node(id).await?,
            None => None,
        };
        if parent.is_none() && parent_id.is_some() {
            tracing::debug!(?parent_id, "parent no longer exists, using root framing");
        }

        let cast = self.resolve_cast(&story, character_refs).await?;

        let continuation = prompt::continuation_prompt(
            story.genre(),
            *story.tier(),
            parent.as_ref().map(|p| p.summary.as_str()),
            direction,
            &cast,
        );
        let result = self
            .complete(GenerationStage::Continuation, credential, &continuation)
            .await?;

        let summarization =
            prompt::summarization_prompt(parent.as_ref().map(|p| p.context.as_str()), &result);
        let summary = self
            .complete(GenerationStage::Summarization, credential, &summarization)
            .await?;

        Ok(GeneratedBeat { result, summary })
    }

    /// Generate a short creative background for a character, consistent with
    /// the story's genre.
    ///
    /// # Errors
    ///
    /// Story not-found, or a generation failure at the character-background
    /// stage.
    #[tracing::instrument(skip(self, credential))]
    pub async fn generate_character_background(
        &self,
        credential: &str,
        story_id: StoryId,
        first_name: &str,
        last_name: &str,
    ) -> FabulaResult<String> {
        let story = self.stories.story(story_id).await?;
        let background =
            prompt::character_background_prompt(first_name, last_name, story.genre());
        self.complete(GenerationStage::CharacterBackground, credential, &background)
            .await
    }

    /// Delete a node and its entire subtree, breadth first.
    ///
    /// Each level's children are fetched fresh from the store, never from an
    /// in-memory snapshot, so the traversal works on trees of any size and
    /// stays correct when a concurrent teardown overlaps this one — which is
    /// why [`NodeStore::delete`] is required to be idempotent. Parents are
    /// deleted before their children; sibling order is unspecified.
    #[tracing::instrument(skip(self))]
    pub async fn delete_subtree(&self, root: NodeId) -> FabulaResult<()> {
        let mut queue = VecDeque::from([root]);
        let mut visited = 0usize;

        while let Some(current) = queue.pop_front() {
            self.nodes.delete(current).await?;
            visited += 1;
            for child in self.nodes.children_of(current).await? {
                queue.push_back(child.node_id);
            }
        }

        tracing::debug!(%root, visited, "subtree deleted");
        Ok(())
    }

    /// Materialize the persisted forest of a story.
    ///
    /// Recursively fetches children for every root node, mirroring the
    /// stored parent/child edges. A node without a `user_id` is a
    /// data-integrity skip: it is excluded from the assembled tree together
    /// with anything beneath it, without failing the operation. Recursion is
    /// bounded defensively; exceeding the bound means the stored parent
    /// links are corrupt and the operation fails closed rather than
    /// truncating silently. The cancel token is checked before every
    /// descent.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn materialize_hierarchy(
        &self,
        story_id: StoryId,
        cancel: &CancelToken,
    ) -> FabulaResult<StoryForest> {
        let mut roots = Vec::new();
        for root in self.nodes.roots_of(story_id).await? {
            if let Some(tree) = self.build_tree(root, 0, cancel).await? {
                roots.push(tree);
            }
        }
        Ok(StoryForest { story_id, roots })
    }

    fn build_tree<'a>(
        &'a self,
        node: Node,
        depth: usize,
        cancel: &'a CancelToken,
    ) -> Pin<Box<dyn Future<Output = FabulaResult<Option<NodeTree>>> + Send + 'a>> {
        Box::pin(async move {
            if cancel.is_cancelled() {
                return Err(NodeError::new(NodeErrorKind::Cancelled))?;
            }
            if depth >= self.max_depth {
                return Err(NodeError::new(NodeErrorKind::DepthExceeded(self.max_depth)))?;
            }
            if node.user_id.is_none() {
                tracing::warn!(node_id = %node.node_id, "node has no user attached, skipping");
                return Ok(None);
            }

            let children = self.nodes.children_of(node.node_id).await?;
            let mut tree = NodeTree::leaf(node);
            for child in children {
                if let Some(subtree) = self.build_tree(child, depth + 1, cancel).await? {
                    tree.children.push(subtree);
                }
            }
            Ok(Some(tree))
        })
    }

    /// Resolve every character reference, failing on the first miss.
    async fn resolve_cast(
        &self,
        story: &StoryRecord,
        refs: &[CharacterRef],
    ) -> FabulaResult<Vec<CharacterRecord>> {
        let mut cast = Vec::with_capacity(refs.len());
        for character in refs {
            let record = self
                .characters
                .find_character(*story.story_id(), &character.first_name, &character.last_name)
                .await?
                .ok_or_else(|| {
                    CharacterError::new(CharacterErrorKind::NotFound {
                        first_name: character.first_name.clone(),
                        last_name: character.last_name.clone(),
                        story: story.name().clone(),
                    })
                })?;
            cast.push(record);
        }
        Ok(cast)
    }

    /// Run one completion call under the configured deadline, tagging any
    /// failure with the stage it occurred in.
    async fn complete(
        &self,
        stage: GenerationStage,
        credential: &str,
        prompt_text: &str,
    ) -> FabulaResult<String> {
        let deadline = self.completion_timeout;
        match tokio::time::timeout(
            deadline,
            self.generator.complete(credential, prompt_text, deadline),
        )
        .await
        {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(failure)) => Err(GenerationError::new(GenerationErrorKind::Failed {
                stage,
                message: failure.to_string(),
            }))?,
            Err(_elapsed) => Err(GenerationError::new(GenerationErrorKind::TimedOut {
                stage,
                after: deadline,
            }))?,
        }
    }
}
