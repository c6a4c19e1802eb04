//! Fabula — collaborative story-authoring backend core.
//!
//! A story is a forest of narrative nodes; each node is an AI-generated
//! plot beat conditioned on its ancestor's carry-forward summary and a cast
//! of characters. Fabula implements the node hierarchy engine behind that
//! model: tree maintenance, prompt assembly from ancestor context, the
//! chained continuation+summarization generation, and subtree teardown.
//! Persistence, auth, and transport stay behind collaborator traits.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fabula::{
//!     GeminiTextGenerator, HierarchyEngine, InMemoryCharacterAccessor,
//!     InMemoryNodeStore, InMemoryStoryAccessor,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = HierarchyEngine::new(
//!         InMemoryStoryAccessor::new(),
//!         InMemoryCharacterAccessor::new(),
//!         InMemoryNodeStore::new(),
//!         GeminiTextGenerator::new(),
//!     );
//!
//!     let key = GeminiTextGenerator::api_key_from_env()?;
//!     let beat = engine
//!         .generate(&key, story_id, None, "A dragon appears", &[])
//!         .await?;
//!     println!("{}", beat.result);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Fabula is organized as a workspace with focused crates:
//!
//! - `fabula_core` - Data records (Node, StoryRecord, ids, ...)
//! - `fabula_error` - Error types
//! - `fabula_interface` - Collaborator trait definitions
//! - `fabula_engine` - The node hierarchy engine and prompt composer
//! - `fabula_models` - Text generation provider implementations
//!
//! This crate (`fabula`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use fabula_core::{
    CancelToken, CharacterId, CharacterRecord, CharacterRecordBuilder, CharacterRef,
    GeneratedBeat, LeafEdit, LeafEditBuilder, Node, NodeDraft, NodeId, StoryId, StoryRecord,
    StoryRecordBuilder, Tier, UserId, init_telemetry, shutdown_telemetry,
};
pub use fabula_engine::{
    HierarchyEngine, InMemoryCharacterAccessor, InMemoryNodeStore, InMemoryStoryAccessor, prompt,
};
pub use fabula_error::{
    CharacterError, CharacterErrorKind, FabulaError, FabulaErrorKind, FabulaResult, GeminiError,
    GeminiErrorKind, GenerationError, GenerationErrorKind, GenerationStage, NodeError,
    NodeErrorKind, StoreError, StoreErrorKind, StoryError, StoryErrorKind,
};
pub use fabula_interface::{
    CharacterAccessor, NodeStore, NodeTree, StoryAccessor, StoryForest, TextGenerator,
};
pub use fabula_models::GeminiTextGenerator;
