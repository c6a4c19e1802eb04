//! Node hierarchy engine for the Fabula story-authoring backend.
//!
//! A story is a forest of narrative nodes, each one an AI-generated plot
//! beat conditioned on its ancestor's summary. This crate implements the
//! core of that system:
//!
//! - **Tree maintenance**: node creation anchored to a parent, leaf-only
//!   editing, and breadth-first subtree teardown.
//! - **Prompt composition**: pure functions assembling continuation,
//!   summarization, and character-background prompts from ancestor context.
//! - **Generation chaining**: the two dependent text-generation calls
//!   (continue the plot, then fold the result into a carry-forward summary)
//!   run as one logical operation with explicit partial-failure reporting.
//! - **Hierarchy materialization**: recursive, depth-bounded, cancellable
//!   assembly of a story's persisted forest.
//!
//! Persistence, auth, and transport are collaborator traits defined in
//! `fabula_interface`; in-memory implementations suitable for tests and
//! embedding live in this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use fabula_engine::{HierarchyEngine, InMemoryCharacterAccessor,
//!     InMemoryNodeStore, InMemoryStoryAccessor};
//! use fabula_models::GeminiTextGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = HierarchyEngine::new(
//!     InMemoryStoryAccessor::new(),
//!     InMemoryCharacterAccessor::new(),
//!     InMemoryNodeStore::new(),
//!     GeminiTextGenerator::new(),
//! );
//!
//! let beat = engine
//!     .generate(&key, story_id, None, "A dragon appears", &[])
//!     .await?;
//! println!("continuation: {}", beat.result);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod in_memory;
pub mod prompt;

pub use engine::HierarchyEngine;
pub use in_memory::{InMemoryCharacterAccessor, InMemoryNodeStore, InMemoryStoryAccessor};
