//! Error types for the Fabula story-authoring backend.
//!
//! This crate provides the foundation error types used throughout the Fabula
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabula_error::{FabulaResult, StoryError, StoryErrorKind};
//! use fabula_core::StoryId;
//!
//! fn lookup() -> FabulaResult<String> {
//!     Err(StoryError::new(StoryErrorKind::NotFound(StoryId::from(4))))?
//! }
//!
//! match lookup() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod error;
mod gemini;
mod generation;
mod node;
mod store;
mod story;

pub use character::{CharacterError, CharacterErrorKind};
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use generation::{GenerationError, GenerationErrorKind, GenerationStage};
pub use node::{NodeError, NodeErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use story::{StoryError, StoryErrorKind};
