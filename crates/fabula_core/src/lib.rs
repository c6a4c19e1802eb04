//! Core data types for the Fabula story-authoring backend.
//!
//! This crate provides the plain data records shared across the Fabula
//! workspace: identifier newtypes, the narrative [`Node`] and its edit
//! surface, story and character lookup records, and the cooperative
//! [`CancelToken`] used by hierarchy materialization.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cancel;
mod character;
mod generated;
mod id;
mod node;
mod story;
mod telemetry;

pub use cancel::CancelToken;
pub use character::{CharacterRecord, CharacterRecordBuilder, CharacterRef};
pub use generated::GeneratedBeat;
pub use id::{CharacterId, NodeId, StoryId, UserId};
pub use node::{LeafEdit, LeafEditBuilder, Node, NodeDraft};
pub use story::{StoryRecord, StoryRecordBuilder, Tier};
pub use telemetry::{init_telemetry, shutdown_telemetry};
