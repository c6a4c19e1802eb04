//! Identifier newtypes for stories, nodes, users, and characters.
//!
//! Identifiers are assigned by the persistence collaborators; the core only
//! passes them around, so each is a thin wrapper over the store's integer key.

use serde::{Deserialize, Serialize};

/// Identifier of a persisted narrative node.
///
/// # Examples
///
/// ```
/// use fabula_core::NodeId;
///
/// let id = NodeId::from(7);
/// assert_eq!(format!("{}", id), "7");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct NodeId(pub i64);

/// Identifier of a story.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct StoryId(pub i64);

/// Identifier of a user account.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct UserId(pub i64);

/// Identifier of a character record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct CharacterId(pub i64);
