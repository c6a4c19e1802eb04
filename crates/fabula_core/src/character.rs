//! Character references and records.

use crate::{CharacterId, StoryId};
use serde::{Deserialize, Serialize};

/// A (first name, last name) pair naming a character within a story.
///
/// References are resolved per-story by the character accessor; the pair is
/// not globally unique.
///
/// # Examples
///
/// ```
/// use fabula_core::CharacterRef;
///
/// let who = CharacterRef::new("John", "Doe");
/// assert_eq!(format!("{}", who), "John Doe");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{} {}", first_name, last_name)]
pub struct CharacterRef {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl CharacterRef {
    /// Construct a reference from name parts.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A resolved character as supplied by the character accessor collaborator.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CharacterRecord {
    /// Character identifier.
    character_id: CharacterId,
    /// Given name.
    first_name: String,
    /// Family name.
    last_name: String,
    /// Background text fed verbatim into continuation prompts.
    #[builder(default)]
    background: String,
    /// Free-text notes about the character.
    #[builder(default)]
    context: String,
    /// Story this character belongs to.
    story_id: StoryId,
}
