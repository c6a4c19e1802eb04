//! Story metadata as seen by the hierarchy engine.

use crate::{StoryId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subscription tier of a story's owner, which controls the length framing
/// of continuation prompts.
///
/// # Examples
///
/// ```
/// use fabula_core::Tier;
///
/// assert_eq!(Tier::from_role("PREMIUM"), Tier::Premium);
/// assert_eq!(Tier::from_role("user"), Tier::Standard);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Tier {
    /// Unrestricted-length continuation prompts.
    Premium,
    /// Continuations capped at a 500-word ceiling.
    #[default]
    Standard,
}

impl Tier {
    /// Parse a tier from an account role string.
    ///
    /// "premium" matches case-insensitively; every other value falls back to
    /// [`Tier::Standard`].
    pub fn from_role(role: &str) -> Self {
        Self::from_str(role).unwrap_or_default()
    }
}

/// Read-only story metadata supplied by the story accessor collaborator.
///
/// Carries the story name in addition to the lookup fields the engine
/// validates against, because character-resolution failures report the story
/// by name.
///
/// # Examples
///
/// ```
/// use fabula_core::{StoryId, StoryRecordBuilder, Tier, UserId};
///
/// let story = StoryRecordBuilder::default()
///     .story_id(StoryId::from(1))
///     .name("The Long Night")
///     .genre("Fantasy")
///     .owner(UserId::from(9))
///     .tier(Tier::Premium)
///     .build()
///     .unwrap();
/// assert_eq!(story.genre(), "Fantasy");
/// ```
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
pub struct StoryRecord {
    /// Story identifier.
    story_id: StoryId,
    /// Display name, used in error messages.
    name: String,
    /// Target genre for generated content.
    genre: String,
    /// Free-text story description.
    #[builder(default)]
    description: String,
    /// Owning user; node creation is restricted to the owner.
    owner: UserId,
    /// Owner's subscription tier.
    #[builder(default)]
    tier: Tier,
}
