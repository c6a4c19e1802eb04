//! Pure prompt composition.
//!
//! Three construction functions build the prompt text handed to the text
//! generation client. They are deterministic string assembly with no I/O:
//! given the same inputs they produce byte-identical output, which is what
//! makes the generation chain reproducible modulo the external model.

use fabula_core::{CharacterRecord, Tier};
use std::fmt::Write;

/// Separator line between prompt sections and character entries.
const SEPARATOR: &str = "====================================";

/// Marker used in place of a parent summary when generating from a root.
const NO_PRIOR_PLOT: &str = "None";

/// Marker used in place of parent context when summarizing a root beat.
const STORY_BEGINNING: &str = "This is the beginning of the whole story";

/// Bounded word ceiling applied to non-premium continuations.
const STANDARD_WORD_CEILING: u32 = 500;

/// Build the continuation prompt for a new plot beat.
///
/// `parent_summary` is the parent node's stored summary, or `None` for root
/// framing. Root framing applies both when no parent was named and when the
/// named parent no longer exists; resolving that is the caller's job, this
/// function only distinguishes `Some` from `None`.
///
/// Character entries render last name, first name, and background verbatim,
/// each followed by a separator line, in the order given.
pub fn continuation_prompt(
    genre: &str,
    tier: Tier,
    parent_summary: Option<&str>,
    direction: &str,
    characters: &[CharacterRecord],
) -> String {
    let mut prompt = String::new();

    match tier {
        Tier::Premium => {
            let _ = writeln!(
                prompt,
                "Based on the following provided plot, generate a new story continuation."
            );
        }
        Tier::Standard => {
            let _ = writeln!(
                prompt,
                "Based on the following provided plot, generate a new story continuation \
                 in no more than {STANDARD_WORD_CEILING} words."
            );
        }
    }
    let _ = writeln!(
        prompt,
        "Please ensure the new content is creative and engaging, and guarantee the story \
         style is {genre}."
    );
    prompt.push_str("Only return the new story content, keeping it concise and coherent.\n");
    let _ = writeln!(prompt, "{SEPARATOR}\n");

    match parent_summary {
        Some(summary) => {
            let _ = writeln!(prompt, "Plot synopsis: \"{summary}\"");
        }
        None => {
            let _ = writeln!(prompt, "Plot synopsis: {NO_PRIOR_PLOT}");
        }
    }
    let _ = writeln!(prompt, "{SEPARATOR}\n");

    let _ = writeln!(prompt, "Expected direction of the plot: \"{direction}\"");
    let _ = writeln!(prompt, "{SEPARATOR}\n");

    prompt.push_str(
        "Here are the characters involved in this story, with their names and background \
         information:\n",
    );
    for character in characters {
        let _ = writeln!(
            prompt,
            "lastName={}, firstName={}, background={}",
            character.last_name(),
            character.first_name(),
            character.background()
        );
        let _ = writeln!(prompt, "{SEPARATOR}");
    }

    prompt
}

/// Build the prompt that folds a freshly generated continuation into a
/// carry-forward summary.
///
/// `prior_context` is the parent node's stored context, or `None` for root
/// framing, in which case a fixed beginning-of-story marker stands in for
/// part 1.
pub fn summarization_prompt(prior_context: Option<&str>, new_result: &str) -> String {
    let mut prompt = String::from(
        "Please combine the following two parts into a coherent and concise story outline. \
         Ensure that no important details are lost, and the resulting story serves as a \
         complete background for future story development.\n\
         \n\
         Requirements:\n\
         - Combine both parts into a smooth and brief story outline, maintaining the flow \
         of the narrative and including all essential details.\n\
         - Ensure the final outline can be used as a foundation for the next story \
         generation.\n\
         - Keep the outline within 200 words, focusing on clarity and conciseness.\n",
    );
    let _ = writeln!(prompt, "{SEPARATOR}\n");

    prompt.push_str("Part 1: Summary of everything that has happened so far\n");
    match prior_context {
        Some(context) => {
            let _ = writeln!(prompt, "\"{context}\"");
        }
        None => {
            let _ = writeln!(prompt, "\"{STORY_BEGINNING}\"");
        }
    }
    let _ = writeln!(prompt, "{SEPARATOR}\n");

    prompt.push_str("Part 2: New record\n");
    let _ = writeln!(prompt, "\"{new_result}\"");

    prompt
}

/// Build the prompt for a short creative character background consistent
/// with the story's genre, for character introduction use.
pub fn character_background_prompt(first_name: &str, last_name: &str, genre: &str) -> String {
    format!(
        "Based on the story so far, generate a background for {first_name} {last_name}, \
         no more than 50 words.\n\
         Please ensure the new content is creative and engaging, and guarantee the story \
         style is {genre}.\n\
         Only return the new background content, keeping it concise and coherent.\n"
    )
}
