//! Text generation provider integrations for Fabula.
//!
//! Implementations of the [`TextGenerator`](fabula_interface::TextGenerator)
//! collaborator trait. Currently ships the Google Gemini REST client; the
//! trait keeps the engine indifferent to which provider answers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::GeminiTextGenerator;
