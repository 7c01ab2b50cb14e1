//! Match logic: scoring, serve rotation, voice command interpretation.

mod scoring;
mod transcript;
mod vocabulary;
mod voice;

pub use scoring::{apply_command, toggle_server};
pub use transcript::{handle_transcript, TranscriptOutcome};
pub use vocabulary::{Intent, Phrase, Vocabulary, VocabularyError, PLAYER_PLACEHOLDER};
pub(crate) use voice::normalize_words;
pub use voice::{interpret, Interpretation};
