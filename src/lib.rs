//! Two-player scorekeeper: library with models, scoring and voice command logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::{AppConfig, ConfigError};
pub use logic::{
    apply_command, handle_transcript, interpret, toggle_server, Intent, Interpretation, Phrase,
    TranscriptOutcome, Vocabulary, VocabularyError, PLAYER_PLACEHOLDER,
};
pub use models::{Command, MatchError, MatchState, Player, Side};
