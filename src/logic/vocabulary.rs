//! Vocabulary: the table of spoken phrases the voice interpreter recognizes.
//!
//! A phrase is a sequence of words with at most one `{player}` placeholder, which is
//! filled by either player's live name when matching. Tables can be loaded from CSV
//! with a `phrase,intent` header, e.g.
//!
//! ```text
//! phrase,intent
//! point {player},increment
//! minus {player},decrement
//! reset,reset
//! ```

use crate::logic::voice::normalize_word;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Placeholder standing for a player's name inside a phrase.
pub const PLAYER_PLACEHOLDER: &str = "{player}";

/// What a recognized phrase asks for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Increment,
    Decrement,
    Reset,
}

impl Intent {
    fn takes_player(self) -> bool {
        !matches!(self, Intent::Reset)
    }
}

/// Errors that can occur while building a vocabulary.
#[derive(Debug)]
pub enum VocabularyError {
    /// A phrase has no words at all.
    EmptyPhrase,
    /// Increment/decrement phrases need exactly one `{player}`, reset phrases none.
    PlayerPlaceholder { phrase: String, intent: Intent },
    /// A vocabulary must recognize at least one phrase.
    NoPhrases,
    /// The CSV file could not be read or a row could not be parsed.
    Csv(csv::Error),
}

impl std::fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabularyError::EmptyPhrase => write!(f, "Phrase must contain at least one word"),
            VocabularyError::PlayerPlaceholder { phrase, intent } => {
                if intent.takes_player() {
                    write!(f, "Phrase \"{}\" must contain {} exactly once", phrase, PLAYER_PLACEHOLDER)
                } else {
                    write!(f, "Phrase \"{}\" must not contain {}", phrase, PLAYER_PLACEHOLDER)
                }
            }
            VocabularyError::NoPhrases => write!(f, "Vocabulary contains no phrases"),
            VocabularyError::Csv(e) => write!(f, "Could not read vocabulary: {}", e),
        }
    }
}

impl std::error::Error for VocabularyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VocabularyError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for VocabularyError {
    fn from(e: csv::Error) -> Self {
        VocabularyError::Csv(e)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PhraseToken {
    /// Normalized (lowercase, no punctuation) word.
    Word(String),
    Player,
}

/// One recognized phrase and the intent it maps to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Phrase {
    text: String,
    pub(crate) tokens: Vec<PhraseToken>,
    pub intent: Intent,
}

impl Phrase {
    pub fn parse(text: &str, intent: Intent) -> Result<Self, VocabularyError> {
        let tokens: Vec<PhraseToken> = text
            .split_whitespace()
            .filter_map(|raw| {
                if raw.eq_ignore_ascii_case(PLAYER_PLACEHOLDER) {
                    Some(PhraseToken::Player)
                } else {
                    normalize_word(raw).map(PhraseToken::Word)
                }
            })
            .collect();
        if tokens.is_empty() {
            return Err(VocabularyError::EmptyPhrase);
        }
        let placeholders = tokens.iter().filter(|t| **t == PhraseToken::Player).count();
        let expected = usize::from(intent.takes_player());
        if placeholders != expected {
            return Err(VocabularyError::PlayerPlaceholder {
                phrase: text.trim().to_string(),
                intent,
            });
        }
        Ok(Self {
            text: text.trim().to_string(),
            tokens,
            intent,
        })
    }

    /// The phrase as written in the table.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Row of a vocabulary CSV file.
#[derive(Deserialize)]
struct PhraseRecord {
    phrase: String,
    intent: Intent,
}

/// Ordered phrase table. Earlier phrases win ties during matching.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vocabulary {
    phrases: Vec<Phrase>,
}

impl Default for Vocabulary {
    /// `point {player}`, `minus {player}` and `reset`.
    fn default() -> Self {
        let phrases = [
            ("point {player}", Intent::Increment),
            ("minus {player}", Intent::Decrement),
            ("reset", Intent::Reset),
        ]
        .into_iter()
        .filter_map(|(text, intent)| Phrase::parse(text, intent).ok())
        .collect();
        Self { phrases }
    }
}

impl Vocabulary {
    pub fn new(phrases: Vec<Phrase>) -> Result<Self, VocabularyError> {
        if phrases.is_empty() {
            return Err(VocabularyError::NoPhrases);
        }
        Ok(Self { phrases })
    }

    /// Read a `phrase,intent` table from any reader.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, VocabularyError> {
        Self::from_csv(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader))
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        Self::from_csv(rdr)
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, VocabularyError> {
        let mut phrases = Vec::new();
        for record in rdr.deserialize() {
            let record: PhraseRecord = record?;
            phrases.push(Phrase::parse(&record.phrase, record.intent)?);
        }
        Self::new(phrases)
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }
}
