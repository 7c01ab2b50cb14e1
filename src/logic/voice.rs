//! Voice command interpreter: turns a growing speech transcript into at most one command.
//!
//! Matching works on normalized words (lowercase, punctuation stripped), so
//! "  Point, ANNA. " and "point anna" are the same utterance. Player names come
//! from the live match state, never from the phrase table.

use crate::logic::vocabulary::{Intent, Phrase, PhraseToken, Vocabulary};
use crate::models::{Command, MatchState, Side};
use serde::Serialize;
use std::sync::OnceLock;

/// Result of interpreting a transcript.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Interpretation {
    pub command: Option<Command>,
    /// True when the transcript produced a command and should be cleared.
    pub consumed: bool,
}

static DEFAULT_VOCABULARY: OnceLock<Vocabulary> = OnceLock::new();

/// Interpret a transcript with the default vocabulary (built once, then shared).
pub fn interpret(transcript: &str, state: &MatchState) -> Interpretation {
    DEFAULT_VOCABULARY
        .get_or_init(Vocabulary::default)
        .interpret(transcript, state)
}

/// Lowercase a word and strip surrounding punctuation. `None` if nothing is left.
pub(crate) fn normalize_word(word: &str) -> Option<String> {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

pub(crate) fn normalize_words(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(normalize_word).collect()
}

/// A phrase found in the transcript, spanning `words[start..end]`.
struct PhraseMatch {
    start: usize,
    end: usize,
    command: Command,
}

impl PhraseMatch {
    /// Later end wins (most recently spoken); on equal end the longer match wins.
    fn beats(&self, other: &PhraseMatch) -> bool {
        self.end > other.end || (self.end == other.end && self.start < other.start)
    }
}

impl Vocabulary {
    /// Find the most recently completed phrase in `transcript`.
    ///
    /// Decrements are not checked against the current score here; the scoring
    /// logic rejects them. Unrecognized text is not an error: it returns no
    /// command and leaves the transcript unconsumed.
    pub fn interpret(&self, transcript: &str, state: &MatchState) -> Interpretation {
        let words = normalize_words(transcript);
        if words.is_empty() {
            return Interpretation::default();
        }
        let names = [
            (Side::One, state.player_one.spoken_name()),
            (Side::Two, state.player_two.spoken_name()),
        ];

        let mut best: Option<PhraseMatch> = None;
        for phrase in self.phrases() {
            for start in 0..words.len() {
                if let Some(found) = match_phrase_at(phrase, &words, start, &names) {
                    if best.as_ref().map_or(true, |b| found.beats(b)) {
                        best = Some(found);
                    }
                }
            }
        }

        match best {
            Some(found) => {
                log::debug!(
                    "Voice command \"{}\" -> {}",
                    words[found.start..found.end].join(" "),
                    found.command
                );
                Interpretation {
                    command: Some(found.command),
                    consumed: true,
                }
            }
            None => Interpretation::default(),
        }
    }
}

fn match_phrase_at(
    phrase: &Phrase,
    words: &[String],
    start: usize,
    names: &[(Side, Vec<String>); 2],
) -> Option<PhraseMatch> {
    let mut pos = start;
    let mut side = None;
    for token in &phrase.tokens {
        match token {
            PhraseToken::Word(w) => {
                if words.get(pos) != Some(w) {
                    return None;
                }
                pos += 1;
            }
            PhraseToken::Player => {
                let (s, len) = match_player(words.get(pos..)?, names)?;
                side = Some(s);
                pos += len;
            }
        }
    }
    let command = match (phrase.intent, side) {
        (Intent::Increment, Some(s)) => Command::Increment(s),
        (Intent::Decrement, Some(s)) => Command::Decrement(s),
        (Intent::Reset, _) => Command::Reset,
        _ => return None,
    };
    Some(PhraseMatch {
        start,
        end: pos,
        command,
    })
}

/// Which player's name the words start with. The longer name wins when one is a
/// prefix of the other.
fn match_player(words: &[String], names: &[(Side, Vec<String>); 2]) -> Option<(Side, usize)> {
    let mut best: Option<(Side, usize)> = None;
    for (side, name) in names {
        if name.is_empty() || !words.starts_with(name) {
            continue;
        }
        if best.map_or(true, |(_, len)| name.len() > len) {
            best = Some((*side, name.len()));
        }
    }
    best
}
