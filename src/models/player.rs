//! Player: a named side of the match and its running score.

use crate::logic::normalize_words;
use serde::{Deserialize, Serialize};

/// Which side of the match a player is on. Also used for the serving indicator.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::One => write!(f, "one"),
            Side::Two => write!(f, "two"),
        }
    }
}

/// A player in the match. The name is fixed at creation; only the score moves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Player {
    name: String,
    pub score: u32,
}

impl Player {
    /// Create a player with a score of zero. The name is trimmed and must contain at
    /// least one spoken word (letters or digits), otherwise voice commands could not name it.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let name = name.trim();
        if normalize_words(name).is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            score: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name as the voice interpreter hears it: lowercase words, no punctuation.
    pub fn spoken_name(&self) -> Vec<String> {
        normalize_words(&self.name)
    }

    /// Add one point.
    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Take one point away. Returns false (and leaves the score alone) when already at zero.
    pub fn remove_point(&mut self) -> bool {
        match self.score.checked_sub(1) {
            Some(score) => {
                self.score = score;
                true
            }
            None => false,
        }
    }
}
