//! Command: the value passed from the voice interpreter (or a button) to the scoring logic.

use crate::models::player::Side;
use serde::{Deserialize, Serialize};

/// A single request to change the score. Carries no state of its own.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "side", rename_all = "snake_case")]
pub enum Command {
    Increment(Side),
    Decrement(Side),
    Reset,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Increment(side) => write!(f, "increment player {}", side),
            Command::Decrement(side) => write!(f, "decrement player {}", side),
            Command::Reset => write!(f, "reset"),
        }
    }
}
