//! Data structures for a scored match: players, match state, commands.

mod command;
mod match_state;
mod player;

pub use command::Command;
pub use match_state::{MatchError, MatchState};
pub use player::{Player, Side};
