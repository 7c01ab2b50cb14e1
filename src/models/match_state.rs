//! MatchState and MatchError.

use crate::models::player::{Player, Side};
use serde::Serialize;

/// Errors that can occur while setting up or scoring a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Invalid operation: the decrement would take this side's score below zero.
    NegativeScore { side: Side },
    /// Player names must contain at least one word.
    EmptyPlayerName,
    /// Both players would sound the same to the voice interpreter (case and punctuation ignored).
    DuplicatePlayerName,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::NegativeScore { side } => {
                write!(f, "Score of player {} cannot go below zero", side)
            }
            MatchError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            MatchError::DuplicatePlayerName => write!(f, "Players must have different names"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Both players and who is currently serving.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchState {
    pub player_one: Player,
    pub player_two: Player,
    /// Derived from score parity after each accepted command, but also flipped by hand.
    pub server: Side,
}

impl MatchState {
    /// New match at 0:0 with player one serving.
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>) -> Result<Self, MatchError> {
        let player_one = Player::new(player_one).ok_or(MatchError::EmptyPlayerName)?;
        let player_two = Player::new(player_two).ok_or(MatchError::EmptyPlayerName)?;
        if player_one.spoken_name() == player_two.spoken_name() {
            return Err(MatchError::DuplicatePlayerName);
        }
        Ok(Self {
            player_one,
            player_two,
            server: Side::One,
        })
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::One => &self.player_one,
            Side::Two => &self.player_two,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::One => &mut self.player_one,
            Side::Two => &mut self.player_two,
        }
    }

    /// `(player one score, player two score)`.
    pub fn scores(&self) -> (u32, u32) {
        (self.player_one.score, self.player_two.score)
    }

    /// Sum of both scores; its parity drives the serve rotation.
    pub fn total_points(&self) -> u32 {
        self.player_one.score + self.player_two.score
    }
}
