//! Score and serve state machine: applying commands and rotating the serve.

use crate::models::{Command, MatchError, MatchState};

/// Apply one command to the match.
///
/// A decrement on a side that has no points is rejected with
/// [`MatchError::NegativeScore`] and nothing changes, not even the server.
/// After every accepted command the server is flipped when the total number
/// of points is even (0 included, so every reset flips it).
pub fn apply_command(state: &mut MatchState, command: Command) -> Result<(), MatchError> {
    match command {
        Command::Increment(side) => state.player_mut(side).add_point(),
        Command::Decrement(side) => {
            if !state.player_mut(side).remove_point() {
                return Err(MatchError::NegativeScore { side });
            }
        }
        Command::Reset => {
            state.player_one.score = 0;
            state.player_two.score = 0;
        }
    }

    // Flip, not "set from parity": two even totals in a row land back on the same server.
    if state.total_points() % 2 == 0 {
        toggle_server(state);
    }
    log::debug!(
        "Applied {}: {}:{} (server {})",
        command,
        state.player_one.score,
        state.player_two.score,
        state.server
    );
    Ok(())
}

/// Hand the serve to the other player, regardless of the score.
pub fn toggle_server(state: &mut MatchState) {
    state.server = state.server.opposite();
}
