//! Transcript handling: the event handler that runs each transcript change through
//! the interpreter and the scoring logic.

use crate::logic::scoring::apply_command;
use crate::logic::vocabulary::Vocabulary;
use crate::models::{Command, MatchError, MatchState};

/// What happened to one transcript snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TranscriptOutcome {
    /// Command recognized in the transcript, if any.
    pub command: Option<Command>,
    /// The capture side should clear its transcript.
    pub consumed: bool,
    /// Set when the recognized command was refused (e.g. "minus" at zero). The score is unchanged.
    pub rejected: Option<MatchError>,
}

/// Interpret `transcript` and apply the resulting command.
///
/// A refused command is caught here and reported in the outcome; the transcript is
/// still consumed so the same utterance is not tried again.
pub fn handle_transcript(
    state: &mut MatchState,
    vocabulary: &Vocabulary,
    transcript: &str,
) -> TranscriptOutcome {
    let interpretation = vocabulary.interpret(transcript, state);
    let rejected = match interpretation.command {
        Some(command) => match apply_command(state, command) {
            Ok(()) => None,
            Err(e) => {
                log::debug!("Ignoring voice command {}: {}", command, e);
                Some(e)
            }
        },
        None => None,
    };
    TranscriptOutcome {
        command: interpretation.command,
        consumed: interpretation.consumed,
        rejected,
    }
}
