//! Integration tests for voice command interpretation and transcript handling.

use scorekeeper_web::{
    handle_transcript, interpret, Command, Intent, Interpretation, MatchError, MatchState, Phrase,
    Side, Vocabulary, VocabularyError,
};

fn new_match() -> MatchState {
    MatchState::new("Anna", "Bartek").unwrap()
}

fn recognized(command: Command) -> Interpretation {
    Interpretation {
        command: Some(command),
        consumed: true,
    }
}

#[test]
fn unrecognized_text_is_not_consumed() {
    let m = new_match();
    let none = Interpretation {
        command: None,
        consumed: false,
    };
    assert_eq!(interpret("", &m), none);
    assert_eq!(interpret("   ", &m), none);
    assert_eq!(interpret("nice shot", &m), none);
    assert_eq!(interpret("point", &m), none);
    assert_eq!(interpret("point Cezary", &m), none);
    assert_eq!(interpret("Anna point", &m), none);
}

#[test]
fn interpret_matches_the_default_vocabulary_on_every_call() {
    let vocabulary = Vocabulary::default();
    let first = new_match();
    let second = MatchState::new("Cezary", "Dorota").unwrap();
    for (transcript, m) in [("point anna", &first), ("minus dorota", &second), ("reset", &first)] {
        assert_eq!(interpret(transcript, m), vocabulary.interpret(transcript, m));
    }
}

#[test]
fn recognizes_default_phrases() {
    let m = new_match();
    assert_eq!(interpret("point anna", &m), recognized(Command::Increment(Side::One)));
    assert_eq!(interpret("point bartek", &m), recognized(Command::Increment(Side::Two)));
    assert_eq!(interpret("minus anna", &m), recognized(Command::Decrement(Side::One)));
    assert_eq!(interpret("minus bartek", &m), recognized(Command::Decrement(Side::Two)));
    assert_eq!(interpret("reset", &m), recognized(Command::Reset));
}

#[test]
fn ignores_case_whitespace_and_punctuation() {
    let m = new_match();
    assert_eq!(interpret("  POINT   Anna  ", &m), recognized(Command::Increment(Side::One)));
    assert_eq!(interpret("Minus, BARTEK.", &m), recognized(Command::Decrement(Side::Two)));
    assert_eq!(interpret("\tReset!\n", &m), recognized(Command::Reset));
}

#[test]
fn finds_phrase_inside_surrounding_speech() {
    let m = new_match();
    assert_eq!(
        interpret("okay that was out so point bartek I think", &m),
        recognized(Command::Increment(Side::Two))
    );
}

#[test]
fn names_come_from_the_live_match() {
    let m = MatchState::new("Zoë", "Mary Jane").unwrap();
    assert_eq!(interpret("point ZOË", &m), recognized(Command::Increment(Side::One)));
    assert_eq!(interpret("minus mary jane", &m), recognized(Command::Decrement(Side::Two)));
    assert_eq!(interpret("point anna", &m).command, None);
    // A partial multi-word name is not enough.
    assert_eq!(interpret("point mary", &m).command, None);
}

#[test]
fn most_recent_phrase_wins() {
    let m = new_match();
    assert_eq!(
        interpret("point anna point bartek", &m),
        recognized(Command::Increment(Side::Two))
    );
    assert_eq!(
        interpret("point bartek reset minus anna", &m),
        recognized(Command::Decrement(Side::One))
    );
    assert_eq!(interpret("minus anna reset", &m), recognized(Command::Reset));
}

#[test]
fn longer_name_wins_when_names_share_a_prefix() {
    let m = MatchState::new("Ann", "Ann Marie").unwrap();
    assert_eq!(interpret("point ann marie", &m), recognized(Command::Increment(Side::Two)));
    assert_eq!(interpret("point ann", &m), recognized(Command::Increment(Side::One)));
}

#[test]
fn decrement_is_emitted_even_at_zero() {
    let m = new_match();
    assert_eq!(interpret("minus anna", &m), recognized(Command::Decrement(Side::One)));
}

#[test]
fn interpret_does_not_touch_the_match() {
    let m = new_match();
    let before = m.clone();
    interpret("point anna", &m);
    assert_eq!(m, before);
}

#[test]
fn custom_vocabulary_replaces_default_phrases() {
    let vocabulary = Vocabulary::new(vec![
        Phrase::parse("punkt dla {player}", Intent::Increment).unwrap(),
        Phrase::parse("zeruj", Intent::Reset).unwrap(),
    ])
    .unwrap();
    let m = new_match();
    assert_eq!(
        vocabulary.interpret("Punkt dla Bartek", &m),
        recognized(Command::Increment(Side::Two))
    );
    assert_eq!(vocabulary.interpret("zeruj", &m), recognized(Command::Reset));
    assert_eq!(vocabulary.interpret("reset", &m).command, None);
}

#[test]
fn empty_vocabulary_is_rejected() {
    assert!(matches!(Vocabulary::new(Vec::new()), Err(VocabularyError::NoPhrases)));
}

#[test]
fn vocabulary_loads_from_csv() {
    let csv = "phrase,intent\n point for {player} , increment\nminus {player},decrement\nclear,reset\n";
    let vocabulary = Vocabulary::from_csv_reader(csv.as_bytes()).unwrap();
    let texts: Vec<&str> = vocabulary.phrases().iter().map(|p| p.text()).collect();
    assert_eq!(texts, vec!["point for {player}", "minus {player}", "clear"]);

    let m = new_match();
    assert_eq!(
        vocabulary.interpret("point for anna", &m),
        recognized(Command::Increment(Side::One))
    );
    assert_eq!(vocabulary.interpret("clear", &m), recognized(Command::Reset));
}

#[test]
fn vocabulary_csv_errors() {
    let unknown_intent = "phrase,intent\npoint {player},double\n";
    assert!(matches!(
        Vocabulary::from_csv_reader(unknown_intent.as_bytes()),
        Err(VocabularyError::Csv(_))
    ));

    let missing_player = "phrase,intent\npoint,increment\n";
    assert!(matches!(
        Vocabulary::from_csv_reader(missing_player.as_bytes()),
        Err(VocabularyError::PlayerPlaceholder { intent: Intent::Increment, .. })
    ));

    let header_only = "phrase,intent\n";
    assert!(matches!(
        Vocabulary::from_csv_reader(header_only.as_bytes()),
        Err(VocabularyError::NoPhrases)
    ));
}

#[test]
fn shipped_vocabulary_files_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("vocabulary");
    let m = new_match();

    let pl = Vocabulary::from_csv_path(dir.join("pl.csv")).unwrap();
    assert_eq!(pl.interpret("punkt Anna", &m), recognized(Command::Increment(Side::One)));
    assert_eq!(pl.interpret("minus Bartek", &m), recognized(Command::Decrement(Side::Two)));
    assert_eq!(pl.interpret("zeruj", &m), recognized(Command::Reset));

    let en = Vocabulary::from_csv_path(dir.join("en.csv")).unwrap();
    assert_eq!(en.interpret("point for bartek", &m), recognized(Command::Increment(Side::Two)));
}

#[test]
fn handle_transcript_applies_recognized_command() {
    let mut m = new_match();
    let outcome = handle_transcript(&mut m, &Vocabulary::default(), "Point Anna");
    assert_eq!(outcome.command, Some(Command::Increment(Side::One)));
    assert!(outcome.consumed);
    assert_eq!(outcome.rejected, None);
    assert_eq!(m.scores(), (1, 0));
}

#[test]
fn handle_transcript_leaves_match_alone_for_unrecognized_text() {
    let mut m = new_match();
    let before = m.clone();
    let outcome = handle_transcript(&mut m, &Vocabulary::default(), "what a rally");
    assert_eq!(outcome.command, None);
    assert!(!outcome.consumed);
    assert_eq!(m, before);
}

#[test]
fn handle_transcript_catches_minus_at_zero_and_still_consumes() {
    let mut m = new_match();
    let before = m.clone();
    let outcome = handle_transcript(&mut m, &Vocabulary::default(), "minus bartek");
    assert_eq!(outcome.command, Some(Command::Decrement(Side::Two)));
    assert!(outcome.consumed);
    assert_eq!(outcome.rejected, Some(MatchError::NegativeScore { side: Side::Two }));
    assert_eq!(m, before);
}

#[test]
fn growing_transcript_is_applied_once_when_cleared_after_consumption() {
    let mut m = new_match();
    let vocabulary = Vocabulary::default();
    let mut buffer = String::new();
    for chunk in ["point", " anna", " and then", " point bartek"] {
        buffer.push_str(chunk);
        if handle_transcript(&mut m, &vocabulary, &buffer).consumed {
            buffer.clear();
        }
    }
    assert_eq!(m.scores(), (1, 1));
    assert_eq!(m.server, Side::Two);
}

#[test]
fn clearing_only_the_sent_text_keeps_speech_that_arrived_later() {
    let mut m = new_match();
    let vocabulary = Vocabulary::default();
    let mut buffer = String::from(" point anna");

    let sent = buffer.clone();
    // More speech arrives while the first snapshot is being handled.
    buffer.push_str(" point bartek");
    let outcome = handle_transcript(&mut m, &vocabulary, &sent);
    assert!(outcome.consumed);
    buffer = buffer[sent.len()..].to_string();
    assert_eq!(m.scores(), (1, 0));

    let outcome = handle_transcript(&mut m, &vocabulary, &buffer);
    assert_eq!(outcome.command, Some(Command::Increment(Side::Two)));
    assert_eq!(m.scores(), (1, 1));

    // Nothing new was said, so nothing is sent again and the score holds.
    buffer.clear();
    let outcome = handle_transcript(&mut m, &vocabulary, &buffer);
    assert!(!outcome.consumed);
    assert_eq!(m.scores(), (1, 1));
}
