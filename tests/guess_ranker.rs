use std::io::Cursor;

use codenames::{Board, CodenamesError, GuessRanker, ScoreStore};

fn store() -> ScoreStore {
    ScoreStore::from_reader(Cursor::new("__word,A,B,C\nclue,2.0,1.0,-0.5\nother,-1,0,3\n")).unwrap()
}

fn board() -> Board {
    Board::new(
        vec!["A".into()],
        vec!["B".into()],
        vec!["C".into()],
        vec![],
    )
    .unwrap()
}

#[test]
fn highest_score_wins() {
    let store = store();
    let ranker = GuessRanker::new(&store);
    assert_eq!(ranker.guess(&board(), "clue", 1, 1).unwrap(), Some("A".to_string()));
    assert_eq!(ranker.guess(&board(), "other", 1, 1).unwrap(), Some("C".to_string()));
}

#[test]
fn guessed_words_are_skipped() {
    let store = store();
    let mut b = board();
    b.mark_guessed("A").unwrap();
    let ranker = GuessRanker::new(&store);
    assert_eq!(ranker.guess(&b, "clue", 2, 2).unwrap(), Some("B".to_string()));
}

#[test]
fn bonus_guess_is_allowed_then_pass() {
    let store = store();
    let ranker = GuessRanker::new(&store);
    assert!(ranker.guess(&board(), "clue", 1, 2).unwrap().is_some());
    assert_eq!(ranker.guess(&board(), "clue", 1, 3).unwrap(), None);
    assert_eq!(ranker.guess(&board(), "clue", 0, 2).unwrap(), None);
}

#[test]
fn pass_does_not_look_at_the_board() {
    let store = store();
    let ranker = GuessRanker::new(&store);
    // Unknown clue word would fail if the board were consulted.
    assert_eq!(ranker.guess(&board(), "missing", 0, 5).unwrap(), None);
}

#[test]
fn unknown_clue_is_lookup_error() {
    let store = store();
    let ranker = GuessRanker::new(&store);
    let err = ranker.guess(&board(), "missing", 1, 1).unwrap_err();
    assert!(matches!(err, CodenamesError::Lookup(_)));
}

#[test]
fn rank_orders_descending() {
    let store = store();
    let ranker = GuessRanker::new(&store);
    let ranked = ranker.rank("clue", ["C", "A", "B"]).unwrap();
    let words: Vec<&str> = ranked.iter().map(|(w, _)| *w).collect();
    assert_eq!(words, ["A", "B", "C"]);
}
