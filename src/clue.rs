//! Clue-giver decision engine.
//!
//! Every score-table row is a candidate clue. A candidate is valued by
//! imagining the guesser picking board words in descending score order, each
//! pick drawn from a softmax over `exp(score)` of the words still unguessed.
//! The clue is extended one word at a time while the top remaining word is
//! ours and the expected value of the next pick stays non-negative.

use serde::Serialize;
use tracing::debug;

use crate::board::BoardView;
use crate::error::{CodenamesError, Result};
use crate::score_store::ScoreStore;

pub const OWN_VALUE: f64 = 1.0;
pub const OPPONENT_VALUE: f64 = -1.0;
pub const NEUTRAL_VALUE: f64 = 0.0;
pub const ASSASSIN_VALUE: f64 = -5.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub word: String,
    pub count: usize,
}

/// Expected value of a candidate clue and the count it supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClueValue {
    pub expected_value: f64,
    pub count: usize,
}

/// A board word as seen under one candidate clue.
#[derive(Debug, Clone, Copy)]
pub struct ScoredWord {
    pub score: f64,
    pub value: f64,
    pub own: bool,
}

/// Board words resolved to score-table columns once per decision.
struct Target<'v> {
    word: &'v str,
    column: usize,
    value: f64,
    own: bool,
}

pub struct ClueSelector<'a> {
    store: &'a ScoreStore,
}

impl<'a> ClueSelector<'a> {
    pub fn new(store: &'a ScoreStore) -> Self {
        Self { store }
    }

    /// Pick the clue with the greatest expected value; earlier rows win ties.
    pub fn give_clue(&self, view: &BoardView) -> Result<Clue> {
        let targets = self.targets(view)?;
        let mut scored = Vec::with_capacity(targets.len());
        let mut best: Option<(usize, ClueValue)> = None;

        for (i, candidate) in self.store.rows().iter().enumerate() {
            if targets.iter().any(|t| overlaps(candidate, t.word)) {
                continue;
            }
            let row = self.store.row_at(i);
            scored.clear();
            scored.extend(targets.iter().map(|t| ScoredWord {
                score: row[t.column],
                value: t.value,
                own: t.own,
            }));
            let value = evaluate(&mut scored);
            if best.map_or(true, |(_, b)| value.expected_value > b.expected_value) {
                best = Some((i, value));
            }
        }

        let (i, value) = best.ok_or(CodenamesError::NoClue)?;
        let clue = Clue {
            word: self.store.rows()[i].clone(),
            count: value.count,
        };
        debug!(clue = %clue.word, count = clue.count, ev = value.expected_value, "selected clue");
        Ok(clue)
    }

    /// Value a specific clue word against the board.
    pub fn evaluate_clue(&self, word: &str, view: &BoardView) -> Result<ClueValue> {
        let row = self.store.row(word)?;
        let mut scored: Vec<ScoredWord> = self
            .targets(view)?
            .iter()
            .map(|t| ScoredWord {
                score: row[t.column],
                value: t.value,
                own: t.own,
            })
            .collect();
        Ok(evaluate(&mut scored))
    }

    fn targets<'v>(&self, view: &'v BoardView) -> Result<Vec<Target<'v>>> {
        let groups = [
            (&view.own, OWN_VALUE, true),
            (&view.opponent, OPPONENT_VALUE, false),
            (&view.neutral, NEUTRAL_VALUE, false),
            (&view.assassin, ASSASSIN_VALUE, false),
        ];
        let mut targets = Vec::new();
        for (words, value, own) in groups {
            for word in words {
                targets.push(Target {
                    word,
                    column: self.store.column_position(word)?,
                    value,
                    own,
                });
            }
        }
        Ok(targets)
    }
}

/// Case-sensitive containment either way round.
pub fn overlaps(clue: &str, board_word: &str) -> bool {
    clue.contains(board_word) || board_word.contains(clue)
}

/// Walk the board in descending score order and accumulate expected value.
///
/// Sorting is stable, so equal scores keep own, opponent, neutral, assassin
/// order.
pub fn evaluate(words: &mut [ScoredWord]) -> ClueValue {
    words.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut expected_value = 0.0;
    let mut count = 0;
    let mut joint = 1.0;
    let mut start = 0;
    while start < words.len() && words[start].own {
        let remaining = &words[start..];
        let total: f64 = remaining.iter().map(|w| w.score.exp()).sum();
        let mut step_value = 0.0;
        let mut correct = 0.0;
        for w in remaining {
            let p = w.score.exp() / total;
            step_value += p * w.value;
            if w.own {
                correct += p;
            }
        }
        let guess_value = joint * step_value;
        if guess_value < 0.0 {
            break;
        }
        expected_value += guess_value;
        count += 1;
        joint *= correct;
        start += 1;
    }

    ClueValue {
        expected_value,
        count,
    }
}
