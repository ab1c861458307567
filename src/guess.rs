//! Guesser decision engine: pick the unguessed board word closest to the clue.

use crate::board::Board;
use crate::error::Result;
use crate::score_store::ScoreStore;

pub struct GuessRanker<'a> {
    store: &'a ScoreStore,
}

impl<'a> GuessRanker<'a> {
    pub fn new(store: &'a ScoreStore) -> Self {
        Self { store }
    }

    /// Best guess for the `guess_index`-th pick (1-based) of this turn, or
    /// `None` to pass once the index exceeds `clue_count + 1`.
    pub fn guess(
        &self,
        board: &Board,
        clue_word: &str,
        clue_count: usize,
        guess_index: usize,
    ) -> Result<Option<String>> {
        if guess_index > clue_count + 1 {
            return Ok(None);
        }
        let ranked = self.rank(clue_word, board.unguessed())?;
        Ok(ranked.into_iter().next().map(|(word, _)| word.to_string()))
    }

    /// Candidates ordered by score under `clue_word`, highest first; ties keep
    /// input order.
    pub fn rank<'w, I>(&self, clue_word: &str, candidates: I) -> Result<Vec<(&'w str, f64)>>
    where
        I: IntoIterator<Item = &'w str>,
    {
        let row = self.store.row(clue_word)?;
        let mut ranked = candidates
            .into_iter()
            .map(|w| Ok((w, row[self.store.column_position(w)?])))
            .collect::<Result<Vec<_>>>()?;
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(ranked)
    }
}
