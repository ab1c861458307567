//! In-memory view of a persisted score table.
//!
//! The table is loaded once and never mutated, so a single `ScoreStore` can be
//! shared by reference between every clue-giver and guesser in a game.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CodenamesError, Result};
use crate::score_matrix::WORD_COLUMN;

#[derive(Debug, Clone)]
pub struct ScoreStore {
    rows: Vec<String>,
    columns: Vec<String>,
    row_index: HashMap<String, usize>,
    column_index: HashMap<String, usize>,
    /// Row-major `rows.len() * columns.len()` scores.
    values: Vec<f64>,
}

/// A vocabulary word ranked against a row word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbour {
    pub word: String,
    pub score: f64,
}

impl ScoreStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::from_reader(File::open(path)?)?;
        info!(
            path = %path.display(),
            rows = store.rows.len(),
            columns = store.columns.len(),
            "loaded score table"
        );
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        if headers.get(0) != Some(WORD_COLUMN) {
            return Err(CodenamesError::format(
                1,
                format!("first column must be '{WORD_COLUMN}'"),
            ));
        }
        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        let mut rows = Vec::new();
        let mut row_index: HashMap<String, usize> = HashMap::new();
        let mut values = Vec::new();
        let mut parsed = Vec::with_capacity(columns.len());
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            parsed.clear();
            for raw in record.iter().skip(1) {
                let v: f64 = raw
                    .parse()
                    .ok()
                    .filter(|v: &f64| v.is_finite())
                    .ok_or_else(|| CodenamesError::format(line, format!("invalid score '{raw}'")))?;
                parsed.push(v);
            }
            let word = record.get(0).unwrap_or_default();
            match row_index.get(word) {
                Some(&i) => {
                    warn!(word, line, "duplicate score row, keeping the later values");
                    let width = columns.len();
                    values[i * width..(i + 1) * width].copy_from_slice(&parsed);
                }
                None => {
                    row_index.insert(word.to_string(), rows.len());
                    rows.push(word.to_string());
                    values.extend_from_slice(&parsed);
                }
            }
        }

        Ok(Self {
            rows,
            columns,
            row_index,
            column_index,
            values,
        })
    }

    /// Row words in table order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Vocabulary words in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, row_word: &str) -> bool {
        self.row_index.contains_key(row_word)
    }

    pub fn column_position(&self, column_word: &str) -> Result<usize> {
        self.column_index
            .get(column_word)
            .copied()
            .ok_or_else(|| CodenamesError::Lookup(format!("'{column_word}' is not a vocabulary column")))
    }

    /// All scores of one row, indexed like `columns()`.
    pub fn row(&self, row_word: &str) -> Result<&[f64]> {
        let i = self
            .row_index
            .get(row_word)
            .ok_or_else(|| CodenamesError::Lookup(format!("'{row_word}' is not a score row")))?;
        Ok(self.row_at(*i))
    }

    pub(crate) fn row_at(&self, i: usize) -> &[f64] {
        let width = self.columns.len();
        &self.values[i * width..(i + 1) * width]
    }

    pub fn score(&self, row_word: &str, column_word: &str) -> Result<f64> {
        let col = self.column_position(column_word)?;
        Ok(self.row(row_word)?[col])
    }

    /// The `n` vocabulary words scoring highest against `row_word`.
    pub fn nearest(&self, row_word: &str, n: usize) -> Result<Vec<Neighbour>> {
        let row = self.row(row_word)?;
        let mut ranked: Vec<Neighbour> = self
            .columns
            .iter()
            .zip(row)
            .map(|(word, &score)| Neighbour {
                word: word.clone(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(n);
        Ok(ranked)
    }
}
