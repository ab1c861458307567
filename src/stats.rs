//! Per-column calibration statistics for the score matrix.
//!
//! `ColumnStats` accumulates count, sum and sum of squares over the distances
//! of one vocabulary column; `finish` turns them into a mean and a population
//! standard deviation. The observed range is tracked as well, because a
//! constant column can leave a small positive variance after cancellation.

use serde::Serialize;

use crate::error::{CodenamesError, Result};

/// Columns whose spread, relative to the mean magnitude, falls below this
/// cannot be normalised.
pub const MIN_STD_DEV: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub count: u64,
    pub sum: f64,
    pub sum_sq: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

/// Finished statistics for one vocabulary column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub word: String,
    pub count: u64,
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a distance unless it is a near-duplicate match.
    pub fn observe(&mut self, distance: f64, threshold: f64) {
        if distance < threshold {
            return;
        }
        self.count += 1;
        self.sum += distance;
        self.sum_sq += distance * distance;
        self.min = self.min.min(distance);
        self.max = self.max.max(distance);
    }

    pub fn finish(&self, word: &str) -> Result<ColumnSummary> {
        if self.count == 0 {
            return Err(CodenamesError::DegenerateNormalization {
                word: word.to_string(),
                std_dev: 0.0,
            });
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        if self.min == self.max {
            return Err(CodenamesError::DegenerateNormalization {
                word: word.to_string(),
                std_dev: 0.0,
            });
        }
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        let std_dev = variance.sqrt();
        if !std_dev.is_finite() || std_dev <= MIN_STD_DEV * mean.abs().max(1.0) {
            return Err(CodenamesError::DegenerateNormalization {
                word: word.to_string(),
                std_dev,
            });
        }
        Ok(ColumnSummary {
            word: word.to_string(),
            count: self.count,
            mean,
            std_dev,
        })
    }
}

impl ColumnSummary {
    /// Sign-inverted z-score: closer than average scores positive.
    pub fn normalize(&self, distance: f64) -> f64 {
        -(distance - self.mean) / self.std_dev
    }
}
