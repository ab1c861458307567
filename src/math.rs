//! Vector math shared by the score matrix build.

use crate::error::{CodenamesError, Result};

/// Euclidean length of a vector.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt()
}

/// Cosine distance `1 - cos(a, b)` in `[0, 2]`.
///
/// Both vectors must have nonzero magnitude; callers validate that up front so
/// they can name the offending corpus line.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(CodenamesError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64) * (y as f64))
        .sum();
    let similarity = dot / (l2_norm(a) * l2_norm(b));
    Ok((1.0 - similarity).clamp(0.0, 2.0))
}

/// Round to four decimal places, the precision of every persisted table.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
