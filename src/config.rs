use std::path::PathBuf;

/// Distances below this are treated as near-self matches during calibration.
pub const NEAR_DUPLICATE_THRESHOLD: f64 = 0.01;

/// Runtime configuration for the score matrix build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Embedding corpus in text format (header line, then `word v1 .. vD`).
    pub corpus: PathBuf,
    /// One vocabulary word per line.
    pub vocabulary: PathBuf,
    /// Destination of the normalized score table.
    pub output: PathBuf,
    /// Keep the intermediate distance table here instead of a temp file.
    pub distances: Option<PathBuf>,
    /// Number of leading corpus entries considered as clue rows.
    pub dictionary_size: usize,
    /// Vector dimensionality shared by every corpus line.
    pub dimensions: usize,
    pub near_duplicate_threshold: f64,
    /// Corpus entries whose distance rows are computed in one parallel batch.
    pub chunk_size: usize,
    pub show_progress: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("wiki.en.vec"),
            vocabulary: PathBuf::from("wordlist.txt"),
            output: PathBuf::from("scores.csv"),
            distances: None,
            dictionary_size: 10_000,
            dimensions: 300,
            near_duplicate_threshold: NEAR_DUPLICATE_THRESHOLD,
            chunk_size: 1024,
            show_progress: true,
        }
    }
}
