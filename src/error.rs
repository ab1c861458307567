use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodenamesError {
    /// Malformed corpus, vocabulary or score table line.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Word absent from the score table or vocabulary.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// A calibration column has no spread to normalise against.
    #[error("degenerate normalization for column '{word}' (standard deviation {std_dev})")]
    DegenerateNormalization { word: String, std_dev: f64 },

    /// Two compared vectors have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Board partitions overlap or cannot be dealt.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// Every candidate clue word was rejected for the current board.
    #[error("no admissible clue word for this board")]
    NoClue,

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Propagated CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Temporary output could not be moved into place.
    #[error("persist error: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, CodenamesError>;

impl CodenamesError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        CodenamesError::Format {
            line,
            message: message.into(),
        }
    }
}
