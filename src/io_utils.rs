use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        UnexpectedEof => "File appears truncated or corrupted.",
        InvalidData => "Corpus, vocabulary and score files must be UTF-8 text.",
        WriteZero => "Disk may be full. Free up space and try again.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn codenames_cli_error(context: &str, err: crate::CodenamesError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &crate::CodenamesError) -> String {
    use crate::CodenamesError::*;
    match err {
        Format { line, message } => {
            format!("line {line}: {message}. Verify the file is intact and uses the expected layout.")
        }
        Lookup(msg) => format!("{msg}. The board vocabulary must be covered by the score table."),
        DegenerateNormalization { word, .. } => format!(
            "column '{word}' has no spread. Increase --dictionary-size or check the corpus vectors."
        ),
        DimensionMismatch { expected, got } => {
            format!("expected {expected} components, got {got}. Check --dimensions.")
        }
        InvalidBoard(msg) => format!("{msg}. Check the vocabulary file."),
        NoClue => "no clue word survives the board filter. Use a larger score table.".to_string(),
        Io(io) => format!("{io}"),
        Csv(e) => format!("{e}. The table may be truncated; regenerate it."),
        Persist(e) => format!("{e}. Could not move the finished table into place."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodenamesError;

    #[test]
    fn not_found_suggests_checking_path() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let msg = format_io_error("reading", Path::new("words.txt"), &err);
        assert!(msg.contains("'words.txt'"));
        assert!(msg.contains("Check that the file exists"));
    }

    #[test]
    fn invalid_data_mentions_utf8() {
        let err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let msg = format_io_error("reading corpus", Path::new("wiki.en.vec"), &err);
        assert!(msg.starts_with("Error reading corpus 'wiki.en.vec'"));
        assert!(msg.ends_with("must be UTF-8 text."));
    }

    #[test]
    fn hint_names_degenerate_column() {
        let err = CodenamesError::DegenerateNormalization {
            word: "cat".into(),
            std_dev: 0.0,
        };
        let cli = codenames_cli_error("normalizing", err);
        assert!(cli.to_string().starts_with("normalizing: column 'cat'"));
        assert!(std::error::Error::source(&cli).is_some());
    }
}
