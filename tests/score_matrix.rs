use std::fs;
use std::path::Path;

use codenames::math::round4;
use codenames::{BuildConfig, CodenamesError, ScoreMatrixBuilder, ScoreStore};

// a=(1,0) b=(0,1) c=(1,1) e=(1,-1); "</s>" is filtered, "zz" is past the cutoff.
const CORPUS: &str = "\
6 2
</s> 0.5 0.5
a 1 0
b 0 1
c 1 1
e 1 -1
zz 3 4
";

fn config(dir: &Path, corpus: &str, vocabulary: &str, dictionary_size: usize) -> BuildConfig {
    let corpus_path = dir.join("corpus.vec");
    let vocab_path = dir.join("wordlist.txt");
    fs::write(&corpus_path, corpus).unwrap();
    fs::write(&vocab_path, vocabulary).unwrap();
    BuildConfig {
        corpus: corpus_path,
        vocabulary: vocab_path,
        output: dir.join("scores.csv"),
        distances: Some(dir.join("distances.csv")),
        dictionary_size,
        dimensions: 2,
        chunk_size: 2,
        show_progress: false,
        ..BuildConfig::default()
    }
}

fn manual_stats(column: &[f64]) -> (f64, f64) {
    let used: Vec<f64> = column.iter().copied().filter(|d| *d >= 0.01).collect();
    let n = used.len() as f64;
    let mean = used.iter().sum::<f64>() / n;
    let sq = used.iter().map(|d| d * d).sum::<f64>() / n;
    (mean, (sq - mean * mean).sqrt())
}

#[test]
fn three_word_vocabulary_matches_manual_computation() {
    let dir = tempfile::tempdir().unwrap();
    let report = ScoreMatrixBuilder::new(config(dir.path(), CORPUS, "a\nb\nc\n", 5))
        .run()
        .unwrap();
    assert_eq!(report.rows, 4);
    assert_eq!(report.skipped, 1);

    // Rows a, b, c, e against columns a, b, c.
    let distances = [
        [0.0, 1.0, 0.2929],
        [1.0, 0.0, 0.2929],
        [0.2929, 0.2929, 0.0],
        [0.2929, 1.7071, 1.0],
    ];
    let rows = ["a", "b", "c", "e"];
    let cols = ["a", "b", "c"];

    let store = ScoreStore::load(dir.path().join("scores.csv")).unwrap();
    assert_eq!(store.rows(), rows);
    assert_eq!(store.columns(), cols);
    assert!(!store.contains("zz"));

    for (j, col) in cols.iter().enumerate() {
        let column: Vec<f64> = distances.iter().map(|r| r[j]).collect();
        let (mean, sd) = manual_stats(&column);
        let summary = &report.columns[j];
        assert_eq!(summary.word, *col);
        assert_eq!(summary.count, 3);
        assert!((summary.mean - mean).abs() < 1e-12);
        assert!((summary.std_dev - sd).abs() < 1e-12);
        for (i, row) in rows.iter().enumerate() {
            let expected = round4(-(distances[i][j] - mean) / sd);
            let got = store.score(row, col).unwrap();
            assert!(
                (got - expected).abs() < 1e-9,
                "score({row},{col}) = {got}, expected {expected}"
            );
        }
    }

    // Closest words score highest within their column.
    assert!(store.score("a", "a").unwrap() > store.score("b", "a").unwrap());
    assert!(dir.path().join("distances.csv").exists());
}

#[test]
fn column_without_spread_is_degenerate() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = "2 2\na 1 0\nbig 2 0\n";
    let err = ScoreMatrixBuilder::new(config(dir.path(), corpus, "a\n", 10))
        .run()
        .unwrap_err();
    match err {
        CodenamesError::DegenerateNormalization { word, .. } => assert_eq!(word, "a"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("scores.csv").exists());
}

#[test]
fn missing_vocabulary_word_is_lookup_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScoreMatrixBuilder::new(config(dir.path(), CORPUS, "a\nmoon\n", 5))
        .run()
        .unwrap_err();
    match err {
        CodenamesError::Lookup(msg) => assert!(msg.contains("moon")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_corpus_line_names_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = "2 2\na 1 0\nb 1\n";
    let err = ScoreMatrixBuilder::new(config(dir.path(), corpus, "b\n", 5))
        .run()
        .unwrap_err();
    assert!(matches!(err, CodenamesError::Format { line: 3, .. }));
}

#[test]
fn zero_vector_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = "2 2\na 1 0\nnil 0 0\n";
    let err = ScoreMatrixBuilder::new(config(dir.path(), corpus, "a\n", 5))
        .run()
        .unwrap_err();
    assert!(matches!(err, CodenamesError::Format { line: 3, .. }));
}

#[test]
fn passes_stop_reading_once_done() {
    let dir = tempfile::tempdir().unwrap();
    // The malformed last line lies past the cutoff and after every vocabulary word.
    let corpus = "5 2\na 1 0\nb 0 1\nc 1 1\ne 1 -1\nbad 1\n";
    let report = ScoreMatrixBuilder::new(config(dir.path(), corpus, "a\nb\nc\n", 4))
        .run()
        .unwrap();
    assert_eq!(report.rows, 4);
    let store = ScoreStore::load(dir.path().join("scores.csv")).unwrap();
    assert_eq!(store.rows(), ["a", "b", "c", "e"]);
}

#[test]
fn overflowing_component_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = "3 2\nb 0 1\na 1e39 0\nc 1 1\n";
    let err = ScoreMatrixBuilder::new(config(dir.path(), corpus, "a\nb\n", 5))
        .run()
        .unwrap_err();
    assert!(matches!(err, CodenamesError::Format { line: 3, .. }));
}
