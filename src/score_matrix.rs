//! Batch build of the normalized score table.
//!
//! The build runs as strictly ordered stages, each a full pass over its input:
//!
//! 1. vocabulary vectors are collected from the corpus (stops once all found);
//! 2. the first `dictionary_size` corpus entries are compared against every
//!    vocabulary vector and written as a distance table;
//! 3. the distance table is read back to derive per-column statistics;
//! 4. the distance table is read again and every cell is normalised.
//!
//! Stage 2 is parallel within a chunk of corpus entries; every stage finishes
//! before the next begins. Output goes to a temporary file that is renamed into
//! place only after the last stage succeeds.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::corpus::{is_word_token, read_vocabulary, CorpusReader, WordVector};
use crate::error::{CodenamesError, Result};
use crate::math::{cosine_distance, l2_norm, round4};
use crate::stats::{ColumnStats, ColumnSummary};

/// Name of the row-key column in distance and score tables.
pub const WORD_COLUMN: &str = "__word";

/// Outcome of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Rows written to the score table.
    pub rows: usize,
    /// Corpus entries inside the cutoff rejected by the word filter.
    pub skipped: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Counts from the distance stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSummary {
    pub rows: usize,
    pub skipped: usize,
}

pub struct ScoreMatrixBuilder {
    config: BuildConfig,
}

impl ScoreMatrixBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run every stage and atomically publish the score table.
    pub fn run(&self) -> Result<BuildReport> {
        let cfg = &self.config;
        let vocabulary = read_vocabulary(&cfg.vocabulary)?;
        if vocabulary.is_empty() {
            return Err(CodenamesError::Lookup(format!(
                "vocabulary '{}' is empty",
                cfg.vocabulary.display()
            )));
        }
        info!(words = vocabulary.len(), "loading vocabulary vectors");
        let spinner = self.spinner("pass 1: vocabulary vectors");
        let corpus = CorpusReader::open(&cfg.corpus, cfg.dimensions)?.inspect(|_| spinner.inc(1));
        let vectors = collect_vocabulary_vectors(corpus, &vocabulary)?;
        spinner.finish_and_clear();

        info!(dictionary_size = cfg.dictionary_size, "computing distances");
        let distances_path = cfg.distances.as_deref().unwrap_or(&cfg.output);
        let mut distances = temp_file_beside(distances_path)?;
        let bar = self.bar("pass 2: distances", cfg.dictionary_size as u64);
        let summary = {
            let corpus = CorpusReader::open(&cfg.corpus, cfg.dimensions)?.inspect(|_| bar.inc(1));
            let mut wtr = csv::Writer::from_writer(distances.as_file_mut());
            let summary = write_distances(
                corpus,
                &vocabulary,
                &vectors,
                cfg.dictionary_size,
                cfg.chunk_size,
                &mut wtr,
            )?;
            wtr.flush()?;
            summary
        };
        bar.finish_and_clear();
        info!(rows = summary.rows, skipped = summary.skipped, "distance table written");

        // Keep the temp handle alive until normalisation has read it.
        let (_distances_guard, distances_at) = match &cfg.distances {
            Some(path) => {
                distances.persist(path)?;
                (None, path.clone())
            }
            None => {
                let at = distances.path().to_path_buf();
                (Some(distances), at)
            }
        };

        info!("calibrating columns");
        let columns = calibrate(
            csv::Reader::from_path(&distances_at)?,
            &vocabulary,
            cfg.near_duplicate_threshold,
        )?;

        info!(output = %cfg.output.display(), "normalizing scores");
        let mut scores = temp_file_beside(&cfg.output)?;
        let rows = {
            let mut wtr = csv::Writer::from_writer(scores.as_file_mut());
            let rows = normalize(csv::Reader::from_path(&distances_at)?, &columns, &mut wtr)?;
            wtr.flush()?;
            rows
        };
        scores.persist(&cfg.output)?;
        info!(rows, "score table published");

        Ok(BuildReport {
            rows,
            skipped: summary.skipped,
            columns,
        })
    }

    fn spinner(&self, msg: &'static str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg} {pos} lines")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg);
        pb
    }

    fn bar(&self, msg: &'static str, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(msg);
        pb
    }
}

fn temp_file_beside(path: &Path) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(NamedTempFile::new_in(dir)?)
}

fn ensure_nonzero(entry: &WordVector) -> Result<()> {
    if l2_norm(&entry.components) == 0.0 {
        return Err(CodenamesError::format(
            entry.line,
            format!("zero-magnitude vector for '{}'", entry.word),
        ));
    }
    Ok(())
}

/// Stage 1: find the vector of every vocabulary word, in vocabulary order.
///
/// Stops reading as soon as the last vocabulary word has been seen.
pub fn collect_vocabulary_vectors<I>(corpus: I, vocabulary: &[String]) -> Result<Vec<Vec<f32>>>
where
    I: Iterator<Item = Result<WordVector>>,
{
    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, w)| (w.as_str(), i))
        .collect();
    let mut found: Vec<Option<Vec<f32>>> = vec![None; vocabulary.len()];
    let mut remaining = vocabulary.len();
    if remaining == 0 {
        return Ok(Vec::new());
    }
    for entry in corpus {
        let entry = entry?;
        if let Some(&i) = index.get(entry.word.as_str()) {
            if found[i].is_none() {
                ensure_nonzero(&entry)?;
                debug!(word = %entry.word, line = entry.line, "vocabulary vector");
                found[i] = Some(entry.components);
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
            }
        }
    }
    if remaining > 0 {
        let missing: Vec<&str> = vocabulary
            .iter()
            .zip(&found)
            .filter(|(_, v)| v.is_none())
            .map(|(w, _)| w.as_str())
            .collect();
        return Err(CodenamesError::Lookup(format!(
            "vocabulary words missing from corpus: {}",
            missing.join(", ")
        )));
    }
    Ok(found.into_iter().flatten().collect())
}

fn distance_row(entry: &WordVector, vectors: &[Vec<f32>]) -> Result<Vec<f64>> {
    ensure_nonzero(entry)?;
    vectors
        .iter()
        .map(|v| cosine_distance(v, &entry.components).map(round4))
        .collect()
}

fn write_header<W: Write>(wtr: &mut csv::Writer<W>, vocabulary: &[String]) -> Result<()> {
    wtr.write_record(std::iter::once(WORD_COLUMN).chain(vocabulary.iter().map(String::as_str)))?;
    Ok(())
}

fn write_row<W: Write>(wtr: &mut csv::Writer<W>, word: &str, values: &[f64]) -> Result<()> {
    wtr.write_field(word)?;
    for v in values {
        wtr.write_field(v.to_string())?;
    }
    wtr.write_record(None::<&[u8]>)?;
    Ok(())
}

/// Stage 2: emit one distance row per retained corpus entry.
///
/// Only the first `dictionary_size` corpus entries are considered; entries
/// that are not plain word tokens still count toward that cutoff. Memory is
/// bounded by one chunk of rows.
pub fn write_distances<I, W>(
    corpus: I,
    vocabulary: &[String],
    vectors: &[Vec<f32>],
    dictionary_size: usize,
    chunk_size: usize,
    wtr: &mut csv::Writer<W>,
) -> Result<DistanceSummary>
where
    I: Iterator<Item = Result<WordVector>>,
    W: Write,
{
    write_header(wtr, vocabulary)?;
    let chunk_size = chunk_size.max(1);
    let mut summary = DistanceSummary { rows: 0, skipped: 0 };
    let mut chunk: Vec<WordVector> = Vec::with_capacity(chunk_size);

    let mut flush = |chunk: &mut Vec<WordVector>, summary: &mut DistanceSummary| -> Result<()> {
        let rows: Vec<Vec<f64>> = chunk
            .par_iter()
            .map(|entry| distance_row(entry, vectors))
            .collect::<Result<_>>()?;
        for (entry, row) in chunk.iter().zip(&rows) {
            write_row(wtr, &entry.word, row)?;
        }
        summary.rows += chunk.len();
        chunk.clear();
        Ok(())
    };

    for entry in corpus.take(dictionary_size) {
        let entry = entry?;
        if !is_word_token(&entry.word) {
            summary.skipped += 1;
            continue;
        }
        chunk.push(entry);
        if chunk.len() >= chunk_size {
            flush(&mut chunk, &mut summary)?;
        }
    }
    flush(&mut chunk, &mut summary)?;
    Ok(summary)
}

fn check_header<R: Read>(rdr: &mut csv::Reader<R>, vocabulary: &[String]) -> Result<()> {
    let headers = rdr.headers()?;
    let matches = headers.len() == vocabulary.len() + 1
        && headers.get(0) == Some(WORD_COLUMN)
        && headers.iter().skip(1).zip(vocabulary).all(|(h, w)| h == w);
    if !matches {
        return Err(CodenamesError::format(
            1,
            "distance table header does not match the vocabulary",
        ));
    }
    Ok(())
}

fn parse_cell(record: &csv::StringRecord, idx: usize) -> Result<f64> {
    let line = record.position().map_or(0, |p| p.line() as usize);
    let raw = record.get(idx).unwrap_or_default();
    raw.parse()
        .map_err(|_| CodenamesError::format(line, format!("invalid number '{raw}' in column {idx}")))
}

/// Stage 3: per-column mean and standard deviation over the distance table.
pub fn calibrate<R: Read>(
    mut rdr: csv::Reader<R>,
    vocabulary: &[String],
    threshold: f64,
) -> Result<Vec<ColumnSummary>> {
    check_header(&mut rdr, vocabulary)?;
    let mut stats = vec![ColumnStats::new(); vocabulary.len()];
    for record in rdr.records() {
        let record = record?;
        for (i, col) in stats.iter_mut().enumerate() {
            col.observe(parse_cell(&record, i + 1)?, threshold);
        }
    }
    stats
        .iter()
        .zip(vocabulary)
        .map(|(s, word)| s.finish(word))
        .collect()
}

/// Stage 4: rewrite every distance as a calibrated score rounded to four
/// decimals. Returns the number of rows written.
pub fn normalize<R: Read, W: Write>(
    mut rdr: csv::Reader<R>,
    columns: &[ColumnSummary],
    wtr: &mut csv::Writer<W>,
) -> Result<usize> {
    let vocabulary: Vec<String> = columns.iter().map(|c| c.word.clone()).collect();
    check_header(&mut rdr, &vocabulary)?;
    write_header(wtr, &vocabulary)?;
    let mut rows = 0;
    let mut scores = Vec::with_capacity(columns.len());
    for record in rdr.records() {
        let record = record?;
        scores.clear();
        for (i, col) in columns.iter().enumerate() {
            scores.push(round4(col.normalize(parse_cell(&record, i + 1)?)));
        }
        write_row(wtr, record.get(0).unwrap_or_default(), &scores)?;
        rows += 1;
    }
    Ok(rows)
}
