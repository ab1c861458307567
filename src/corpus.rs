//! Streaming access to a text embedding corpus and the vocabulary file.
//!
//! The corpus starts with a header line (`<count> <dimensions>`) followed by
//! one `<word> <v1> .. <vD>` entry per line. Lines are split from the right so
//! that words containing spaces survive intact.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{CodenamesError, Result};

/// One corpus entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVector {
    pub word: String,
    pub components: Vec<f32>,
    /// 1-based line number in the corpus file, for diagnostics.
    pub line: usize,
}

/// Lazily parses `(word, vector)` pairs after the header line.
///
/// Restart by opening the file again; the reader is not resumable.
pub struct CorpusReader<R> {
    reader: R,
    dimensions: usize,
    line: usize,
    buf: String,
    done: bool,
}

impl CorpusReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, dimensions: usize) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file), dimensions)
    }
}

impl<R: BufRead> CorpusReader<R> {
    /// Wrap a reader, consuming the header line.
    pub fn new(mut reader: R, dimensions: usize) -> Result<Self> {
        let mut header = String::new();
        let n = read_line(&mut reader, &mut header, 1)?;
        debug!(header = header.trim_end(), dimensions, "opened corpus");
        Ok(Self {
            reader,
            dimensions,
            line: 1,
            buf: String::new(),
            done: n == 0,
        })
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<WordVector>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            self.line += 1;
            match read_line(&mut self.reader, &mut self.buf, self.line) {
                Ok(0) => self.done = true,
                Ok(_) if self.buf.trim().is_empty() => continue,
                Ok(_) => return Some(parse_line(&self.buf, self.dimensions, self.line)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut String, line: usize) -> Result<usize> {
    reader.read_line(buf).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => CodenamesError::format(line, "line is not valid UTF-8"),
        _ => CodenamesError::Io(e),
    })
}

/// Parse one corpus line, keeping the last `dimensions` tokens as components.
pub fn parse_line(text: &str, dimensions: usize, line: usize) -> Result<WordVector> {
    let mut rest = text.trim_end();
    let mut components = vec![0f32; dimensions];
    for slot in components.iter_mut().rev() {
        let split = rest.rfind(char::is_whitespace).ok_or_else(|| {
            CodenamesError::format(line, format!("expected {} tokens", dimensions + 1))
        })?;
        let token = rest[split..].trim_start();
        *slot = token
            .parse()
            .ok()
            .filter(|v: &f32| v.is_finite())
            .ok_or_else(|| {
                CodenamesError::format(line, format!("invalid vector component '{token}'"))
            })?;
        rest = rest[..split].trim_end();
    }
    if rest.is_empty() {
        return Err(CodenamesError::format(
            line,
            format!("expected {} tokens", dimensions + 1),
        ));
    }
    Ok(WordVector {
        word: rest.to_string(),
        components,
        line,
    })
}

/// Corpus entries used as clue rows must be purely word characters.
pub fn is_word_token(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Read the vocabulary file: one word per line, blanks skipped, first
/// occurrence kept.
pub fn read_vocabulary<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    parse_vocabulary(BufReader::new(file))
}

pub fn parse_vocabulary<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => CodenamesError::format(idx + 1, "line is not valid UTF-8"),
            _ => CodenamesError::Io(e),
        })?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if seen.insert(word.to_string()) {
            words.push(word.to_string());
        }
    }
    Ok(words)
}
