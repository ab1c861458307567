use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use codenames::io_utils::{codenames_cli_error, io_cli_error, simple_cli_error};
use codenames::{logging, BuildConfig, ScoreMatrixBuilder};

/// Build the normalized score table from an embedding corpus.
#[derive(Parser)]
struct Args {
    /// Embedding corpus in text format
    #[arg(long)]
    corpus: PathBuf,
    /// Vocabulary file, one word per line
    #[arg(long)]
    vocabulary: PathBuf,
    /// Score table output path
    #[arg(long, default_value = "scores.csv")]
    output: PathBuf,
    /// Number of leading corpus entries used as clue rows
    #[arg(long, default_value_t = 10_000)]
    dictionary_size: usize,
    /// Vector dimensionality
    #[arg(long, default_value_t = 300)]
    dimensions: usize,
    /// Keep the intermediate distance table at this path
    #[arg(long)]
    keep_distances: Option<PathBuf>,
    /// Optional JSON output path for per-column statistics
    #[arg(long)]
    stats_json: Option<PathBuf>,
    /// Hide progress bars
    #[arg(long)]
    quiet: bool,
    /// Debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    if args.dimensions == 0 {
        return Err(simple_cli_error("dimensions must be positive").into());
    }

    let config = BuildConfig {
        corpus: args.corpus,
        vocabulary: args.vocabulary,
        output: args.output,
        distances: args.keep_distances,
        dictionary_size: args.dictionary_size,
        dimensions: args.dimensions,
        show_progress: !args.quiet,
        ..BuildConfig::default()
    };
    let report = ScoreMatrixBuilder::new(config)
        .run()
        .map_err(|e| codenames_cli_error("building score table", e))?;

    if let Some(path) = &args.stats_json {
        let mut f = File::create(path).map_err(|e| io_cli_error("creating json", path, e))?;
        serde_json::to_writer_pretty(&mut f, &report.columns)?;
        f.write_all(b"\n")?;
    }

    eprintln!(
        "wrote {} rows x {} columns ({} corpus entries skipped)",
        report.rows,
        report.columns.len(),
        report.skipped
    );
    Ok(())
}
