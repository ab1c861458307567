use clap::Parser;
use std::path::PathBuf;

use codenames::io_utils::codenames_cli_error;
use codenames::{logging, ScoreStore};

/// List the vocabulary words most similar to a word.
#[derive(Parser)]
struct Args {
    /// Score table produced by score_matrix
    #[arg(long, default_value = "scores.csv")]
    scores: PathBuf,
    /// Word to check for similar words against
    #[arg(long)]
    word: String,
    /// Number of neighbours to show
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
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
    let store =
        ScoreStore::load(&args.scores).map_err(|e| codenames_cli_error("loading score table", e))?;
    let neighbours = store
        .nearest(&args.word, args.top)
        .map_err(|e| codenames_cli_error("looking up word", e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&neighbours)?);
    } else {
        for n in &neighbours {
            println!("{:>12} {:>8.4}", n.word, n.score);
        }
    }
    Ok(())
}
