use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;

use codenames::io_utils::{codenames_cli_error, simple_cli_error};
use codenames::player::terminal_input;
use codenames::{logging, player, read_vocabulary, Board, Game, Role, ScoreStore};

/// Play a game between two sides, each a clue-giver plus a guesser.
#[derive(Parser)]
struct Args {
    /// Score table produced by score_matrix
    #[arg(long, default_value = "scores.csv")]
    scores: PathBuf,
    /// Vocabulary the board is dealt from
    #[arg(long, default_value = "wordlist.txt")]
    vocabulary: PathBuf,
    #[arg(long, value_enum, default_value_t = Role::Robot)]
    red_codemaster: Role,
    #[arg(long, value_enum, default_value_t = Role::Robot)]
    red_guesser: Role,
    #[arg(long, value_enum, default_value_t = Role::Robot)]
    blue_codemaster: Role,
    #[arg(long, value_enum, default_value_t = Role::Robot)]
    blue_guesser: Role,
    /// Seed for dealing the board
    #[arg(long)]
    seed: Option<u64>,
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

    let store = ScoreStore::load(&args.scores)
        .map_err(|e| codenames_cli_error("loading score table", e))?;
    let vocabulary = read_vocabulary(&args.vocabulary)
        .map_err(|e| codenames_cli_error("reading vocabulary", e))?;
    if let Some(word) = vocabulary.iter().find(|w| store.column_position(w).is_err()) {
        return Err(simple_cli_error(&format!(
            "vocabulary word '{word}' has no column in the score table"
        ))
        .into());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let board = Board::deal(&vocabulary, &mut rng).map_err(|e| codenames_cli_error("dealing", e))?;

    let input = terminal_input();
    let red = player(&store, args.red_codemaster, args.red_guesser, &input);
    let blue = player(&store, args.blue_codemaster, args.blue_guesser, &input);
    let mut game = Game::new(red, blue, board);
    let mut out = io::stdout();
    game.play(&mut out)
        .map_err(|e| codenames_cli_error("playing", e))?;
    Ok(())
}
