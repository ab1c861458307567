//! Word-association game AI driven by a precomputed similarity table.
//!
//! The batch side ([`score_matrix`]) turns an embedding corpus into a table
//! of calibrated scores between corpus words and the board vocabulary. The
//! runtime side loads that table once ([`ScoreStore`]) and uses it to give
//! clues ([`ClueSelector`]) and to guess ([`GuessRanker`]).

pub mod board;
pub mod clue;
pub mod config;
pub mod corpus;
pub mod error;
pub mod game;
pub mod guess;
pub mod io_utils;
pub mod logging;
pub mod math;
pub mod player;
pub mod render;
pub mod score_matrix;
pub mod score_store;
pub mod stats;

pub use board::{Board, BoardView, Category, Team};
pub use clue::{Clue, ClueSelector, ClueValue};
pub use config::BuildConfig;
pub use corpus::{read_vocabulary, CorpusReader, WordVector};
pub use error::{CodenamesError, Result};
pub use game::Game;
pub use guess::GuessRanker;
pub use math::cosine_distance;
pub use player::{player, ClueGiver, Guesser, Player, Role};
pub use score_matrix::{BuildReport, ScoreMatrixBuilder};
pub use score_store::ScoreStore;
pub use stats::{ColumnStats, ColumnSummary};
