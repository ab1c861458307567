//! Terminal rendering of the board.

use crossterm::style::{Color, Stylize};

use crate::board::{Board, Category, Team};

pub const COLUMNS: usize = 5;
pub const CELL_WIDTH: usize = 10;

fn colour(category: Category) -> Color {
    match category {
        Category::Team(Team::Red) => Color::Red,
        Category::Team(Team::Blue) => Color::Blue,
        Category::Neutral => Color::DarkGrey,
        Category::Assassin => Color::Black,
    }
}

/// Render the board as a grid.
///
/// The codemaster view colours every unguessed word by category and blanks
/// guessed ones; the guesser view shows unguessed words plainly and reveals
/// the colour of guessed ones.
pub fn render_board(board: &Board, codemaster_view: bool) -> String {
    let rows: Vec<String> = board
        .layout()
        .chunks(COLUMNS)
        .map(|row| {
            row.iter()
                .map(|word| {
                    let cell = format!("{:>width$}", word, width = CELL_WIDTH);
                    let guessed = board.is_guessed(word);
                    match (codemaster_view, guessed, board.category(word)) {
                        (true, true, _) => " ".repeat(CELL_WIDTH),
                        (false, false, _) | (_, _, None) => cell,
                        (_, _, Some(category)) => cell.with(colour(category)).to_string(),
                    }
                })
                .collect::<Vec<_>>()
                .join("   ")
        })
        .collect();
    rows.join("\n")
}

/// Both views separated by a rule, as shown to a codemaster.
pub fn render_codemaster_view(board: &Board) -> String {
    let width = COLUMNS * CELL_WIDTH + (COLUMNS - 1) * 3;
    format!(
        "{}\n{}\n{}",
        render_board(board, true),
        "-".repeat(width),
        render_board(board, false)
    )
}
