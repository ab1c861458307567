//! Turn loop and win conditions.

use std::io::Write;

use tracing::info;

use crate::board::{Board, Category, Team};
use crate::error::Result;
use crate::player::Player;
use crate::render::render_codemaster_view;

pub struct Game<'a> {
    red: Player<'a>,
    blue: Player<'a>,
    board: Board,
    turn: Team,
    winner: Option<Team>,
}

/// Winner after `guessing` has just picked a word, if the game is over.
///
/// Touching the assassin hands the game to the other side; otherwise a team
/// wins once all of its words are uncovered.
pub fn decide_winner(board: &Board, guessing: Team) -> Option<Team> {
    if board.assassin_guessed() {
        Some(guessing.other())
    } else if board.team_cleared(Team::Red) {
        Some(Team::Red)
    } else if board.team_cleared(Team::Blue) {
        Some(Team::Blue)
    } else {
        None
    }
}

impl<'a> Game<'a> {
    /// Red moves first.
    pub fn new(red: Player<'a>, blue: Player<'a>, board: Board) -> Self {
        Self {
            red,
            blue,
            board,
            turn: Team::Red,
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Team {
        self.turn
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Play one turn: a clue, then up to `count + 1` guesses.
    pub fn play_turn<W: Write>(&mut self, out: &mut W) -> Result<Option<Team>> {
        if self.winner.is_some() {
            return Ok(self.winner);
        }
        let team = self.turn;
        let player = match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        };

        writeln!(out, "Turn: {team}'s turn")?;
        writeln!(out, "{}", render_codemaster_view(&self.board))?;
        let clue = player.give_clue(&self.board, team)?;
        info!(team = %team, clue = %clue.word, count = clue.count, "clue given");
        writeln!(out, "Clue: {}, {}", clue.word, clue.count)?;

        for guess_index in 1..=clue.count + 1 {
            let Some(word) = player.guess(&self.board, &clue, guess_index)? else {
                break;
            };
            writeln!(out, "Guess: {word}")?;
            let category = self.board.mark_guessed(&word)?;
            info!(team = %team, guess = %word, ?category, "guess made");
            if let Some(winner) = decide_winner(&self.board, team) {
                writeln!(out, "{winner} wins!")?;
                self.winner = Some(winner);
                break;
            }
            if category != Category::Team(team) {
                break;
            }
        }

        self.turn = team.other();
        Ok(self.winner)
    }

    /// Play turns until someone wins.
    pub fn play<W: Write>(&mut self, out: &mut W) -> Result<Team> {
        loop {
            if let Some(winner) = self.play_turn(out)? {
                return Ok(winner);
            }
        }
    }
}
