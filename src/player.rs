//! Players are composed from one clue-giving and one guessing capability,
//! each either driven by the score table or by a person at the terminal.
//!
//! Every human role at the table reads from one [`SharedInput`], so scripted
//! input is consumed in turn order no matter which role asks.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Stdin, Write};
use std::rc::Rc;

use clap::ValueEnum;

use crate::board::{Board, Team};
use crate::clue::{Clue, ClueSelector};
use crate::error::{CodenamesError, Result};
use crate::guess::GuessRanker;
use crate::render::render_codemaster_view;
use crate::score_store::ScoreStore;

pub trait ClueGiver {
    fn give_clue(&mut self, board: &Board, team: Team) -> Result<Clue>;
}

pub trait Guesser {
    /// `None` passes the rest of the turn.
    fn guess(&mut self, board: &Board, clue: &Clue, guess_index: usize) -> Result<Option<String>>;
}

/// Line source shared by all human roles in a game.
pub type SharedInput<R> = Rc<RefCell<R>>;

/// One buffered reader over stdin for the whole game.
pub fn terminal_input() -> SharedInput<BufReader<Stdin>> {
    Rc::new(RefCell::new(BufReader::new(io::stdin())))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Robot,
    Human,
}

pub struct RobotCodemaster<'a> {
    selector: ClueSelector<'a>,
}

impl<'a> RobotCodemaster<'a> {
    pub fn new(store: &'a ScoreStore) -> Self {
        Self {
            selector: ClueSelector::new(store),
        }
    }
}

impl ClueGiver for RobotCodemaster<'_> {
    fn give_clue(&mut self, board: &Board, team: Team) -> Result<Clue> {
        self.selector.give_clue(&board.view(team))
    }
}

pub struct RobotGuesser<'a> {
    ranker: GuessRanker<'a>,
}

impl<'a> RobotGuesser<'a> {
    pub fn new(store: &'a ScoreStore) -> Self {
        Self {
            ranker: GuessRanker::new(store),
        }
    }
}

impl Guesser for RobotGuesser<'_> {
    fn guess(&mut self, board: &Board, clue: &Clue, guess_index: usize) -> Result<Option<String>> {
        self.ranker.guess(board, &clue.word, clue.count, guess_index)
    }
}

fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    writeln!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CodenamesError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while waiting for a move",
        )));
    }
    Ok(line.trim().to_string())
}

/// Reads clues from a person; only words known to the score table are accepted.
pub struct HumanCodemaster<'a, R, W> {
    store: &'a ScoreStore,
    input: SharedInput<R>,
    output: W,
}

impl<'a, R: BufRead, W: Write> HumanCodemaster<'a, R, W> {
    pub fn new(store: &'a ScoreStore, input: SharedInput<R>, output: W) -> Self {
        Self { store, input, output }
    }
}

impl<R: BufRead, W: Write> ClueGiver for HumanCodemaster<'_, R, W> {
    fn give_clue(&mut self, board: &Board, team: Team) -> Result<Clue> {
        writeln!(self.output, "Human codemaster ({team}), please give a clue")?;
        writeln!(self.output, "{}", render_codemaster_view(board))?;
        let mut input = self.input.borrow_mut();
        let word = loop {
            let word = prompt_line(&mut *input, &mut self.output, "clue word?")?;
            if self.store.contains(&word) {
                break word;
            }
            writeln!(self.output, "Sorry, computer doesn't understand")?;
        };
        let count = loop {
            let raw = prompt_line(&mut *input, &mut self.output, "count?")?;
            match raw.parse() {
                Ok(n) => break n,
                Err(_) => writeln!(self.output, "count must be a non-negative number")?,
            }
        };
        Ok(Clue { word, count })
    }
}

/// Reads guesses from a person; an empty line passes.
pub struct HumanGuesser<R, W> {
    input: SharedInput<R>,
    output: W,
}

impl<R: BufRead, W: Write> HumanGuesser<R, W> {
    pub fn new(input: SharedInput<R>, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Guesser for HumanGuesser<R, W> {
    fn guess(&mut self, board: &Board, clue: &Clue, guess_index: usize) -> Result<Option<String>> {
        writeln!(
            self.output,
            "clue: {} {} (guess {guess_index})",
            clue.word, clue.count
        )?;
        let remaining: Vec<&str> = board.unguessed().collect();
        writeln!(self.output, "board: {}", remaining.join(", "))?;
        let mut input = self.input.borrow_mut();
        loop {
            let word = prompt_line(&mut *input, &mut self.output, "guess? (empty to pass)")?;
            if word.is_empty() {
                return Ok(None);
            }
            if board.contains(&word) && !board.is_guessed(&word) {
                return Ok(Some(word));
            }
            writeln!(self.output, "invalid guess")?;
        }
    }
}

/// One side of the table: a clue-giver paired with a guesser.
pub struct Player<'a> {
    codemaster: Box<dyn ClueGiver + 'a>,
    guesser: Box<dyn Guesser + 'a>,
}

impl<'a> Player<'a> {
    pub fn new(codemaster: Box<dyn ClueGiver + 'a>, guesser: Box<dyn Guesser + 'a>) -> Self {
        Self { codemaster, guesser }
    }

    pub fn give_clue(&mut self, board: &Board, team: Team) -> Result<Clue> {
        self.codemaster.give_clue(board, team)
    }

    pub fn guess(&mut self, board: &Board, clue: &Clue, guess_index: usize) -> Result<Option<String>> {
        self.guesser.guess(board, clue, guess_index)
    }
}

/// Build a player from two role selectors. Human roles read from `input`
/// and write to stdout.
pub fn player<'a, R: BufRead + 'a>(
    store: &'a ScoreStore,
    codemaster: Role,
    guesser: Role,
    input: &SharedInput<R>,
) -> Player<'a> {
    let codemaster: Box<dyn ClueGiver + 'a> = match codemaster {
        Role::Robot => Box::new(RobotCodemaster::new(store)),
        Role::Human => Box::new(HumanCodemaster::new(store, Rc::clone(input), io::stdout())),
    };
    let guesser: Box<dyn Guesser + 'a> = match guesser {
        Role::Robot => Box::new(RobotGuesser::new(store)),
        Role::Human => Box::new(HumanGuesser::new(Rc::clone(input), io::stdout())),
    };
    Player::new(codemaster, guesser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn store() -> ScoreStore {
        ScoreStore::from_reader(Cursor::new("__word,a,b\nzed,1,0\n")).unwrap()
    }

    fn scripted(text: &str) -> SharedInput<Cursor<Vec<u8>>> {
        Rc::new(RefCell::new(Cursor::new(text.as_bytes().to_vec())))
    }

    fn board() -> Board {
        Board::new(vec!["a".into()], vec!["b".into()], vec![], vec![]).unwrap()
    }

    #[test]
    fn human_codemaster_retries_unknown_words_and_bad_counts() {
        let store = store();
        let mut out = Vec::new();
        let mut cm = HumanCodemaster::new(&store, scripted("nope\nzed\nx\n2\n"), &mut out);
        let clue = cm.give_clue(&board(), Team::Red).unwrap();
        assert_eq!(clue, Clue { word: "zed".into(), count: 2 });
        drop(cm);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sorry, computer doesn't understand"));
        assert!(text.contains("count must be"));
    }

    #[test]
    fn human_guesser_validates_and_passes() {
        let mut b = board();
        b.mark_guessed("b").unwrap();
        let clue = Clue { word: "zed".into(), count: 1 };
        let mut g = HumanGuesser::new(scripted("b\nq\na\n\n"), Vec::new());
        assert_eq!(g.guess(&b, &clue, 1).unwrap(), Some("a".to_string()));
        assert_eq!(g.guess(&b, &clue, 2).unwrap(), None);
    }

    #[test]
    fn closed_input_is_an_error() {
        let clue = Clue { word: "zed".into(), count: 1 };
        let mut g = HumanGuesser::new(scripted(""), Vec::new());
        assert!(matches!(g.guess(&board(), &clue, 1), Err(CodenamesError::Io(_))));
    }

    #[test]
    fn robot_player_composes_both_roles() {
        let store = store();
        let mut p = player(&store, Role::Robot, Role::Robot, &scripted(""));
        let b = board();
        let clue = p.give_clue(&b, Team::Red).unwrap();
        assert_eq!(clue.word, "zed");
        assert_eq!(clue.count, 1);
        assert_eq!(p.guess(&b, &clue, 1).unwrap(), Some("a".to_string()));
        assert_eq!(p.guess(&b, &clue, 3).unwrap(), None);
    }

    #[test]
    fn human_roles_share_one_input() {
        let store = store();
        let input = scripted("zed\n1\na\n\nzed\n0\n");
        let mut red = player(&store, Role::Human, Role::Human, &input);
        let mut blue = player(&store, Role::Human, Role::Robot, &input);
        let b = board();
        let clue = red.give_clue(&b, Team::Red).unwrap();
        assert_eq!(clue, Clue { word: "zed".into(), count: 1 });
        assert_eq!(red.guess(&b, &clue, 1).unwrap(), Some("a".to_string()));
        assert_eq!(red.guess(&b, &clue, 2).unwrap(), None);
        let clue = blue.give_clue(&b, Team::Blue).unwrap();
        assert_eq!(clue, Clue { word: "zed".into(), count: 0 });
    }
}
