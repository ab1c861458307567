//! Board state: the 25 in-play words, who owns them, and what has been guessed.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{CodenamesError, Result};

/// Standard partition sizes: starting team, second team, neutral, assassin.
pub const STARTING_TEAM_WORDS: usize = 9;
pub const SECOND_TEAM_WORDS: usize = 8;
pub const NEUTRAL_WORDS: usize = 7;
pub const ASSASSIN_WORDS: usize = 1;
pub const BOARD_SIZE: usize =
    STARTING_TEAM_WORDS + SECOND_TEAM_WORDS + NEUTRAL_WORDS + ASSASSIN_WORDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => f.write_str("red"),
            Team::Blue => f.write_str("blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Team(Team),
    Neutral,
    Assassin,
}

/// Unguessed words split from one team's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub own: Vec<String>,
    pub opponent: Vec<String>,
    pub neutral: Vec<String>,
    pub assassin: Vec<String>,
}

impl BoardView {
    /// Every word in the view.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.own
            .iter()
            .chain(&self.opponent)
            .chain(&self.neutral)
            .chain(&self.assassin)
            .map(String::as_str)
    }
}

/// Words on the table, each in exactly one category for the whole game.
#[derive(Debug, Clone)]
pub struct Board {
    layout: Vec<String>,
    categories: HashMap<String, Category>,
    guessed: HashSet<String>,
}

impl Board {
    /// Build a board from explicit partitions, laid out in argument order.
    ///
    /// Fails if a word is empty or appears in more than one place.
    pub fn new(
        red: Vec<String>,
        blue: Vec<String>,
        neutral: Vec<String>,
        assassin: Vec<String>,
    ) -> Result<Self> {
        let mut layout = Vec::with_capacity(red.len() + blue.len() + neutral.len() + assassin.len());
        let mut categories = HashMap::new();
        let groups = [
            (red, Category::Team(Team::Red)),
            (blue, Category::Team(Team::Blue)),
            (neutral, Category::Neutral),
            (assassin, Category::Assassin),
        ];
        for (words, category) in groups {
            for word in words {
                if word.is_empty() {
                    return Err(CodenamesError::InvalidBoard("empty board word".into()));
                }
                if categories.insert(word.clone(), category).is_some() {
                    return Err(CodenamesError::InvalidBoard(format!(
                        "'{word}' appears more than once"
                    )));
                }
                layout.push(word);
            }
        }
        Ok(Self {
            layout,
            categories,
            guessed: HashSet::new(),
        })
    }

    /// Deal a standard board from a vocabulary; red starts and gets the extra word.
    pub fn deal<R: Rng + ?Sized>(vocabulary: &[String], rng: &mut R) -> Result<Self> {
        let distinct: HashSet<&String> = vocabulary.iter().collect();
        if distinct.len() < BOARD_SIZE {
            return Err(CodenamesError::InvalidBoard(format!(
                "vocabulary has {} distinct words, need {BOARD_SIZE}",
                distinct.len()
            )));
        }
        let mut pool: Vec<String> = distinct.into_iter().cloned().collect();
        pool.sort();
        pool.shuffle(rng);
        pool.truncate(BOARD_SIZE);
        let assassin = pool.split_off(BOARD_SIZE - ASSASSIN_WORDS);
        let neutral = pool.split_off(STARTING_TEAM_WORDS + SECOND_TEAM_WORDS);
        let blue = pool.split_off(STARTING_TEAM_WORDS);
        let mut board = Self::new(pool, blue, neutral, assassin)?;
        board.layout.shuffle(rng);
        Ok(board)
    }

    /// All words in display order.
    pub fn layout(&self) -> &[String] {
        &self.layout
    }

    pub fn contains(&self, word: &str) -> bool {
        self.categories.contains_key(word)
    }

    pub fn category(&self, word: &str) -> Option<Category> {
        self.categories.get(word).copied()
    }

    pub fn is_guessed(&self, word: &str) -> bool {
        self.guessed.contains(word)
    }

    /// Record a guess and return the word's category.
    pub fn mark_guessed(&mut self, word: &str) -> Result<Category> {
        let category = self
            .category(word)
            .ok_or_else(|| CodenamesError::Lookup(format!("'{word}' is not on the board")))?;
        if !self.guessed.insert(word.to_string()) {
            return Err(CodenamesError::InvalidBoard(format!(
                "'{word}' was already guessed"
            )));
        }
        Ok(category)
    }

    /// Unguessed words in display order.
    pub fn unguessed(&self) -> impl Iterator<Item = &str> {
        self.layout
            .iter()
            .filter(move |w| !self.guessed.contains(*w))
            .map(String::as_str)
    }

    /// Words of one category, guessed or not, in display order.
    pub fn words_in(&self, category: Category) -> impl Iterator<Item = &str> {
        self.layout
            .iter()
            .filter(move |w| self.categories.get(*w) == Some(&category))
            .map(String::as_str)
    }

    /// Unguessed words partitioned from `team`'s point of view.
    pub fn view(&self, team: Team) -> BoardView {
        let mut view = BoardView::default();
        for word in self.unguessed() {
            let slot = match self.categories[word] {
                Category::Team(t) if t == team => &mut view.own,
                Category::Team(_) => &mut view.opponent,
                Category::Neutral => &mut view.neutral,
                Category::Assassin => &mut view.assassin,
            };
            slot.push(word.to_string());
        }
        view
    }

    /// True once every word of `team` has been guessed.
    pub fn team_cleared(&self, team: Team) -> bool {
        self.words_in(Category::Team(team)).all(|w| self.is_guessed(w))
    }

    pub fn assassin_guessed(&self) -> bool {
        self.words_in(Category::Assassin).any(|w| self.is_guessed(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn overlapping_partitions_are_rejected() {
        let err = Board::new(words(&["a"]), words(&["b"]), words(&["a"]), vec![]).unwrap_err();
        assert!(matches!(err, CodenamesError::InvalidBoard(_)));
    }

    #[test]
    fn view_excludes_guessed_words() {
        let mut board = Board::new(
            words(&["a", "b"]),
            words(&["c"]),
            words(&["d"]),
            words(&["e"]),
        )
        .unwrap();
        assert_eq!(board.mark_guessed("b").unwrap(), Category::Team(Team::Red));
        let view = board.view(Team::Blue);
        assert_eq!(view.own, ["c"]);
        assert_eq!(view.opponent, ["a"]);
        assert_eq!(view.neutral, ["d"]);
        assert_eq!(view.assassin, ["e"]);
        assert_eq!(board.unguessed().collect::<Vec<_>>(), ["a", "c", "d", "e"]);
    }

    #[test]
    fn guessing_twice_or_off_board_fails() {
        let mut board = Board::new(words(&["a"]), words(&["b"]), vec![], vec![]).unwrap();
        board.mark_guessed("a").unwrap();
        assert!(board.mark_guessed("a").is_err());
        assert!(matches!(board.mark_guessed("z"), Err(CodenamesError::Lookup(_))));
        assert!(board.team_cleared(Team::Red));
        assert!(!board.team_cleared(Team::Blue));
    }

    #[test]
    fn deal_uses_standard_sizes() {
        let vocab: Vec<String> = (0..40).map(|i| format!("w{i}")).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::deal(&vocab, &mut rng).unwrap();
        assert_eq!(board.layout().len(), BOARD_SIZE);
        let view = board.view(Team::Red);
        assert_eq!(view.own.len(), STARTING_TEAM_WORDS);
        assert_eq!(view.opponent.len(), SECOND_TEAM_WORDS);
        assert_eq!(view.neutral.len(), NEUTRAL_WORDS);
        assert_eq!(view.assassin.len(), ASSASSIN_WORDS);
    }

    #[test]
    fn deal_is_reproducible_for_a_seed() {
        let vocab: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        let a = Board::deal(&vocab, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = Board::deal(&vocab, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.layout(), b.layout());
    }

    #[test]
    fn deal_needs_enough_words() {
        let vocab = words(&["a", "b", "c"]);
        assert!(Board::deal(&vocab, &mut StdRng::seed_from_u64(1)).is_err());
    }
}
