use std::fmt;
use std::slice::Iter;

use crate::error::{Error, Result};

/// Number of letters in the playable alphabet (`A..=Z`)
pub const ALPHABET_SIZE: usize = 26;

/// Orientation of a word on the board. `Across` is horizontal, `Down` is vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 2] = [Direction::Across, Direction::Down];
        DIRS.iter()
    }

    pub fn flip(&self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the next position in the given direction. Pure arithmetic,
    /// the result may lie outside the board.
    pub fn next(&self, dir: Direction) -> Position {
        let mut p = *self;
        p[dir] = p[dir].wrapping_add(1);
        p
    }

    /// Returns the previous position in the given direction. Stepping back from
    /// the first row or column wraps to a position that no board contains.
    pub fn prev(&self, dir: Direction) -> Position {
        let mut p = *self;
        p[dir] = p[dir].wrapping_sub(1);
        p
    }

    /// Moves the position forward a fixed number of steps
    pub fn step_n(&self, n: usize, dir: Direction) -> Position {
        let mut p = *self;
        p[dir] = p[dir].wrapping_add(n);
        p
    }

    /// The four orthogonal neighbours, unchecked
    pub fn adjacent(&self) -> impl Iterator<Item = Position> + '_ {
        Direction::iter().flat_map(move |&d| [self.next(d), self.prev(d)])
    }

    /// Swaps row and column
    pub fn transpose(&self) -> Position {
        Position {
            row: self.col,
            col: self.row,
        }
    }
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;

    /// The coordinate that changes when moving in that direction
    fn index(&self, index: Direction) -> &Self::Output {
        match index {
            Direction::Across => &self.col,
            Direction::Down => &self.row,
        }
    }
}

impl std::ops::IndexMut<Direction> for Position {
    fn index_mut(&mut self, index: Direction) -> &mut Self::Output {
        match index {
            Direction::Across => &mut self.col,
            Direction::Down => &mut self.row,
        }
    }
}

/// A tile letter, stored as its offset from `'A'`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    /// Converts an ASCII letter (either case) into a tile letter
    pub fn from_char(c: char) -> Option<Letter> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Letter(upper as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn from_index(i: usize) -> Option<Letter> {
        if i < ALPHABET_SIZE {
            Some(Letter(i as u8))
        } else {
            None
        }
    }

    pub fn as_index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_char(&self) -> char {
        (b'A' + self.0) as char
    }

    /// Every letter of the alphabet in order
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self> {
        Letter::from_char(ch).ok_or(Error::InvalidLetter { ch })
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parses a word into letters, failing on the first character outside the alphabet
pub fn parse_word(word: &str) -> Result<Vec<Letter>> {
    word.chars().map(Letter::try_from).collect()
}

/// Renders letters back into an uppercase word
pub fn spell(letters: &[Letter]) -> String {
    letters.iter().map(Letter::as_char).collect()
}

/// A word laid on the board: the word, the cell holding its first letter and its orientation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    pub word: String,
    pub pos: Position,
    pub dir: Direction,
}

impl Placement {
    pub fn new(word: impl Into<String>, pos: Position, dir: Direction) -> Self {
        Self {
            word: word.into(),
            pos,
            dir,
        }
    }

    /// Cells covered by the word, paired with the character meant for each
    pub fn iter(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.word
            .chars()
            .enumerate()
            .map(move |(i, c)| (self.pos.step_n(i, self.dir), c))
    }

    /// The cell just past the last letter
    pub fn end(&self) -> Position {
        self.pos.step_n(self.word.chars().count(), self.dir)
    }

    pub fn covers(&self, pos: Position) -> bool {
        self.iter().any(|(p, _)| p == pos)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dir = match self.dir {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "{} at ({}, {}) {}", self.word, self.pos.row, self.pos.col, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_conversion() {
        assert_eq!(Letter::from_char('a'), Letter::from_char('A'));
        assert_eq!(Letter::from_char('Z').map(|l| l.as_index()), Some(25));
        assert_eq!(Letter::from_char('1'), None);
        assert_eq!(Letter::from_char('é'), None);
        assert!(matches!(
            Letter::try_from('?'),
            Err(Error::InvalidLetter { ch: '?' })
        ));
        assert_eq!(spell(&parse_word("quiz").unwrap()), "QUIZ");
    }

    #[test]
    fn test_position_steps() {
        let p = Position::new(3, 0);
        assert_eq!(p.next(Direction::Across), Position::new(3, 1));
        assert_eq!(p.next(Direction::Down), Position::new(4, 0));
        // Stepping off the left edge never lands back on the board
        assert_eq!(p.prev(Direction::Across).col, usize::MAX);
        assert_eq!(p.adjacent().count(), 4);
        assert_eq!(p.transpose(), Position::new(0, 3));
    }

    #[test]
    fn test_placement_cells() {
        let m = Placement::new("CAT", Position::new(2, 5), Direction::Down);
        let cells = m.iter().collect::<Vec<_>>();
        assert_eq!(
            cells,
            vec![
                (Position::new(2, 5), 'C'),
                (Position::new(3, 5), 'A'),
                (Position::new(4, 5), 'T'),
            ]
        );
        assert_eq!(m.end(), Position::new(5, 5));
        assert!(m.covers(Position::new(3, 5)));
        assert!(!m.covers(Position::new(3, 6)));
    }
}
