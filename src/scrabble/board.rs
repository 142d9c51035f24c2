use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array2, ArrayView2};

use super::util::{Direction, Letter, Placement, Position};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Letter(Letter),
}

impl Tile {
    pub fn letter(&self) -> Option<Letter> {
        match self {
            Tile::Letter(l) => Some(*l),
            Tile::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrabbleBoard {
    /// Actual letters on the board
    state: Array2<Tile>,
    /// Moves placed on the board
    pub placements: Vec<Placement>,
}

impl ScrabbleBoard {
    pub fn empty(size: usize) -> Self {
        Self {
            state: Array2::from_elem((size, size), Tile::Empty),
            placements: Vec::new(),
        }
    }

    /// Builds a board from text rows, `.` (or a space) marking an empty square
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let size = rows.len();
        let mut tiles = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != size {
                return Err(Error::board_shape(format!(
                    "row {} has {} squares, expected {}",
                    i,
                    row.chars().count(),
                    size
                )));
            }
            for c in row.chars() {
                tiles.push(match c {
                    '.' | ' ' => Tile::Empty,
                    c => Tile::Letter(Letter::try_from(c)?),
                });
            }
        }
        Self::from_tiles(size, tiles)
    }

    /// Reads a board stored as a JSON grid of strings, an empty string marking an
    /// empty square
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let raw_board: Vec<Vec<String>> = serde_json::from_reader(reader)?;
        let size = raw_board.len();
        let mut tiles = Vec::with_capacity(size * size);
        for (i, row) in raw_board.iter().enumerate() {
            if row.len() != size {
                return Err(Error::board_shape(format!(
                    "row {} has {} squares, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            for cell in row {
                let mut chars = cell.trim().chars();
                tiles.push(match (chars.next(), chars.next()) {
                    (None, _) => Tile::Empty,
                    (Some(c), None) => Tile::Letter(Letter::try_from(c)?),
                    _ => {
                        return Err(Error::board_shape(format!(
                            "square {:?} in row {} holds more than one letter",
                            cell, i
                        )))
                    }
                });
            }
        }
        let board = Self::from_tiles(size, tiles)?;
        log::debug!(
            "Loaded {}x{} board from {}",
            size,
            size,
            path.as_ref().display()
        );
        Ok(board)
    }

    fn from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Self> {
        let state = Array2::from_shape_vec((size, size), tiles)
            .map_err(|e| Error::board_shape(e.to_string()))?;
        Ok(Self {
            state,
            placements: Vec::new(),
        })
    }

    /// Read-only view used by the search
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            tiles: self.state.view(),
        }
    }

    pub fn size(&self) -> usize {
        self.state.nrows()
    }

    pub fn center(&self) -> Position {
        self.view().center()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.view().is_empty(pos)
    }

    pub fn is_filled(&self, pos: Position) -> bool {
        self.view().is_filled(pos)
    }

    pub fn letter_at(&self, pos: Position) -> Option<Letter> {
        self.view().letter_at(pos)
    }

    pub fn has_letters(&self) -> bool {
        self.view().has_letters()
    }

    pub fn anchors(&self) -> Vec<Position> {
        self.view().anchors()
    }

    /// The same board with rows and columns swapped
    pub fn transposed(&self) -> Self {
        Self {
            state: self.state.t().to_owned(),
            placements: Vec::new(),
        }
    }

    /// Places the word on the board. Squares already holding a letter must hold the
    /// same letter; nothing is written unless the whole word fits.
    /// Returns the letters that had to come from the rack
    pub fn place(&mut self, placement: &Placement) -> Result<Vec<Letter>> {
        let mut new_tiles = Vec::new();
        for (pos, c) in placement.iter() {
            let placed = Letter::try_from(c)?;
            match self.state.get((pos.row, pos.col)) {
                None => return Err(Error::OutOfBounds { pos }),
                Some(Tile::Letter(existing)) if *existing != placed => {
                    return Err(Error::Overlap {
                        pos,
                        existing: *existing,
                        placed,
                    })
                }
                // Letter already existed so leave it alone
                Some(Tile::Letter(_)) => {}
                Some(Tile::Empty) => new_tiles.push((pos, placed)),
            }
        }
        for &(pos, letter) in new_tiles.iter() {
            self[pos] = Tile::Letter(letter);
        }
        self.placements.push(placement.clone());
        Ok(new_tiles.into_iter().map(|(_, l)| l).collect())
    }

    /// Scratch copy with the placement laid on it, for previewing a candidate
    pub fn with_placement(&self, placement: &Placement) -> Result<(Self, Vec<Letter>)> {
        let mut preview = self.clone();
        let used = preview.place(placement)?;
        Ok((preview, used))
    }
}

impl std::ops::Index<Position> for ScrabbleBoard {
    type Output = Tile;

    fn index(&self, index: Position) -> &Self::Output {
        &self.state[(index.row, index.col)]
    }
}

impl std::ops::IndexMut<Position> for ScrabbleBoard {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self.state[(index.row, index.col)]
    }
}

impl fmt::Display for ScrabbleBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.state.rows() {
            for tile in row.iter() {
                match tile {
                    Tile::Letter(l) => write!(f, "{}", l)?,
                    Tile::Empty => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Borrowed, read-only window onto a board. Cheap to copy and to transpose,
/// which is how the search covers the down direction with across-only code.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    tiles: ArrayView2<'a, Tile>,
}

impl<'a> BoardView<'a> {
    pub fn size(&self) -> usize {
        self.tiles.nrows()
    }

    pub fn center(&self) -> Position {
        Position::new(self.tiles.nrows() / 2, self.tiles.ncols() / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.tiles.nrows() && pos.col < self.tiles.ncols()
    }

    /// Out-of-board positions are neither empty nor filled
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.tiles.get((pos.row, pos.col)), Some(Tile::Empty))
    }

    pub fn is_filled(&self, pos: Position) -> bool {
        matches!(self.tiles.get((pos.row, pos.col)), Some(Tile::Letter(_)))
    }

    pub fn letter_at(&self, pos: Position) -> Option<Letter> {
        self.tiles.get((pos.row, pos.col)).and_then(Tile::letter)
    }

    pub fn has_letters(&self) -> bool {
        self.tiles.iter().any(|t| matches!(t, Tile::Letter(_)))
    }

    /// Checks if a position can be used as an anchor position
    pub fn is_anchor(&self, pos: Position) -> bool {
        self.is_empty(pos) && pos.adjacent().any(|n| self.is_filled(n))
    }

    /// Empty squares touching a letter. On a board without letters the center is
    /// the only anchor
    pub fn anchors(&self) -> Vec<Position> {
        if !self.has_letters() {
            return vec![self.center()];
        }
        self.positions().filter(|&p| self.is_anchor(p)).collect()
    }

    /// Every square, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = self.tiles.dim();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Position { row, col }))
    }

    /// The letters of the contiguous run that ends just before `pos`, read in
    /// board order
    pub fn run_before(&self, pos: Position, dir: Direction) -> Vec<Letter> {
        let mut run = Vec::new();
        let mut curr = pos.prev(dir);
        while let Some(l) = self.letter_at(curr) {
            run.push(l);
            curr = curr.prev(dir);
        }
        run.reverse();
        run
    }

    /// The letters of the contiguous run that starts just after `pos`
    pub fn run_after(&self, pos: Position, dir: Direction) -> Vec<Letter> {
        let mut run = Vec::new();
        let mut curr = pos.next(dir);
        while let Some(l) = self.letter_at(curr) {
            run.push(l);
            curr = curr.next(dir);
        }
        run
    }

    /// Rows and columns swapped, without copying
    pub fn transposed(&self) -> BoardView<'a> {
        BoardView {
            tiles: self.tiles.reversed_axes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrabble::util::spell;

    fn small() -> ScrabbleBoard {
        ScrabbleBoard::from_rows(&[
            ".....", //
            ".CAT.", //
            "...O.", //
            ".....", //
            ".....",
        ])
        .unwrap()
    }

    #[test]
    fn test_occupancy_is_bounds_safe() {
        let board = small();
        let p = Position::new(1, 1);
        assert!(board.is_filled(p));
        assert!(!board.is_empty(p));
        assert_eq!(board.letter_at(p), Letter::from_char('C'));
        let outside = Position::new(0, 0).prev(Direction::Across);
        assert!(!board.is_filled(outside));
        assert!(!board.is_empty(outside));
        assert_eq!(board.letter_at(outside), None);
        assert!(!board.is_empty(Position::new(5, 0)));
    }

    #[test]
    fn test_anchors() {
        let board = small();
        let anchors = board.anchors();
        assert!(anchors.contains(&Position::new(0, 1)));
        assert!(anchors.contains(&Position::new(1, 0)));
        assert!(anchors.contains(&Position::new(1, 4)));
        assert!(anchors.contains(&Position::new(3, 3)));
        assert!(!anchors.contains(&Position::new(1, 2)));
        assert!(!anchors.contains(&Position::new(4, 4)));
        assert_eq!(anchors.len(), 9);

        let empty = ScrabbleBoard::empty(15);
        assert_eq!(empty.anchors(), vec![Position::new(7, 7)]);
    }

    #[test]
    fn test_runs() {
        let board = small();
        let v = board.view();
        assert_eq!(spell(&v.run_before(Position::new(1, 4), Direction::Across)), "CAT");
        assert_eq!(spell(&v.run_after(Position::new(1, 0), Direction::Across)), "CAT");
        assert_eq!(spell(&v.run_after(Position::new(0, 3), Direction::Down)), "TO");
        assert!(v.run_before(Position::new(0, 0), Direction::Across).is_empty());
    }

    #[test]
    fn test_transposed_view() {
        let board = small();
        let t = board.view().transposed();
        assert_eq!(t.letter_at(Position::new(1, 1)), Letter::from_char('C'));
        assert_eq!(t.letter_at(Position::new(3, 2)), Letter::from_char('O'));
        assert_eq!(spell(&t.run_after(Position::new(3, 0), Direction::Across)), "TO");
        assert_eq!(board.transposed().transposed(), board);
    }

    #[test]
    fn test_place_word() {
        let mut board = small();
        let used = board
            .place(&Placement::new("TOE", Position::new(1, 3), Direction::Down))
            .unwrap();
        assert_eq!(used, vec![Letter::from_char('E').unwrap()]);
        assert_eq!(board.letter_at(Position::new(3, 3)), Letter::from_char('E'));
        assert_eq!(board.placements.len(), 1);
    }

    #[test]
    fn test_place_rejects_conflicts() {
        let mut board = small();
        let before = board.clone();
        let res = board.place(&Placement::new("CUT", Position::new(1, 1), Direction::Across));
        assert!(matches!(res, Err(Error::Overlap { .. })));
        let res = board.place(&Placement::new("TOXIC", Position::new(1, 3), Direction::Down));
        assert!(matches!(res, Err(Error::OutOfBounds { .. })));
        assert_eq!(board, before);
    }

    #[test]
    fn test_preview_leaves_original() {
        let board = small();
        let (preview, used) = board
            .with_placement(&Placement::new("AT", Position::new(3, 0), Direction::Across))
            .unwrap();
        assert_eq!(used.len(), 2);
        assert!(preview.is_filled(Position::new(3, 0)));
        assert!(board.is_empty(Position::new(3, 0)));
    }

    #[test]
    fn test_from_rows_shape() {
        assert!(matches!(
            ScrabbleBoard::from_rows(&["..", "..."]),
            Err(Error::BoardShape(_))
        ));
        assert!(matches!(
            ScrabbleBoard::from_rows(&[".1", ".."]),
            Err(Error::InvalidLetter { ch: '1' })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, r#"[["", "", ""], ["", "q", "I"], ["", "", ""]]"#).unwrap();
        let board = ScrabbleBoard::from_file(&path).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.letter_at(Position::new(1, 1)), Letter::from_char('Q'));
        assert_eq!(board.to_string(), "...\n.QI\n...\n");

        std::fs::write(&path, r#"[["AB"]]"#).unwrap();
        assert!(matches!(
            ScrabbleBoard::from_file(&path),
            Err(Error::BoardShape(_))
        ));
    }
}
