use ndarray::Array2;

use super::letter_set::LetterSet;
use crate::config::CrossCheck;
use crate::scrabble::board::BoardView;
use crate::scrabble::dictionary::Dictionary;
use crate::scrabble::util::{Direction, Position};

/// Per-square letter constraints for words laid across a view. Each empty square
/// holds the letters that keep the word running down through it valid; filled
/// squares hold nothing since no tile can go there.
pub struct CrossCheckGrid {
    state: Array2<LetterSet>,
}

impl CrossCheckGrid {
    pub fn build(view: BoardView, dict: &Dictionary, mode: CrossCheck) -> Self {
        let size = view.size();
        let mut state = Array2::from_elem((size, size), LetterSet::empty());
        for pos in view.positions() {
            if !view.is_empty(pos) {
                continue;
            }
            state[(pos.row, pos.col)] = match mode {
                CrossCheck::Ignore => LetterSet::any(),
                CrossCheck::Enforce => Self::cross_set(view, pos, dict),
            };
        }
        Self { state }
    }

    /// Letters allowed at `pos`. Nothing is allowed outside the board
    pub fn allowed(&self, pos: Position) -> LetterSet {
        self.state
            .get((pos.row, pos.col))
            .copied()
            .unwrap_or_default()
    }

    fn cross_set(view: BoardView, pos: Position, dict: &Dictionary) -> LetterSet {
        let prefix = view.run_before(pos, Direction::Down);
        let suffix = view.run_after(pos, Direction::Down);
        if prefix.is_empty() && suffix.is_empty() {
            return LetterSet::any();
        }
        // A prefix the dictionary does not know closes the square entirely
        let Some(state) = dict.state_after_letters(&prefix) else {
            return LetterSet::empty();
        };
        state
            .edges()
            .iter()
            .filter(|&l| {
                state
                    .next(l)
                    .and_then(|s| s.walk(&suffix))
                    .is_some_and(|s| s.is_accepting())
            })
            .collect()
    }
}
