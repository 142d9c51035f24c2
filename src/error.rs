//! Error types for the move generator and its loaders.

use crate::scrabble::util::{Letter, Position};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the crate: reading word lists, boards and
/// snapshots, and laying placements onto a board. The search itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors from board and config files.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dictionary snapshot encoding errors.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Word set construction errors.
    #[error("Word set error: {0}")]
    WordSet(#[from] fst::Error),

    /// A character outside `A..=Z` reached a boundary that only accepts letters.
    #[error("Invalid letter {ch:?}")]
    InvalidLetter { ch: char },

    /// A rack holding more copies of one letter than a count can track.
    #[error("Too many copies of {letter:?} in the rack")]
    RackOverflow { letter: Letter },

    /// A board file whose rows do not form a square grid.
    #[error("Malformed board: {0}")]
    BoardShape(String),

    /// A placement running off the board.
    #[error("Position {pos:?} is outside the board")]
    OutOfBounds { pos: Position },

    /// A placement disagreeing with a tile already on the board.
    #[error("Placement would overwrite {existing:?} with {placed:?} at {pos:?}")]
    Overlap {
        pos: Position,
        existing: Letter,
        placed: Letter,
    },
}

impl Error {
    /// Create a board shape error.
    pub fn board_shape(msg: impl Into<String>) -> Self {
        Error::BoardShape(msg.into())
    }
}
