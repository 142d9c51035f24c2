pub mod grid;
pub mod letter_set;

pub use self::grid::CrossCheckGrid;
pub use self::letter_set::LetterSet;
