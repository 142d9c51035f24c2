pub mod board;
pub mod constraint;
pub mod dictionary;
pub mod generator;
pub mod lexicon;
pub mod rack;
pub mod util;
pub mod validation;

pub const BOARD_SIZE: usize = 15;
