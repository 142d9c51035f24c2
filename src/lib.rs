//! Word placement move generation for Scrabble-style boards.
//!
//! A [`Dictionary`] automaton is walked against a [`ScrabbleBoard`] and a
//! [`Rack`] by the [`MoveGenerator`], which returns every legal
//! [`Placement`] of the rack's letters.
//!
//! ```
//! use scrabble_movegen::{Dictionary, GeneratorConfig, MoveGenerator, Rack, ScrabbleBoard};
//!
//! let dict = Dictionary::from_words(["AT", "AS"])?;
//! let board = ScrabbleBoard::empty(15);
//! let rack: Rack = "ATS".parse()?;
//! let moves = MoveGenerator::new(&dict, &board, GeneratorConfig::default()).generate_moves(&rack);
//! assert!(moves.iter().all(|m| m.covers(board.center())));
//! # Ok::<(), scrabble_movegen::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod scrabble;
pub mod utils;

pub use config::{Config, CrossCheck, GeneratorConfig, LexiconConfig};
pub use error::{Error, Result};
pub use scrabble::board::{BoardView, ScrabbleBoard, Tile};
pub use scrabble::dictionary::{Dictionary, State};
pub use scrabble::generator::{MoveGenerator, SearchOutcome};
pub use scrabble::rack::Rack;
pub use scrabble::util::{Direction, Letter, Placement, Position};
pub use scrabble::validation::{validate_placement, PlacementError};
