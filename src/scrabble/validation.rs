//! Legality checks for a placement entered by hand.
//!
//! The generator only ever produces placements that pass these checks; this
//! module lets a caller hold a human move to the same rules.

use super::board::ScrabbleBoard;
use super::dictionary::Dictionary;
use super::rack::Rack;
use super::util::{spell, Letter, Placement, Position};
use crate::config::CrossCheck;

/// Why a placement is not a legal move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("{ch:?} is not a letter")]
    InvalidLetter { ch: char },
    #[error("{word} is not in the dictionary")]
    NotInDictionary { word: String },
    #[error("word runs off the board at {pos:?}")]
    OutOfBounds { pos: Position },
    #[error("word runs into the tile at {pos:?}")]
    Abuts { pos: Position },
    #[error("square {pos:?} holds {existing:?}, not {placed:?}")]
    Conflict {
        pos: Position,
        existing: Letter,
        placed: Letter,
    },
    #[error("no tile is placed")]
    NoTilesPlaced,
    #[error("rack is missing {missing:?}")]
    MissingLetters { missing: Vec<Letter> },
    #[error("word does not touch any tile on the board")]
    NotConnected,
    #[error("first word must cover the center square {center:?}")]
    MissesCenter { center: Position },
    #[error("cross word {word} is not in the dictionary")]
    InvalidCrossWord { word: String },
}

/// Checks a placement against the board, rack and dictionary. On success returns
/// the letters the move takes from the rack
pub fn validate_placement(
    dict: &Dictionary,
    board: &ScrabbleBoard,
    rack: &Rack,
    placement: &Placement,
    cross_checks: CrossCheck,
) -> Result<Vec<Letter>, PlacementError> {
    let letters = placement
        .word
        .chars()
        .map(|ch| Letter::from_char(ch).ok_or(PlacementError::InvalidLetter { ch }))
        .collect::<Result<Vec<_>, _>>()?;
    if !dict.contains(&letters) {
        return Err(PlacementError::NotInDictionary {
            word: placement.word.to_ascii_uppercase(),
        });
    }

    let view = board.view();
    let dir = placement.dir;
    let mut new_tiles = Vec::new();
    for (i, &l) in letters.iter().enumerate() {
        let pos = placement.pos.step_n(i, dir);
        if !view.contains(pos) {
            return Err(PlacementError::OutOfBounds { pos });
        }
        match view.letter_at(pos) {
            Some(existing) if existing != l => {
                return Err(PlacementError::Conflict {
                    pos,
                    existing,
                    placed: l,
                })
            }
            Some(_) => {}
            None => new_tiles.push((pos, l)),
        }
    }

    // The word has to be the whole run of tiles along its line
    for pos in [placement.pos.prev(dir), placement.end()] {
        if view.is_filled(pos) {
            return Err(PlacementError::Abuts { pos });
        }
    }

    if new_tiles.is_empty() {
        return Err(PlacementError::NoTilesPlaced);
    }
    let used = new_tiles.iter().map(|&(_, l)| l).collect::<Vec<_>>();
    rack.draw_all(&used)
        .map_err(|missing| PlacementError::MissingLetters { missing })?;

    if view.has_letters() {
        if !new_tiles.iter().any(|&(pos, _)| view.is_anchor(pos)) {
            return Err(PlacementError::NotConnected);
        }
    } else if !placement.covers(view.center()) {
        return Err(PlacementError::MissesCenter {
            center: view.center(),
        });
    }

    if cross_checks == CrossCheck::Enforce {
        let perp = dir.flip();
        for &(pos, l) in new_tiles.iter() {
            let before = view.run_before(pos, perp);
            let after = view.run_after(pos, perp);
            if before.is_empty() && after.is_empty() {
                continue;
            }
            let mut cross = before;
            cross.push(l);
            cross.extend(after);
            if !dict.contains(&cross) {
                return Err(PlacementError::InvalidCrossWord { word: spell(&cross) });
            }
        }
    }

    Ok(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrabble::util::Direction;

    fn setup() -> (Dictionary, ScrabbleBoard) {
        let dict = Dictionary::from_words(["CAT", "CATS", "AT", "TA", "TAT", "ACT", "SAT"]).unwrap();
        let board = ScrabbleBoard::from_rows(&[
            ".....", //
            ".....", //
            ".CAT.", //
            ".....", //
            ".....",
        ])
        .unwrap();
        (dict, board)
    }

    fn check(
        word: &str,
        row: usize,
        col: usize,
        dir: Direction,
        rack: &str,
    ) -> Result<Vec<Letter>, PlacementError> {
        let (dict, board) = setup();
        let rack: Rack = rack.parse().unwrap();
        let m = Placement::new(word, Position::new(row, col), dir);
        validate_placement(&dict, &board, &rack, &m, CrossCheck::Enforce)
    }

    fn letters(s: &str) -> Vec<Letter> {
        s.chars().filter_map(Letter::from_char).collect()
    }

    #[test]
    fn test_legal_moves() {
        assert_eq!(check("CATS", 2, 1, Direction::Across, "S"), Ok(letters("S")));
        assert_eq!(check("AT", 1, 3, Direction::Down, "A"), Ok(letters("A")));
        assert_eq!(check("TAT", 0, 3, Direction::Down, "TAQ"), Ok(letters("TA")));
    }

    #[test]
    fn test_cross_words() {
        assert_eq!(
            check("SAT", 3, 0, Direction::Across, "AST"),
            Err(PlacementError::InvalidCrossWord { word: "CA".into() })
        );
        let (dict, board) = setup();
        let m = Placement::new("SAT", Position::new(3, 0), Direction::Across);
        let rack: Rack = "AST".parse().unwrap();
        assert_eq!(
            validate_placement(&dict, &board, &rack, &m, CrossCheck::Ignore),
            Ok(letters("SAT"))
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            check("DOG", 0, 0, Direction::Across, "DOG"),
            Err(PlacementError::NotInDictionary { word: "DOG".into() })
        );
        assert_eq!(
            check("C4T", 0, 0, Direction::Across, "CT"),
            Err(PlacementError::InvalidLetter { ch: '4' })
        );
        assert_eq!(
            check("CATS", 4, 3, Direction::Across, "CATS"),
            Err(PlacementError::OutOfBounds {
                pos: Position::new(4, 5)
            })
        );
        assert_eq!(
            check("AT", 2, 2, Direction::Across, ""),
            Err(PlacementError::Abuts {
                pos: Position::new(2, 1)
            })
        );
        assert_eq!(
            check("CAT", 2, 1, Direction::Across, ""),
            Err(PlacementError::NoTilesPlaced)
        );
        assert_eq!(
            check("TA", 2, 1, Direction::Across, "TA"),
            Err(PlacementError::Conflict {
                pos: Position::new(2, 1),
                existing: Letter::from_char('C').unwrap(),
                placed: Letter::from_char('T').unwrap(),
            })
        );
        assert_eq!(
            check("CATS", 2, 1, Direction::Across, "Z"),
            Err(PlacementError::MissingLetters {
                missing: letters("S")
            })
        );
        assert_eq!(
            check("TA", 0, 0, Direction::Across, "TA"),
            Err(PlacementError::NotConnected)
        );
    }

    #[test]
    fn test_first_move_covers_center() {
        let (dict, _) = setup();
        let board = ScrabbleBoard::empty(5);
        let rack: Rack = "CAT".parse().unwrap();
        let off = Placement::new("AT", Position::new(0, 0), Direction::Across);
        assert_eq!(
            validate_placement(&dict, &board, &rack, &off, CrossCheck::Enforce),
            Err(PlacementError::MissesCenter {
                center: Position::new(2, 2)
            })
        );
        let on = Placement::new("CAT", Position::new(0, 2), Direction::Down);
        assert!(validate_placement(&dict, &board, &rack, &on, CrossCheck::Enforce).is_ok());
    }
}
