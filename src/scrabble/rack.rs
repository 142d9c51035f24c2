use std::fmt;
use std::str::FromStr;

use super::constraint::letter_set::LetterSet;
use super::util::{Letter, ALPHABET_SIZE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rack {
    /// Histogram count of each letter in the rack
    letters: [u8; ALPHABET_SIZE],
    /// The total number of letters in the rack
    n_total: u32,
}

impl Rack {
    pub fn new(letters: [u8; ALPHABET_SIZE]) -> Self {
        let n_total = letters.iter().map(|&i| i as u32).sum::<u32>();
        Self { letters, n_total }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self, letter: Letter) -> u8 {
        self.letters[letter.as_index()]
    }

    pub fn len(&self) -> u32 {
        self.n_total
    }

    pub fn is_empty(&self) -> bool {
        self.n_total == 0
    }

    /// Letters with at least one copy in the rack
    pub fn available(&self) -> LetterSet {
        Letter::all().filter(|&l| self.count(l) > 0).collect()
    }

    /// Adds one copy of a letter, failing when its count is already at the maximum
    pub fn try_add(&mut self, letter: Letter) -> Result<()> {
        let slot = &mut self.letters[letter.as_index()];
        *slot = slot
            .checked_add(1)
            .ok_or(Error::RackOverflow { letter })?;
        self.n_total += 1;
        Ok(())
    }

    /// Puts back a letter taken by `remove_inplace` when a search branch returns
    pub(crate) fn add_inplace(&mut self, letter: Letter) {
        self.letters[letter.as_index()] += 1;
        self.n_total += 1;
    }

    /// Does an in-place removal of the provided letter. Returns false, leaving the
    /// rack untouched, when no copy is left
    pub fn remove_inplace(&mut self, letter: Letter) -> bool {
        let slot = &mut self.letters[letter.as_index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        self.n_total -= 1;
        true
    }

    /// Checks whether the rack holds every letter of `needed`, counting repeats.
    /// On failure returns the letters that could not be drawn
    pub fn draw_all(&self, needed: &[Letter]) -> std::result::Result<(), Vec<Letter>> {
        let mut tmp = self.clone();
        let missing = needed
            .iter()
            .filter(|&&l| !tmp.remove_inplace(l))
            .copied()
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    pub fn get_letters(&self) -> Vec<Letter> {
        Letter::all()
            .flat_map(|l| std::iter::repeat(l).take(self.count(l) as usize))
            .collect()
    }
}

impl FromStr for Rack {
    type Err = Error;

    /// Parses a rack such as `"AEINRST"`. Whitespace is ignored
    fn from_str(s: &str) -> Result<Self> {
        let mut rack = Self::empty();
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            rack.try_add(Letter::try_from(ch)?)?;
        }
        Ok(rack)
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for l in self.get_letters() {
            write!(f, "{}", l)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_parse_rack() {
        let rack: Rack = "tea t".parse().unwrap();
        assert_eq!(rack.len(), 4);
        assert_eq!(rack.count(l('T')), 2);
        assert_eq!(rack.to_string(), "AETT");
        assert!(matches!(
            "AB-".parse::<Rack>(),
            Err(Error::InvalidLetter { ch: '-' })
        ));
    }

    #[test]
    fn test_rack_count_limit() {
        let full: Rack = "A".repeat(255).parse().unwrap();
        assert_eq!(full.count(l('A')), 255);
        assert!(matches!(
            "A".repeat(256).parse::<Rack>(),
            Err(Error::RackOverflow { letter }) if letter == l('A')
        ));

        let mut rack = full.clone();
        assert!(rack.try_add(l('A')).is_err());
        assert_eq!(rack, full);
        assert!(rack.try_add(l('B')).is_ok());
        assert_eq!(rack.len(), 256);
    }

    #[test]
    fn test_inplace_backtracking() {
        let mut rack: Rack = "AAB".parse().unwrap();
        let original = rack.clone();
        assert!(rack.remove_inplace(l('A')));
        assert!(rack.remove_inplace(l('A')));
        assert!(!rack.remove_inplace(l('A')));
        assert_eq!(rack.len(), 1);
        rack.add_inplace(l('A'));
        rack.add_inplace(l('A'));
        assert_eq!(rack, original);
    }

    #[test]
    fn test_draw_all() {
        let rack: Rack = "STAR".parse().unwrap();
        assert!(rack.draw_all(&[l('R'), l('A'), l('T')]).is_ok());
        assert_eq!(rack.draw_all(&[l('T'), l('T'), l('Z')]), Err(vec![l('T'), l('Z')]));
        assert_eq!(rack.available().len(), 4);
    }
}
