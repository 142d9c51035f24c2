use std::fmt;

use crate::scrabble::util::{Letter, ALPHABET_SIZE};

const ALL_LETTERS: u32 = (1 << ALPHABET_SIZE) - 1;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    // bit is one if letter is in it
    accepted: u32,
}

impl LetterSet {
    pub fn empty() -> Self {
        Self { accepted: 0 }
    }
    pub fn any() -> Self {
        Self {
            accepted: ALL_LETTERS,
        }
    }
    pub fn contains(&self, letter: Letter) -> bool {
        self.accepted & (1 << letter.as_index()) != 0
    }
    pub fn insert(&mut self, letter: Letter) {
        self.accepted |= 1 << letter.as_index()
    }
    pub fn intersect(self, other: LetterSet) -> LetterSet {
        Self {
            accepted: self.accepted & other.accepted,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.accepted == 0
    }
    pub fn is_any(&self) -> bool {
        self.accepted == ALL_LETTERS
    }
    pub fn len(&self) -> usize {
        self.accepted.count_ones() as usize
    }
    /// Members in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = Letter> {
        let accepted = self.accepted;
        Letter::all().filter(move |l| accepted & (1 << l.as_index()) != 0)
    }
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::FromIterator<Letter> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Letter>,
    {
        let mut tmp = Self::default();
        iter.into_iter().for_each(|l| tmp.insert(l));
        tmp
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_any() {
            write!(f, ".")
        } else {
            write!(f, "[")?;
            for l in self.iter() {
                write!(f, "{}", l)?;
            }
            write!(f, "]")
        }
    }
}
