use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constraint::letter_set::LetterSet;
use super::util::{parse_word, Letter, ALPHABET_SIZE};
use crate::error::Result;
use crate::utils::serialization;

/// Index of the root node in the arena
const ROOT: u32 = 0;

/// Prefix tree node. Children are arena indices; the root is never a child,
/// so a zero-free id doubles as the "no edge" marker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TrieNode {
    next: [Option<NonZeroU32>; ALPHABET_SIZE],
    terminal: bool,
}

/// Word automaton used by the move generator. A plain trie stored in an arena:
/// every word is exactly one accepting path from the root and no path ever
/// revisits a node.
///
/// Words go in through `&mut self` and queries come out through `&self`, so
/// construction always finishes before the dictionary is shared with a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionary {
    nodes: Vec<TrieNode>,
    n_words: usize,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            n_words: 0,
        }
    }

    /// Builds a dictionary from a list of words. Fails on the first word with a
    /// character outside `A..=Z`
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for w in words {
            dict.insert(w.as_ref())?;
        }
        Ok(dict)
    }

    /// Adds a word to the automaton. Returns whether the word was new.
    /// The empty word is ignored.
    pub fn insert(&mut self, word: &str) -> Result<bool> {
        let letters = parse_word(word)?;
        Ok(self.insert_letters(&letters))
    }

    pub fn insert_letters(&mut self, word: &[Letter]) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut curr = ROOT;
        for &l in word {
            curr = match self.nodes[curr as usize].next[l.as_index()] {
                Some(id) => id.get(),
                None => {
                    let id = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[curr as usize].next[l.as_index()] = NonZeroU32::new(id);
                    id
                }
            };
        }
        let node = &mut self.nodes[curr as usize];
        if node.terminal {
            false
        } else {
            node.terminal = true;
            self.n_words += 1;
            true
        }
    }

    pub fn root(&self) -> State<'_> {
        State {
            dict: self,
            id: ROOT,
        }
    }

    /// Follows `prefix` from the root. `None` if some letter has no edge or the
    /// prefix holds a character outside the alphabet
    pub fn state_after(&self, prefix: &str) -> Option<State<'_>> {
        prefix
            .chars()
            .try_fold(self.root(), |s, c| s.next(Letter::from_char(c)?))
    }

    pub fn state_after_letters(&self, prefix: &[Letter]) -> Option<State<'_>> {
        self.root().walk(prefix)
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.state_after(word).is_some_and(|s| s.is_accepting())
    }

    pub fn contains(&self, word: &[Letter]) -> bool {
        self.state_after_letters(word)
            .is_some_and(|s| s.is_accepting())
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.n_words
    }

    pub fn is_empty(&self) -> bool {
        self.n_words == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All words in alphabetical order
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.n_words);
        let mut buf = String::new();
        self.collect_words(self.root(), &mut buf, &mut out);
        out
    }

    fn collect_words(&self, state: State, buf: &mut String, out: &mut Vec<String>) {
        if state.is_accepting() {
            out.push(buf.clone());
        }
        for l in state.edges().iter() {
            if let Some(next) = state.next(l) {
                buf.push(l.as_char());
                self.collect_words(next, buf, out);
                buf.pop();
            }
        }
    }

    /// Writes a bincode snapshot of the automaton
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        serialization::save_to_disk(self, path)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dict: Self = serialization::load_from_disk(path)?;
        log::info!(
            "Loaded dictionary snapshot with {} words ({} nodes)",
            dict.len(),
            dict.node_count()
        );
        Ok(dict)
    }
}

/// A position inside the automaton, borrowed from its dictionary
#[derive(Clone, Copy)]
pub struct State<'a> {
    dict: &'a Dictionary,
    id: u32,
}

impl<'a> State<'a> {
    fn node(&self) -> &'a TrieNode {
        &self.dict.nodes[self.id as usize]
    }

    /// Successor along the edge for `letter`
    pub fn next(self, letter: Letter) -> Option<State<'a>> {
        self.node().next[letter.as_index()].map(|id| State {
            dict: self.dict,
            id: id.get(),
        })
    }

    /// Follows every letter in turn
    pub fn walk(self, letters: &[Letter]) -> Option<State<'a>> {
        letters.iter().try_fold(self, |s, &l| s.next(l))
    }

    /// True when the path reaching this state spells a complete word
    pub fn is_accepting(&self) -> bool {
        self.node().terminal
    }

    /// Letters with an outgoing edge
    pub fn edges(&self) -> LetterSet {
        let node = self.node();
        Letter::all()
            .filter(|l| node.next[l.as_index()].is_some())
            .collect()
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dict, other.dict) && self.id == other.id
    }
}

impl Eq for State<'_> {}

impl fmt::Debug for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("accepting", &self.is_accepting())
            .field("edges", &self.edges())
            .finish()
    }
}
