//! Word list ingestion. Lists are read one word per line, normalised, and
//! funnelled through an `fst::Set` so the automaton is fed every word once, in
//! order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fst::{IntoStreamer, Set, SetBuilder, Streamer};

use super::dictionary::Dictionary;
use super::util::Letter;
use crate::config::LexiconConfig;
use crate::error::Result;

/// Reads a word list. Words are uppercased, entries shorter than the configured
/// minimum are dropped, and entries with characters outside `A..=Z` are skipped
/// with a warning. The result is sorted and free of duplicates
pub fn read_words<R: BufRead>(reader: R, config: &LexiconConfig) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let word = line.trim().to_uppercase();
        if word.chars().count() < config.min_word_len.max(1) {
            continue;
        }
        if let Some(bad) = word.chars().find(|&c| Letter::from_char(c).is_none()) {
            log::warn!("Skipping {:?} on line {}: {:?} is not a letter", word, i + 1, bad);
            continue;
        }
        words.push(word);
    }

    words.sort_unstable();
    words.dedup();
    log::debug!("Read {} words", words.len());
    Ok(words)
}

/// Builds the compact word set. `words` must be sorted and deduplicated
pub fn build_word_set<I, S>(words: I) -> Result<Set<Vec<u8>>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut build = SetBuilder::memory();
    build.extend_iter(words)?;
    Ok(build.into_set())
}

/// Streams every word of the set into a fresh automaton
pub fn dictionary_from_set<D: AsRef<[u8]>>(set: &Set<D>) -> Result<Dictionary> {
    let mut dict = Dictionary::new();
    let mut stream = set.into_stream();
    while let Some(word) = stream.next() {
        let letters = word
            .iter()
            .map(|&b| Letter::try_from(b as char))
            .collect::<Result<Vec<_>>>()?;
        dict.insert_letters(&letters);
    }
    Ok(dict)
}

/// Reads a word list file into a dictionary
pub fn load_dictionary<P: AsRef<Path>>(path: P, config: &LexiconConfig) -> Result<Dictionary> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let words = read_words(reader, config)?;
    let set = build_word_set(&words)?;
    let dict = dictionary_from_set(&set)?;
    log::info!(
        "Loaded {} words from {} ({} automaton states)",
        dict.len(),
        path.as_ref().display(),
        dict.node_count()
    );
    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    const LIST: &str = "zebra\nCat\n\n  dog  \na\ncat\nnaïve\nqi\n";

    #[test]
    fn test_read_words() {
        let words = read_words(Cursor::new(LIST), &LexiconConfig::default()).unwrap();
        assert_eq!(words, vec!["CAT", "DOG", "QI", "ZEBRA"]);

        let longer = read_words(Cursor::new(LIST), &LexiconConfig { min_word_len: 3 }).unwrap();
        assert_eq!(longer, vec!["CAT", "DOG", "ZEBRA"]);

        let all = read_words(Cursor::new(LIST), &LexiconConfig { min_word_len: 0 }).unwrap();
        assert!(all.contains(&"A".to_string()));
    }

    #[test]
    fn test_word_set_into_dictionary() {
        let words = read_words(Cursor::new(LIST), &LexiconConfig::default()).unwrap();
        let set = build_word_set(&words).unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.contains("QI"));
        let dict = dictionary_from_set(&set).unwrap();
        assert_eq!(dict.words(), words);
    }

    #[test]
    fn test_unsorted_input_is_rejected() {
        assert!(matches!(
            build_word_set(["DOG", "CAT"]),
            Err(Error::WordSet(_))
        ));
    }

    #[test]
    fn test_load_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, LIST).unwrap();
        let dict = load_dictionary(&path, &LexiconConfig::default()).unwrap();
        assert!(dict.is_word("ZEBRA"));
        assert!(!dict.is_word("A"));
        assert!(matches!(
            load_dictionary(dir.path().join("missing.txt"), &LexiconConfig::default()),
            Err(Error::Io(_))
        ));
    }
}
