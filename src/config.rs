//! Runtime configuration, read from a JSON file. Every field has a default so a
//! partial (or empty) file is valid.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scrabble::BOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length of the square board
    pub board_size: usize,
    pub lexicon: LexiconConfig,
    pub generator: GeneratorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            lexicon: LexiconConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: Config = serde_json::from_reader(reader)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}

/// Word list ingestion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Shorter entries are dropped while reading a word list
    pub min_word_len: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self { min_word_len: 2 }
    }
}

/// Whether newly placed letters must also form valid perpendicular words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossCheck {
    /// Every perpendicular word formed by a new tile must be in the dictionary
    Enforce,
    /// Only the main word is checked
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub cross_checks: CrossCheck,
    /// Fan anchors out over the rayon pool
    pub parallel: bool,
    /// Maximum number of extension steps before the search gives up
    pub step_budget: Option<u64>,
    /// Wall-clock limit for one search, in milliseconds. The clock is read once
    /// every 256 steps, so a search shorter than that always runs to the end
    pub time_limit_ms: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cross_checks: CrossCheck::Enforce,
            parallel: true,
            step_budget: None,
            time_limit_ms: None,
        }
    }
}

impl GeneratorConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
