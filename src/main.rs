#[macro_use]
extern crate text_io;

use std::path::Path;

use anyhow::Context;

use scrabble_movegen::scrabble::lexicon;
use scrabble_movegen::{Config, Dictionary, MoveGenerator, Rack, ScrabbleBoard};

/// Usage: scrabble-movegen [WORDS] [BOARD_JSON] [CONFIG_JSON]
///
/// WORDS is a word list with one word per line, or a `.bin` dictionary snapshot.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let words_path = args.next().unwrap_or_else(|| "words_small.txt".to_string());
    let board_path = args.next();
    let config = match args.next() {
        Some(path) => Config::from_file(&path).with_context(|| format!("reading config {}", path))?,
        None => Config::default(),
    };

    let dict = if Path::new(&words_path).extension().is_some_and(|e| e == "bin") {
        Dictionary::load(&words_path)
    } else {
        lexicon::load_dictionary(&words_path, &config.lexicon)
    }
    .with_context(|| format!("reading dictionary {}", words_path))?;
    println!("Number of Words: {}", dict.len());

    let board = match board_path {
        Some(path) => {
            ScrabbleBoard::from_file(&path).with_context(|| format!("reading board {}", path))?
        }
        None => ScrabbleBoard::empty(config.board_size),
    };
    print!("{}", board);

    let generator = MoveGenerator::new(&dict, &board, config.generator.clone());
    loop {
        println!("Enter Tray:");
        let tray: String = match try_read!("{}\n") {
            Ok(tray) => tray,
            Err(_) => break,
        };
        let tray = tray.trim();
        if tray.is_empty() {
            break;
        }
        let rack: Rack = match tray.parse() {
            Ok(rack) => rack,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let outcome = generator.search(&rack);
        let mut moves = outcome.moves.into_iter().collect::<Vec<_>>();
        // Longest words first, then alphabetical
        moves.sort_by(|a, b| b.word.len().cmp(&a.word.len()).then_with(|| a.cmp(b)));
        for m in moves.iter() {
            println!("{}", m);
        }
        println!("{} placements", moves.len());
        if outcome.truncated {
            println!("Search stopped early, the list may be incomplete");
        }
    }
    Ok(())
}
