use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bincode::Options;

use crate::error::Result;

fn options() -> impl Options {
    bincode::DefaultOptions::new().with_no_limit()
}

pub fn save_to_disk<T: Serialize, TPath: AsRef<Path>>(data: &T, path: TPath) -> Result<()> {
    // Write all bytes to the target file
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    options().serialize_into(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

pub fn load_from_disk<T: DeserializeOwned, TPath: AsRef<Path>>(path: TPath) -> Result<T> {
    // Open the file and read all bytes
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(options().deserialize_from(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.bin");
        let data = vec![(String::from("QI"), 2u8), (String::from("ZA"), 2u8)];
        save_to_disk(&data, &path).unwrap();
        let back: Vec<(String, u8)> = load_from_disk(&path).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_truncated_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word.bin");
        save_to_disk(&String::from("JEWEL"), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..3]).unwrap();
        let res: Result<String> = load_from_disk(&path);
        assert!(matches!(res, Err(crate::error::Error::Snapshot(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res: Result<Vec<u8>> = load_from_disk(dir.path().join("nope.bin"));
        assert!(matches!(res, Err(crate::error::Error::Io(_))));
    }
}
