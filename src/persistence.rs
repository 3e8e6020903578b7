// src/persistence.rs
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;
use crate::storage::MemoryStore;

/// Writes the store as compact binary. The write goes to a temp file in
/// the target directory first and is atomically persisted over `path`, so
/// a crash mid-write never leaves a truncated model behind.
pub fn save_to_disk(store: &MemoryStore, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, store)?;

    temp_file.persist(path).map_err(std::io::Error::from)?;
    debug!(path = %path.display(), "model saved");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<MemoryStore> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let store = bincode::deserialize_from(reader)?;
    Ok(store)
}

/// Human-readable export of the same state, for inspection and for
/// interchange with tooling that cannot read the binary form.
pub fn save_json(store: &MemoryStore, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    serde_json::to_writer_pretty(writer, store)?;

    temp_file.persist(path).map_err(std::io::Error::from)?;
    Ok(())
}

pub fn load_json(path: &Path) -> Result<MemoryStore> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let store = serde_json::from_reader(reader)?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;

    #[test]
    fn binary_roundtrip_preserves_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let mut store = MemoryStore::new();
        store.upsert("spam", "buy");
        store.upsert("ham", "meeting");
        save_to_disk(&store, &path).unwrap();

        let loaded = load_from_disk(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn json_roundtrip_preserves_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut store = MemoryStore::new();
        store.upsert("spam", "buy");
        save_json(&store, &path).unwrap();

        let loaded = load_json(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn loading_a_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_disk(&dir.path().join("absent.bin")).is_err());
    }
}
