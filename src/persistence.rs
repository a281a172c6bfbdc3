// File: src/persistence.rs
use crate::core::dictionary::{Dictionary, WordEntry};
use crate::error::{Result, SpellerError};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a built dictionary: entries in canonical order.
#[derive(serde::Serialize, serde::Deserialize)]
struct DictionarySnapshot {
    version: u32,
    entries: Vec<WordEntry>,
}

/// Writes a dictionary snapshot. The file is replaced atomically, so a
/// crash mid-write never leaves a truncated snapshot behind.
pub fn save_dictionary(dictionary: &Dictionary, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let snapshot = DictionarySnapshot {
        version: SNAPSHOT_VERSION,
        entries: dictionary.entries().to_vec(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| SpellerError::Io(e.error))?;
    info!("Saved {} words to {}", dictionary.len(), path.display());
    Ok(())
}

pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: DictionarySnapshot = bincode::deserialize_from(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SpellerError::SnapshotVersion {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    // Rebuilt rather than trusted: invalid words and zero counts are dropped,
    // duplicates summed and the canonical order restored.
    let stored = snapshot.entries.len();
    let dictionary = Dictionary::from_frequencies(
        snapshot.entries.into_iter().map(|entry| (entry.word, entry.frequency)),
    );
    if dictionary.len() != stored {
        warn!(
            "Snapshot {} held {} entries, {} remain after validation",
            path.display(),
            stored,
            dictionary.len()
        );
    }
    info!("Loaded {} words from {}", dictionary.len(), path.display());
    Ok(dictionary)
}

/// Loads a snapshot if one is readable, otherwise builds with `build`.
pub fn load_or_build<F>(path: &Path, build: F) -> Result<Dictionary>
where
    F: FnOnce() -> Result<Dictionary>,
{
    match load_dictionary(path) {
        Ok(dictionary) => Ok(dictionary),
        Err(e) => {
            warn!("Could not read snapshot {}: {}; rebuilding", path.display(), e);
            build()
        }
    }
}
