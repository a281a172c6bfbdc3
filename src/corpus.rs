// File: src/corpus.rs
//! Word sources for dictionary construction. A source is any text; it is
//! split into lower-cased tokens and handed to `Dictionary::from_sources`,
//! which decides what counts as a word.
use crate::core::dictionary::Dictionary;
use crate::error::Result;
use log::info;
use std::fs;
use std::path::Path;

/// Built-in English word list so the engine works without external corpora.
const EMBEDDED_WORDS: &str = include_str!("../assets/words.txt");

/// Splits on whitespace, trims surrounding ASCII punctuation and lower-cases.
/// Inner punctuation is kept ("don't") so the dictionary can reject it.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Reads one text file as one source.
pub fn read_source(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let tokens: Vec<String> = tokenize(&text).collect();
    info!("Read {} tokens from {}", tokens.len(), path.display());
    Ok(tokens)
}

pub fn embedded_source() -> Vec<String> {
    tokenize(EMBEDDED_WORDS).collect()
}

/// Builds a dictionary from text files, or from the embedded list when no
/// paths are given.
pub fn dictionary_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Dictionary> {
    if paths.is_empty() {
        return Ok(Dictionary::from_words(embedded_source()));
    }
    let sources = paths
        .iter()
        .map(|path| read_source(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dictionary::from_sources(sources))
}
