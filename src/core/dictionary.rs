// File: src/core/dictionary.rs
use crate::core::types::is_alphabet_letter;
use log::info;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Position of a word in the dictionary's canonical (ranked) order.
pub type WordId = usize;

/// A word and the number of times it occurred across all sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub frequency: u64,
}

/// Immutable word -> frequency table, iterated most frequent first with
/// ties in lexicographic order. Built once and shared between sessions.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<WordEntry>,
    index: HashMap<String, WordId>,
}

/// Non-empty and made only of `a`-`z`.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_alphabet_letter)
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds from a single source of word tokens.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_sources(std::iter::once(words))
    }

    /// Builds from several sources. Every occurrence of a (lower-cased) word
    /// in any source adds one to its frequency; tokens with anything outside
    /// `a`-`z` are dropped.
    pub fn from_sources<I, W, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut rejected = 0usize;
        for source in sources {
            for token in source {
                let word = token.as_ref().to_lowercase();
                if is_valid_word(&word) {
                    *counts.entry(word).or_insert(0) += 1;
                } else {
                    rejected += 1;
                }
            }
        }
        let dictionary = Self::from_counts(counts);
        info!(
            "Built dictionary with {} distinct words ({} tokens rejected)",
            dictionary.len(),
            rejected
        );
        dictionary
    }

    /// Builds from explicit `(word, frequency)` pairs. Repeated words have
    /// their frequencies summed; invalid words and zero counts are dropped.
    pub fn from_frequencies<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for (word, frequency) in pairs {
            let word = word.as_ref().to_lowercase();
            if frequency > 0 && is_valid_word(&word) {
                *counts.entry(word).or_insert(0) += frequency;
            }
        }
        Self::from_counts(counts)
    }

    fn from_counts(counts: BTreeMap<String, u64>) -> Self {
        // BTreeMap iterates lexicographically and the sort is stable, so
        // equal frequencies stay in word order.
        let mut entries: Vec<WordEntry> = counts
            .into_iter()
            .map(|(word, frequency)| WordEntry { word, frequency })
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.frequency));
        Self::from_ranked(entries)
    }

    /// Takes entries already in canonical order.
    fn from_ranked(entries: Vec<WordEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(id, entry)| (entry.word.clone(), id))
            .collect();
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.entries.get(id)
    }

    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.word_id(word).map(|id| self.entries[id].frequency)
    }
}
