// File: src/core/sentence.rs
use serde::Serialize;

/// Words committed so far in the current sitting. Lives only as long as
/// the front end keeps it; nothing here is written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sentence {
    words: Vec<String>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a committed word. Empty words are ignored.
    pub fn push(&mut self, word: impl Into<String>) {
        let word = word.into();
        if !word.is_empty() {
            self.words.push(word);
        }
    }

    /// Removes and returns the last committed word.
    pub fn pop(&mut self) -> Option<String> {
        self.words.pop()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}
