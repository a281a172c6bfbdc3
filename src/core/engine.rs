use crate::config::EngineConfig;
use crate::core::dictionary::{Dictionary, WordId};
use crate::core::grid::{make_grid, make_grid_exact, Grid};
use crate::core::types::{is_alphabet_letter, Cell, DisplayMode, LetterOrder, ALPHABET};
use crate::error::{Result, SelectionError};
use log::debug;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of scanning the dictionary for one prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixScan {
    /// Every word starting with the prefix, in dictionary order.
    pub candidates: Vec<WordId>,
    /// Summed frequency of the candidates, keyed by the letter that follows
    /// the prefix in them.
    pub next_letters: BTreeMap<char, u64>,
}

/// Scans the whole dictionary for words starting with `prefix`.
///
/// The scan always starts from the full dictionary rather than narrowing
/// the previous result, so shortening the prefix brings back every word a
/// longer prefix had filtered out. Cost is linear in dictionary size.
pub fn next_letter_frequency(dictionary: &Dictionary, prefix: &str) -> PrefixScan {
    let prefix = prefix.to_lowercase();
    let mut scan = PrefixScan::default();
    for (id, entry) in dictionary.iter().enumerate() {
        if !entry.word.starts_with(&prefix) {
            continue;
        }
        scan.candidates.push(id);
        if let Some(next) = entry.word[prefix.len()..].chars().next() {
            if is_alphabet_letter(next) {
                *scan.next_letters.entry(next).or_insert(0) += entry.frequency;
            }
        }
    }
    scan
}

/// Orders the letters of a next-letter table for display.
pub fn order_letters(next_letters: &BTreeMap<char, u64>, order: LetterOrder) -> Vec<char> {
    match order {
        LetterOrder::Alphabetical => next_letters.keys().copied().collect(),
        LetterOrder::Frequency => {
            let mut ranked: Vec<(char, u64)> = next_letters.iter().map(|(&c, &f)| (c, f)).collect();
            ranked.sort_by_key(|&(_, frequency)| Reverse(frequency));
            ranked.into_iter().map(|(c, _)| c).collect()
        }
    }
}

/// One word-entry session: the typed prefix, the words still consistent
/// with it, the letters that may come next and the grid that shows them.
///
/// Every mutation (select, undo, reset, mode change) re-runs the full
/// evaluation and rebuilds the grid before returning.
pub struct WordEngine {
    dictionary: Arc<Dictionary>,
    config: EngineConfig,
    prefix: String,
    candidates: Vec<WordId>,
    next_letters: BTreeMap<char, u64>,
    remaining: Vec<char>,
    grid: Grid,
    display_mode: DisplayMode,
    restricted: bool,
}

/// Read-only snapshot of an engine, for front ends outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineView {
    pub prefix: String,
    pub grid: Grid,
    pub suggestions: Vec<String>,
    pub candidate_count: usize,
    pub remaining_letters: Vec<char>,
    pub restricted: bool,
    pub display_mode: DisplayMode,
    pub done: bool,
}

impl WordEngine {
    /// Starts a session; fails when `config` caps cannot hold the alphabet.
    pub fn new(dictionary: Arc<Dictionary>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(dictionary, config))
    }

    pub fn with_defaults(dictionary: Dictionary) -> Self {
        Self::start(Arc::new(dictionary), EngineConfig::default())
    }

    fn start(dictionary: Arc<Dictionary>, config: EngineConfig) -> Self {
        let mut engine = Self {
            dictionary,
            prefix: String::new(),
            candidates: Vec::new(),
            next_letters: BTreeMap::new(),
            remaining: ALPHABET.to_vec(),
            grid: Grid::single_blank(),
            display_mode: config.display_mode,
            restricted: config.restricted,
            config,
        };
        engine.reset();
        engine
    }

    // --- Operations ---

    /// Appends `letter` to the prefix. Any letter `a`-`z` is accepted, even
    /// one no dictionary word continues with; that simply leaves no
    /// candidates.
    pub fn select_letter(&mut self, letter: char) -> Result<(), SelectionError> {
        let letter = letter.to_ascii_lowercase();
        if !is_alphabet_letter(letter) {
            return Err(SelectionError::NotALetter(letter));
        }
        self.prefix.push(letter);
        self.refresh();
        Ok(())
    }

    /// Appends the letter at `(row, col)` of the live grid.
    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<char, SelectionError> {
        let letter = self.grid.cell(row, col)?;
        self.prefix.push(letter);
        self.refresh();
        Ok(letter)
    }

    /// Drops the last letter of the prefix. Does nothing on an empty prefix.
    pub fn undo(&mut self) -> Option<char> {
        let removed = self.prefix.pop()?;
        self.refresh();
        Some(removed)
    }

    /// Starts a new word.
    pub fn reset(&mut self) {
        self.prefix.clear();
        self.refresh();
    }

    /// Flips between restricted and unrestricted letters. Returns true when
    /// the engine is now unrestricted.
    pub fn toggle_unrestricted(&mut self) -> bool {
        self.restricted = !self.restricted;
        self.refresh();
        !self.restricted
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        match mode {
            DisplayMode::Clearing => self.clear(),
            DisplayMode::Shrinking => self.shrink(),
        };
    }

    /// The word to commit for the current prefix: the prefix itself if it is
    /// a dictionary word, else the best candidate, else the raw prefix.
    pub fn resolve_word(&self) -> String {
        if self.dictionary.contains(&self.prefix) {
            return self.prefix.clone();
        }
        self.candidates()
            .next()
            .map_or_else(|| self.prefix.clone(), str::to_string)
    }

    /// Resolves the current word and starts a new one. `None` when nothing
    /// has been typed.
    pub fn commit(&mut self) -> Option<String> {
        if self.prefix.is_empty() {
            return None;
        }
        let word = self.resolve_word();
        debug!("Committing '{}' for prefix '{}'", word, self.prefix);
        self.reset();
        Some(word)
    }

    // --- Grid strategies ---

    /// Rebuilds a full-alphabet grid at the capped shape with every letter
    /// that cannot come next blanked in place, so letter positions never
    /// move within a word.
    pub fn clear(&mut self) -> &Grid {
        self.display_mode = DisplayMode::Clearing;
        let symbols: Vec<Cell> = ALPHABET
            .iter()
            .map(|&c| if self.remaining.contains(&c) { Cell::Letter(c) } else { Cell::Empty })
            .collect();
        self.grid = make_grid_exact(&symbols, self.config.caps());
        &self.grid
    }

    /// Rebuilds a grid holding only the letters that can come next.
    pub fn shrink(&mut self) -> &Grid {
        self.display_mode = DisplayMode::Shrinking;
        let symbols: Vec<Cell> = self.remaining.iter().copied().map(Cell::Letter).collect();
        self.grid = make_grid(&symbols, self.config.caps());
        &self.grid
    }

    fn refresh(&mut self) {
        self.evaluate();
        self.set_display_mode(self.display_mode);
    }

    fn evaluate(&mut self) {
        let scan = next_letter_frequency(&self.dictionary, &self.prefix);
        self.candidates = scan.candidates;
        self.next_letters = scan.next_letters;
        self.remaining = if self.restricted {
            order_letters(&self.next_letters, self.config.letter_order)
        } else {
            ALPHABET.to_vec()
        };
        debug!(
            "Evaluated prefix '{}': {} candidates, next letters {:?}",
            self.prefix,
            self.candidates.len(),
            self.remaining
        );
    }

    // --- Views ---

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// All candidates, most frequent first.
    pub fn candidates(&self) -> impl Iterator<Item = &str> + '_ {
        self.candidates
            .iter()
            .filter_map(|&id| self.dictionary.get(id))
            .map(|entry| entry.word.as_str())
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn top_candidates(&self, k: usize) -> Vec<&str> {
        self.candidates().take(k).collect()
    }

    /// The top-K view sized by `max_suggestions`.
    pub fn suggestions(&self) -> Vec<&str> {
        self.top_candidates(self.config.max_suggestions)
    }

    pub fn next_letter_frequency(&self) -> &BTreeMap<char, u64> {
        &self.next_letters
    }

    pub fn remaining_letters(&self) -> &[char] {
        &self.remaining
    }

    /// One candidate left, or no letter can extend the prefix.
    pub fn is_done(&self) -> bool {
        self.candidates.len() == 1 || self.remaining.is_empty()
    }

    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn includes_empty(&self) -> bool {
        self.display_mode.includes_empty()
    }

    pub fn row(&self, row: usize) -> Result<&[Cell], SelectionError> {
        self.grid.row(row)
    }

    pub fn row_non_empty(&self, row: usize) -> Result<Vec<char>, SelectionError> {
        self.grid.row_non_empty(row)
    }

    pub fn row_non_empty_indices(&self, row: usize) -> Result<Vec<usize>, SelectionError> {
        self.grid.row_non_empty_indices(row)
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<char, SelectionError> {
        self.grid.cell(row, col)
    }

    pub fn view(&self) -> EngineView {
        EngineView {
            prefix: self.prefix.clone(),
            grid: self.grid.clone(),
            suggestions: self.suggestions().into_iter().map(str::to_string).collect(),
            candidate_count: self.candidates.len(),
            remaining_letters: self.remaining.clone(),
            restricted: self.restricted,
            display_mode: self.display_mode,
            done: self.is_done(),
        }
    }
}
