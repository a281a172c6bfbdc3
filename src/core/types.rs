// src/core/types.rs
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The only symbols a word may contain.
pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// How a blank cell is rendered.
pub const EMPTY_SYMBOL: char = '_';

pub fn is_alphabet_letter(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// One grid cell: a selectable letter or the empty sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Letter(char),
    Empty,
}

impl Cell {
    pub fn letter(&self) -> Option<char> {
        match self {
            Cell::Letter(c) => Some(*c),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell::Letter(c)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Letter(c) => write!(f, "{}", c),
            Cell::Empty => write!(f, "{}", EMPTY_SYMBOL),
        }
    }
}

// Front ends get plain one-character strings, "_" for blanks.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which grid-rebuild strategy runs after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Fixed full-alphabet layout; ineligible letters are blanked in place.
    #[default]
    Clearing,
    /// Grid shrinks to hold only the eligible letters.
    Shrinking,
}

impl DisplayMode {
    pub fn includes_empty(&self) -> bool {
        matches!(self, DisplayMode::Clearing)
    }
}

/// Ordering of the letters that may follow the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterOrder {
    #[default]
    Alphabetical,
    /// Most likely next letter first; ties fall back to alphabetical.
    Frequency,
}
