// File: src/error.rs
use thiserror::Error;

/// A rejected user choice. The engine state is untouched when one of these
/// is returned, so the caller should simply ask again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("row {row} is out of range (grid has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("column {col} is out of range (row has {cols} entries)")]
    ColumnOutOfRange { col: usize, cols: usize },

    #[error("cannot pick blank space at ({row}, {col})")]
    BlankSelected { row: usize, col: usize },

    #[error("'{0}' is not a letter a-z")]
    NotALetter(char),
}

impl SelectionError {
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            SelectionError::RowOutOfRange { .. } | SelectionError::ColumnOutOfRange { .. }
        )
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, SelectionError::BlankSelected { .. })
    }
}

/// Setup and I/O failures: loading corpora, configs and dictionary snapshots.
#[derive(Debug, Error)]
pub enum SpellerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot format version {found} is not supported (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub type Result<T, E = SpellerError> = std::result::Result<T, E>;
