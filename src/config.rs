// File: src/config.rs
use crate::core::grid::GridCaps;
use crate::core::types::{DisplayMode, LetterOrder, ALPHABET};
use crate::error::{Result, SpellerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Session settings. Every field has a default, so a JSON file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_rows: usize,
    pub max_cols: usize,
    /// Length of the top-K suggestions view.
    pub max_suggestions: usize,
    /// Start with letters restricted to those that continue a known word.
    pub restricted: bool,
    pub letter_order: LetterOrder,
    pub display_mode: DisplayMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rows: 6,
            max_cols: 5,
            max_suggestions: 5,
            restricted: true,
            letter_order: LetterOrder::Alphabetical,
            display_mode: DisplayMode::Clearing,
        }
    }
}

impl EngineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn caps(&self) -> GridCaps {
        GridCaps::new(self.max_rows, self.max_cols)
    }

    /// A clearing grid lays the whole alphabet out at exactly the capped
    /// shape, so the caps must hold 26 cells.
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 || self.max_cols == 0 {
            return Err(SpellerError::InvalidConfig(format!(
                "grid caps must be non-zero (got {}x{})",
                self.max_rows, self.max_cols
            )));
        }
        if self.max_rows * self.max_cols < ALPHABET.len() {
            return Err(SpellerError::InvalidConfig(format!(
                "a {}x{} grid cannot hold {} letters",
                self.max_rows,
                self.max_cols,
                ALPHABET.len()
            )));
        }
        Ok(())
    }
}
