// File: src/core/speller.rs
use crate::core::engine::{EngineView, WordEngine};
use crate::core::grid::Grid;
use crate::core::types::DisplayMode;
use crate::error::SelectionError;

/// What a front end needs from a spelling session. Presentation code
/// (terminal, line protocol, C callers) is written against this trait and
/// never against widget or engine internals.
pub trait Speller {
    /// Appends a letter directly, for front ends that do not go through
    /// grid coordinates.
    fn select_letter(&mut self, letter: char) -> Result<(), SelectionError>;
    fn select_cell(&mut self, row: usize, col: usize) -> Result<char, SelectionError>;
    fn undo(&mut self) -> Option<char>;
    fn reset(&mut self);
    fn toggle_unrestricted(&mut self) -> bool;
    fn set_display_mode(&mut self, mode: DisplayMode);
    /// Resolve the current word and start the next one.
    fn commit(&mut self) -> Option<String>;

    fn grid(&self) -> &Grid;
    fn prefix(&self) -> &str;
    fn suggestions(&self) -> Vec<&str>;
    fn candidate_count(&self) -> usize;
    fn is_done(&self) -> bool;
    fn view(&self) -> EngineView;
}

impl Speller for WordEngine {
    fn select_letter(&mut self, letter: char) -> Result<(), SelectionError> {
        WordEngine::select_letter(self, letter)
    }

    fn select_cell(&mut self, row: usize, col: usize) -> Result<char, SelectionError> {
        WordEngine::select_cell(self, row, col)
    }

    fn undo(&mut self) -> Option<char> {
        WordEngine::undo(self)
    }

    fn reset(&mut self) {
        WordEngine::reset(self)
    }

    fn toggle_unrestricted(&mut self) -> bool {
        WordEngine::toggle_unrestricted(self)
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        WordEngine::set_display_mode(self, mode)
    }

    fn commit(&mut self) -> Option<String> {
        WordEngine::commit(self)
    }

    fn grid(&self) -> &Grid {
        WordEngine::grid(self)
    }

    fn prefix(&self) -> &str {
        WordEngine::prefix(self)
    }

    fn suggestions(&self) -> Vec<&str> {
        WordEngine::suggestions(self)
    }

    fn candidate_count(&self) -> usize {
        WordEngine::candidate_count(self)
    }

    fn is_done(&self) -> bool {
        WordEngine::is_done(self)
    }

    fn view(&self) -> EngineView {
        WordEngine::view(self)
    }
}
