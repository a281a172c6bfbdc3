// File: src/selection.rs
//! Ways a user can pick a letter. These only translate user choices into
//! grid coordinates; the engine never knows which one is in use.
use crate::core::grid::Grid;
use crate::core::speller::Speller;
use crate::core::types::DisplayMode;
use crate::error::SelectionError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMethod {
    /// Whole fixed grid shown; pick a row, then the letter's real column.
    Grid,
    /// Whole shrinking grid shown; pick a row, then the k-th visible letter.
    GridPoint,
    /// One row at a time; skip to the next row or pick the k-th visible letter.
    Point,
}

impl SelectionMethod {
    pub const ALL: [SelectionMethod; 3] =
        [SelectionMethod::Grid, SelectionMethod::GridPoint, SelectionMethod::Point];

    pub fn prompt(&self) -> &'static str {
        match self {
            SelectionMethod::Grid => "clear",
            SelectionMethod::GridPoint => "reduce",
            SelectionMethod::Point => "point",
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        match self {
            SelectionMethod::Grid => DisplayMode::Clearing,
            SelectionMethod::GridPoint | SelectionMethod::Point => DisplayMode::Shrinking,
        }
    }

    /// Maps `choice` within `row` to grid coordinates. For `Grid` the choice
    /// is a real column; otherwise it indexes the row's visible letters.
    pub fn resolve(&self, grid: &Grid, row: usize, choice: usize) -> Result<(usize, usize), SelectionError> {
        match self {
            SelectionMethod::Grid => {
                grid.cell(row, choice)?;
                Ok((row, choice))
            }
            SelectionMethod::GridPoint | SelectionMethod::Point => {
                let visible = grid.row_non_empty_indices(row)?;
                let col = visible.get(choice).copied().ok_or(SelectionError::ColumnOutOfRange {
                    col: choice,
                    cols: visible.len(),
                })?;
                Ok((row, col))
            }
        }
    }

    pub fn choose<S: Speller + ?Sized>(
        &self,
        speller: &mut S,
        row: usize,
        choice: usize,
    ) -> Result<char, SelectionError> {
        let (row, col) = self.resolve(speller.grid(), row, choice)?;
        speller.select_cell(row, col)
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt())
    }
}

impl FromStr for SelectionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.prompt() == s)
            .ok_or_else(|| format!("unknown method '{}', expected clear, reduce or point", s))
    }
}

/// Rows holding at least one letter.
pub fn selectable_rows(grid: &Grid) -> Vec<usize> {
    grid.iter_rows()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !cell.is_empty()))
        .map(|(idx, _)| idx)
        .collect()
}

/// Which row the point method is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointCursor {
    row: usize,
}

impl PointCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn reset(&mut self) {
        self.row = 0;
    }

    /// Moves to the next row with letters, wrapping past the last row.
    pub fn advance(&mut self, grid: &Grid) -> usize {
        let rows = selectable_rows(grid);
        self.row = rows
            .iter()
            .copied()
            .find(|&r| r > self.row)
            .or_else(|| rows.first().copied())
            .unwrap_or(0);
        self.row
    }

    /// Picks the k-th visible letter of the shown row and goes back to the
    /// first row, since the grid has been rebuilt.
    pub fn choose<S: Speller + ?Sized>(&mut self, speller: &mut S, choice: usize) -> Result<char, SelectionError> {
        let letter = SelectionMethod::Point.choose(speller, self.row, choice)?;
        self.reset();
        Ok(letter)
    }
}
