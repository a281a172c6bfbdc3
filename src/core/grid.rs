// File: src/core/grid.rs
use crate::core::types::Cell;
use crate::error::SelectionError;
use log::warn;
use serde::{Deserialize, Serialize};

/// Upper bounds on grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCaps {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl GridCaps {
    pub fn new(max_rows: usize, max_cols: usize) -> Self {
        Self { max_rows, max_cols }
    }
}

impl Default for GridCaps {
    fn default() -> Self {
        Self::new(6, 5)
    }
}

/// Near-square `(rows, cols)` for `size` symbols under `caps`.
/// Columns are `ceil(sqrt(size))`, rows whatever is then needed; both capped.
pub fn grid_dimensions(size: usize, caps: GridCaps) -> (usize, usize) {
    let cols = ceil_sqrt(size).min(caps.max_cols);
    if cols == 0 {
        return (0, 0);
    }
    let rows = size.div_ceil(cols).min(caps.max_rows);
    (rows, cols)
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root < n {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}

/// Lays `symbols` out row-major into a grid sized by [`grid_dimensions`],
/// padding the last row with blanks. No symbols (or a zero cap) gives the
/// single-blank grid.
pub fn make_grid(symbols: &[Cell], caps: GridCaps) -> Grid {
    let (rows, cols) = grid_dimensions(symbols.len(), caps);
    if rows == 0 || cols == 0 {
        return Grid::single_blank();
    }
    if symbols.len() > rows * cols {
        warn!(
            "{} symbols do not fit a {}x{} grid, dropping {}",
            symbols.len(),
            rows,
            cols,
            symbols.len() - rows * cols
        );
    }

    fill_rows(symbols, rows, cols)
}

/// Lays `symbols` out row-major into exactly `caps.max_rows x caps.max_cols`
/// cells, whatever the symbol count. Used where the shape must not change
/// while symbols come and go.
pub fn make_grid_exact(symbols: &[Cell], caps: GridCaps) -> Grid {
    let (rows, cols) = (caps.max_rows, caps.max_cols);
    if rows == 0 || cols == 0 {
        return Grid::single_blank();
    }
    if symbols.len() > rows * cols {
        warn!(
            "{} symbols do not fit a {}x{} grid, dropping {}",
            symbols.len(),
            rows,
            cols,
            symbols.len() - rows * cols
        );
    }
    fill_rows(symbols, rows, cols)
}

fn fill_rows(symbols: &[Cell], rows: usize, cols: usize) -> Grid {
    let mut cells = symbols.iter().copied().chain(std::iter::repeat(Cell::Empty));
    let rows: Vec<Vec<Cell>> = (0..rows)
        .map(|_| cells.by_ref().take(cols).collect())
        .collect();
    Grid { rows }
}

/// A rectangular matrix of cells; every row has the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn single_blank() -> Self {
        Self { rows: vec![vec![Cell::Empty]] }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn max_dim(&self) -> usize {
        self.rows().max(self.cols())
    }

    /// True when no cell holds a letter.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(Cell::is_empty)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Letters in row-major order, blanks skipped.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.rows.iter().flatten().filter_map(Cell::letter)
    }

    pub fn row(&self, row: usize) -> Result<&[Cell], SelectionError> {
        self.rows
            .get(row)
            .map(Vec::as_slice)
            .ok_or(SelectionError::RowOutOfRange { row, rows: self.rows() })
    }

    /// Row `row` without its blanks.
    pub fn row_non_empty(&self, row: usize) -> Result<Vec<char>, SelectionError> {
        Ok(self.row(row)?.iter().filter_map(Cell::letter).collect())
    }

    /// Column indices of the non-blank cells of row `row`, so "the k-th
    /// visible letter" can be mapped back to a real column.
    pub fn row_non_empty_indices(&self, row: usize) -> Result<Vec<usize>, SelectionError> {
        Ok(self
            .row(row)?
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(idx, _)| idx)
            .collect())
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<char, SelectionError> {
        let entries = self.row(row)?;
        let cell = entries
            .get(col)
            .ok_or(SelectionError::ColumnOutOfRange { col, cols: entries.len() })?;
        cell.letter().ok_or(SelectionError::BlankSelected { row, col })
    }

    pub fn column(&self, col: usize) -> Result<Vec<Cell>, SelectionError> {
        if col >= self.cols() {
            return Err(SelectionError::ColumnOutOfRange { col, cols: self.cols() });
        }
        Ok(self.rows.iter().map(|row| row[col]).collect())
    }

    pub fn column_non_empty(&self, col: usize) -> Result<Vec<char>, SelectionError> {
        Ok(self.column(col)?.iter().filter_map(Cell::letter).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ALPHABET;

    fn letters(s: &str) -> Vec<Cell> {
        s.chars().map(Cell::Letter).collect()
    }

    #[test]
    fn empty_input_is_single_blank() {
        let grid = make_grid(&[], GridCaps::default());
        assert_eq!(grid, Grid::single_blank());
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert!(grid.is_blank());
    }

    #[test]
    fn zero_caps_are_degenerate() {
        let grid = make_grid(&letters("abc"), GridCaps::new(0, 5));
        assert_eq!(grid, Grid::single_blank());
        let grid = make_grid(&letters("abc"), GridCaps::new(5, 0));
        assert_eq!(grid, Grid::single_blank());
    }

    #[test]
    fn full_alphabet_fills_six_by_five() {
        let cells: Vec<Cell> = ALPHABET.iter().copied().map(Cell::Letter).collect();
        let grid = make_grid(&cells, GridCaps::new(6, 5));
        assert_eq!((grid.rows(), grid.cols()), (6, 5));
        assert_eq!(grid.row(5).unwrap(), &[Cell::Letter('z'), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]);
        assert_eq!(grid.letters().collect::<String>(), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn five_letters_get_three_columns() {
        let grid = make_grid(&letters("abcde"), GridCaps::new(6, 5));
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.row_non_empty(1).unwrap(), vec!['d', 'e']);
    }

    #[test]
    fn dimensions_follow_ceil_sqrt() {
        let caps = GridCaps::new(6, 5);
        for size in 1..=26 {
            let (rows, cols) = grid_dimensions(size, caps);
            let expected_cols = ((size as f64).sqrt().ceil() as usize).min(5);
            assert_eq!(cols, expected_cols, "size {}", size);
            assert!(rows * cols >= size, "size {} does not fit", size);
            assert!(rows <= 6);
        }
        assert_eq!(grid_dimensions(0, caps), (0, 0));
        assert_eq!(grid_dimensions(1, caps), (1, 1));
        assert_eq!(grid_dimensions(4, caps), (2, 2));
        assert_eq!(grid_dimensions(10, caps), (3, 4));
    }

    #[test]
    fn rows_are_uniform_and_capped() {
        let caps = GridCaps::new(3, 3);
        let cells: Vec<Cell> = ALPHABET.iter().copied().map(Cell::Letter).collect();
        for size in 0..=cells.len() {
            let grid = make_grid(&cells[..size], caps);
            let cols = grid.cols();
            assert!(grid.iter_rows().all(|row| row.len() == cols));
            if size > 0 {
                assert!(grid.rows() <= 3 && cols <= 3);
            }
        }
    }

    #[test]
    fn overflow_is_truncated() {
        let cells: Vec<Cell> = ALPHABET.iter().copied().map(Cell::Letter).collect();
        let grid = make_grid(&cells, GridCaps::new(2, 2));
        assert_eq!(grid.letters().collect::<String>(), "abcd");
    }

    #[test]
    fn exact_grid_keeps_cap_shape() {
        let grid = make_grid_exact(&letters("abc"), GridCaps::new(7, 7));
        assert_eq!((grid.rows(), grid.cols()), (7, 7));
        assert_eq!(grid.row_non_empty(0).unwrap(), vec!['a', 'b', 'c']);
        assert!(grid.row(6).unwrap().iter().all(Cell::is_empty));

        let cells: Vec<Cell> = ALPHABET.iter().copied().map(Cell::Letter).collect();
        let grid = make_grid_exact(&cells, GridCaps::new(4, 7));
        assert_eq!((grid.rows(), grid.cols()), (4, 7));
        assert_eq!(grid.letters().count(), 26);
        assert_eq!(make_grid_exact(&cells, GridCaps::new(0, 7)), Grid::single_blank());
    }

    #[test]
    fn non_empty_views_skip_blanks() {
        let cells = vec![Cell::Empty, Cell::Letter('b'), Cell::Empty, Cell::Letter('d')];
        let grid = make_grid(&cells, GridCaps::default());
        assert_eq!(grid.row_non_empty(0).unwrap(), vec!['b']);
        assert_eq!(grid.row_non_empty_indices(0).unwrap(), vec![1]);
        assert_eq!(grid.row_non_empty_indices(1).unwrap(), vec![1]);
        assert_eq!(grid.column_non_empty(1).unwrap(), vec!['b', 'd']);
        assert!(grid.column_non_empty(0).unwrap().is_empty());
    }

    #[test]
    fn cell_bounds_and_blanks() {
        let grid = make_grid(&letters("abcde"), GridCaps::default());
        assert_eq!(grid.cell(0, 2), Ok('c'));
        assert_eq!(
            grid.cell(0, 3),
            Err(SelectionError::ColumnOutOfRange { col: 3, cols: 3 })
        );
        assert!(grid.cell(0, 999).unwrap_err().is_out_of_range());
        assert_eq!(grid.cell(2, 0), Err(SelectionError::RowOutOfRange { row: 2, rows: 2 }));
        assert_eq!(grid.cell(1, 2), Err(SelectionError::BlankSelected { row: 1, col: 2 }));
        assert!(grid.column(3).unwrap_err().is_out_of_range());
    }

    #[test]
    fn serializes_as_strings() {
        let grid = make_grid(&letters("abc"), GridCaps::default());
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["a","b"],["c","_"]]"#);
    }
}
