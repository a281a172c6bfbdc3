// Prints the grid shape produced for every letter count under given caps.
// Run with: cargo run --bin grid_preview -- [max_rows] [max_cols]
use speller_core::core::grid::grid_dimensions;
use speller_core::core::types::ALPHABET;
use speller_core::{make_grid, Cell, GridCaps};

fn main() {
    let mut args = std::env::args().skip(1).map(|a| a.parse::<usize>());
    let defaults = GridCaps::default();
    let max_rows = args.next().and_then(Result::ok).unwrap_or(defaults.max_rows);
    let max_cols = args.next().and_then(Result::ok).unwrap_or(defaults.max_cols);
    let caps = GridCaps::new(max_rows, max_cols);

    for size in 0..=ALPHABET.len() {
        let cells: Vec<Cell> = ALPHABET[..size].iter().copied().map(Cell::Letter).collect();
        let (rows, cols) = grid_dimensions(size, caps);
        println!("{:>2} letters => {}x{}", size, rows, cols);
        for row in make_grid(&cells, caps).iter_rows() {
            let line: Vec<String> = row.iter().map(Cell::to_string).collect();
            println!("     {}", line.join(" "));
        }
    }
}
