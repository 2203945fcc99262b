//! Unit tests, one file per source file, mirroring the `src/` layout

mod hierarchy;

use gridrule::grid::Grid;

/// Build a grid from row literals
pub fn fixture(rows: &[&[u8]]) -> Grid {
    Grid::new(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
}
