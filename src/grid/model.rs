//! Validated rectangular grids of small non-negative integers
//!
//! A [`Grid`] is validated once at construction and is immutable afterwards:
//! every transformation returns a new grid. Downstream components rely on the
//! invariant (at least one row, all rows the same non-zero length) without
//! re-checking it.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::grid::geometry::{self, FlipAxis, PositionCategory, Rotation};
use crate::io::error::{GridDefect, InferenceError, Result};

/// Cell value; 0 is background
pub type Value = u8;

/// Background (empty) value
pub const BACKGROUND: Value = 0;

/// Row-major (row, column) coordinate, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed offset, `None` if the result would be negative
    pub fn offset(self, d_row: i64, d_col: i64) -> Option<Self> {
        let row = usize::try_from(self.row as i64 + d_row).ok()?;
        let col = usize::try_from(self.col as i64 + d_col).ok()?;
        Some(Self { row, col })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable rectangular grid with at least one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Value>>", into = "Vec<Vec<Value>>")]
pub struct Grid {
    cells: Array2<Value>,
}

impl Grid {
    /// Build a grid from rows, rejecting empty or ragged input
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MalformedGrid`] if there are no rows, the
    /// rows are empty, or any row length differs from the first
    pub fn new(rows: Vec<Vec<Value>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).ok_or(GridDefect::Empty)?;
        if width == 0 {
            return Err(GridDefect::EmptyRow.into());
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridDefect::Ragged {
                row,
                expected: width,
                found,
            }
            .into());
        }

        let height = rows.len();
        let flat: Vec<Value> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), flat).map_err(|error| {
            InferenceError::Computation {
                operation: "grid construction",
                reason: error.to_string(),
            }
        })?;
        Ok(Self { cells })
    }

    /// Wrap an existing array, rejecting arrays with a zero dimension
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MalformedGrid`] if either dimension is zero
    pub fn from_array(cells: Array2<Value>) -> Result<Self> {
        match cells.dim() {
            (0, _) => Err(GridDefect::Empty.into()),
            (_, 0) => Err(GridDefect::EmptyRow.into()),
            _ => Ok(Self { cells }),
        }
    }

    /// Build a grid of one value
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MalformedGrid`] if either dimension is zero
    pub fn filled(rows: usize, cols: usize, value: Value) -> Result<Self> {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    // Callers guarantee non-zero dimensions (derived from a valid grid)
    pub(crate) const fn from_valid(cells: Array2<Value>) -> Self {
        Self { cells }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Value at a cell, `None` when out of bounds
    pub fn get(&self, cell: Cell) -> Option<Value> {
        self.cells.get((cell.row, cell.col)).copied()
    }

    /// Underlying array view
    pub const fn as_array(&self) -> &Array2<Value> {
        &self.cells
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array2<Value> {
        self.cells
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Every cell with its value in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (Cell, Value)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &value)| (Cell::new(row, col), value))
    }

    /// Cells holding `value` in row-major order
    pub fn cells_with(&self, value: Value) -> Vec<Cell> {
        self.iter_cells()
            .filter(|&(_, v)| v == value)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Distinct values present, ascending
    pub fn distinct_values(&self) -> BTreeSet<Value> {
        self.cells.iter().copied().collect()
    }

    /// Number of non-background cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != BACKGROUND).count()
    }

    /// Border category of a cell within this grid
    pub fn position_category(&self, cell: Cell) -> PositionCategory {
        PositionCategory::of(cell.row, cell.col, self.dimensions())
    }

    /// Counter-clockwise rotation
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        Self::from_valid(geometry::rotate(&self.cells, rotation))
    }

    /// Mirror image across `axis`
    #[must_use]
    pub fn flipped(&self, axis: FlipAxis) -> Self {
        Self::from_valid(geometry::flip(&self.cells, axis))
    }

    /// Block-replicated copy, each cell becoming `factor`×`factor`
    #[must_use]
    pub fn scaled(&self, factor: usize) -> Self {
        Self::from_valid(geometry::upscale(&self.cells, factor))
    }

    /// Copy with every value passed through `f`
    #[must_use]
    pub fn map_values(&self, f: impl Fn(Cell, Value) -> Value) -> Self {
        Self::from_valid(Array2::from_shape_fn(self.dimensions(), |(row, col)| {
            let cell = Cell::new(row, col);
            f(cell, self.get(cell).unwrap_or(BACKGROUND))
        }))
    }

    /// Copy with `patch` written at `origin`, clipped to the grid bounds
    #[must_use]
    pub fn with_patch(&self, patch: &Self, origin: Cell) -> Self {
        let mut cells = self.cells.clone();
        for (cell, value) in patch.iter_cells() {
            let target = (origin.row + cell.row, origin.col + cell.col);
            if let Some(slot) = cells.get_mut(target) {
                *slot = value;
            }
        }
        Self::from_valid(cells)
    }

    /// Copy with each listed cell set to `value`; out-of-bounds cells are ignored
    #[must_use]
    pub fn with_cells(&self, cells: &[Cell], value: Value) -> Self {
        let mut array = self.cells.clone();
        for cell in cells {
            if let Some(slot) = array.get_mut((cell.row, cell.col)) {
                *slot = value;
            }
        }
        Self::from_valid(array)
    }
}

impl TryFrom<Vec<Vec<Value>>> for Grid {
    type Error = InferenceError;

    fn try_from(rows: Vec<Vec<Value>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<Grid> for Vec<Vec<Value>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
