//! Connected-component extraction of same-valued regions
//!
//! An [`Object`] is a maximal 4-connected set of cells sharing one non-zero
//! value. Objects are derived views of the grid that produced them and are
//! recomputed whenever the grid changes.

use bitvec::prelude::*;
use ndarray::Array2;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::grid::model::{BACKGROUND, Cell, Grid, Value};

/// Inclusive axis-aligned bounding box in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    /// Top-left corner (inclusive)
    pub min: Cell,
    /// Bottom-right corner (inclusive)
    pub max: Cell,
}

impl BoundingBox {
    /// Smallest box containing every cell, `None` for an empty slice
    pub fn enclosing(cells: &[Cell]) -> Option<Self> {
        let first = cells.first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for cell in cells {
            bounds.min.row = bounds.min.row.min(cell.row);
            bounds.min.col = bounds.min.col.min(cell.col);
            bounds.max.row = bounds.max.row.max(cell.row);
            bounds.max.col = bounds.max.col.max(cell.col);
        }
        Some(bounds)
    }

    /// Check if a cell is within the bounds
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row >= self.min.row
            && cell.row <= self.max.row
            && cell.col >= self.min.col
            && cell.col <= self.max.col
    }

    /// Number of rows covered
    pub const fn height(&self) -> usize {
        self.max.row - self.min.row + 1
    }

    /// Number of columns covered
    pub const fn width(&self) -> usize {
        self.max.col - self.min.col + 1
    }

    /// Dimensions as (height, width)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.height(), self.width())
    }
}

/// A 4-connected region of one non-zero value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    /// Shared value of every cell
    pub value: Value,
    /// Member cells in row-major order
    pub cells: Vec<Cell>,
    /// Tight bounding box
    pub bounds: BoundingBox,
    /// Centroid as (row, col)
    pub center: (f64, f64),
}

impl Object {
    fn from_cells(value: Value, mut cells: Vec<Cell>) -> Option<Self> {
        cells.sort_unstable();
        let bounds = BoundingBox::enclosing(&cells)?;
        let count = cells.len() as f64;
        let (row_sum, col_sum) = cells.iter().fold((0.0, 0.0), |(r, c), cell| {
            (r + cell.row as f64, c + cell.col as f64)
        });
        Some(Self {
            value,
            cells,
            bounds,
            center: (row_sum / count, col_sum / count),
        })
    }

    /// Number of member cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Bounding box dimensions as (height, width)
    pub const fn dimensions(&self) -> (usize, usize) {
        self.bounds.dimensions()
    }

    /// Check cell membership
    pub fn contains(&self, cell: Cell) -> bool {
        self.bounds.contains(cell) && self.cells.binary_search(&cell).is_ok()
    }
}

/// Extract all objects in the order their seed cell is reached by a row-major scan
///
/// Each non-background cell belongs to exactly one object. Runs in O(H·W)
/// time with one visited bit per cell.
pub fn extract_objects(grid: &Grid) -> Vec<Object> {
    let (rows, cols) = grid.dimensions();
    let array = grid.as_array();
    let mut visited = bitvec![0; rows * cols];
    let mut objects = Vec::new();

    for (seed, value) in grid.iter_cells() {
        if value == BACKGROUND || is_visited(&visited, seed, cols) {
            continue;
        }
        let cells = flood_fill(array, &mut visited, seed, value);
        if let Some(object) = Object::from_cells(value, cells) {
            objects.push(object);
        }
    }

    objects
}

fn is_visited(visited: &BitVec, cell: Cell, cols: usize) -> bool {
    visited.get(cell.row * cols + cell.col).as_deref() == Some(&true)
}

// Iterative so large regions cannot exhaust the stack
fn flood_fill(array: &Array2<Value>, visited: &mut BitVec, seed: Cell, value: Value) -> Vec<Cell> {
    let (rows, cols) = array.dim();
    let mut stack = vec![seed];
    let mut cells = Vec::new();
    visited.set(seed.row * cols + seed.col, true);

    while let Some(cell) = stack.pop() {
        cells.push(cell);
        let neighbours = [
            cell.offset(1, 0),
            cell.offset(-1, 0),
            cell.offset(0, 1),
            cell.offset(0, -1),
        ];
        for next in neighbours.into_iter().flatten() {
            if next.row >= rows || next.col >= cols || is_visited(visited, next, cols) {
                continue;
            }
            if array.get((next.row, next.col)).copied() == Some(value) {
                visited.set(next.row * cols + next.col, true);
                stack.push(next);
            }
        }
    }

    cells
}

/// Tight bounding-box slice of `grid` with every non-member cell zeroed
pub fn object_subgrid(grid: &Grid, object: &Object) -> Grid {
    let origin = object.bounds.min;
    let array = Array2::from_shape_fn(object.dimensions(), |(r, c)| {
        let cell = Cell::new(origin.row + r, origin.col + c);
        if object.contains(cell) {
            grid.get(cell).unwrap_or(BACKGROUND)
        } else {
            BACKGROUND
        }
    });
    Grid::from_valid(array)
}

/// Write the non-background cells of a subgrid back at its bounding-box origin
///
/// Background cells of `subgrid` leave `target` untouched, so re-embedding an
/// object's subgrid into any grid reproduces exactly that object's cells.
pub fn embed_subgrid(target: &Grid, subgrid: &Grid, origin: Cell) -> Grid {
    let members: BTreeMap<Cell, Value> = subgrid
        .iter_cells()
        .filter(|&(_, value)| value != BACKGROUND)
        .map(|(cell, value)| (Cell::new(origin.row + cell.row, origin.col + cell.col), value))
        .collect();
    target.map_values(|cell, current| members.get(&cell).copied().unwrap_or(current))
}
