//! Spatial arrangement of each value's cells

use serde::Serialize;

use crate::detection::catalog::DetectionResult;
use crate::grid::objects::BoundingBox;
use crate::grid::{BACKGROUND, Cell, Grid, Value};

/// Sign of a diagonal's slope in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalDirection {
    /// Rows and columns increase together
    Positive,
    /// Columns decrease as rows increase
    Negative,
}

/// An arrangement of all cells of one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpatialFinding {
    /// Every successive displacement is the same vector
    LinearArrangement {
        /// Value whose cells are arranged
        value: Value,
        /// Shared (row, col) displacement
        direction: (i64, i64),
        /// Number of cells
        count: usize,
    },
    /// Every successive displacement has equal, matching row and column magnitude
    DiagonalPattern {
        /// Value whose cells are arranged
        value: Value,
        /// Slope of the first displacement
        direction: DiagonalDirection,
        /// Number of cells
        count: usize,
    },
    /// The cells fill their bounding rectangle exactly
    RectangularArrangement {
        /// Value whose cells are arranged
        value: Value,
        /// Rectangle dimensions as (height, width)
        dimensions: (usize, usize),
        /// Top-left corner
        position: Cell,
    },
}

impl SpatialFinding {
    /// Subtype tag used in pattern type names
    pub const fn subtype(&self) -> &'static str {
        match self {
            Self::LinearArrangement { .. } => "linear_arrangement",
            Self::DiagonalPattern { .. } => "diagonal_pattern",
            Self::RectangularArrangement { .. } => "rectangular_arrangement",
        }
    }

    /// Value whose cells are arranged
    pub const fn value(&self) -> Value {
        match self {
            Self::LinearArrangement { value, .. }
            | Self::DiagonalPattern { value, .. }
            | Self::RectangularArrangement { value, .. } => *value,
        }
    }

    /// How regular the arrangement is, in [0, 1]
    ///
    /// Lines and diagonals grow more convincing with every cell; rectangles
    /// score by how close to square they are.
    pub fn regularity(&self) -> f64 {
        match self {
            Self::LinearArrangement { count, .. } | Self::DiagonalPattern { count, .. } => {
                if *count == 0 {
                    0.0
                } else {
                    (*count as f64 - 1.0) / *count as f64
                }
            }
            Self::RectangularArrangement { dimensions, .. } => {
                let (short, long) = if dimensions.0 <= dimensions.1 {
                    (dimensions.0, dimensions.1)
                } else {
                    (dimensions.1, dimensions.0)
                };
                if long == 0 {
                    0.0
                } else {
                    short as f64 / long as f64
                }
            }
        }
    }
}

/// Analyze the distribution of every non-background value with more than one cell
pub fn detect_spatial(grid: &Grid) -> DetectionResult<SpatialFinding> {
    let mut findings = Vec::new();

    for value in grid.distinct_values() {
        if value == BACKGROUND {
            continue;
        }
        let coords = grid.cells_with(value);
        if coords.len() < 2 {
            continue;
        }

        let displacements: Vec<(i64, i64)> = coords
            .windows(2)
            .filter_map(|pair| match pair {
                &[a, b] => Some((
                    b.row as i64 - a.row as i64,
                    b.col as i64 - a.col as i64,
                )),
                _ => None,
            })
            .collect();

        if let Some(&first) = displacements.first() {
            if displacements.iter().all(|&d| d == first) {
                findings.push(SpatialFinding::LinearArrangement {
                    value,
                    direction: first,
                    count: coords.len(),
                });
            }

            let magnitude = (first.0.abs(), first.1.abs());
            let diagonal = magnitude.0 == magnitude.1
                && displacements
                    .iter()
                    .all(|d| (d.0.abs(), d.1.abs()) == magnitude);
            if diagonal {
                let direction = if first.0 * first.1 > 0 {
                    DiagonalDirection::Positive
                } else {
                    DiagonalDirection::Negative
                };
                findings.push(SpatialFinding::DiagonalPattern {
                    value,
                    direction,
                    count: coords.len(),
                });
            }
        }

        if let Some(bounds) = BoundingBox::enclosing(&coords) {
            let (height, width) = bounds.dimensions();
            if height * width == coords.len() {
                findings.push(SpatialFinding::RectangularArrangement {
                    value,
                    dimensions: (height, width),
                    position: bounds.min,
                });
            }
        }
    }

    DetectionResult::new(findings)
}
