//! Block tiling detection
//!
//! A block anchored at the origin repeats horizontally when copies placed
//! side by side across the full width reproduce the top band of the grid, and
//! vertically when copies stacked down the full height reproduce the left band.

use ndarray::s;
use serde::Serialize;

use crate::detection::catalog::DetectionResult;
use crate::grid::{Grid, Value};

/// Direction a block is tiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatDirection {
    /// Copies placed left to right
    Horizontal,
    /// Copies placed top to bottom
    Vertical,
}

/// A block that tiles the grid along one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepetitionFinding {
    /// Tiling direction
    pub direction: RepeatDirection,
    /// Block contents as rows
    pub block: Vec<Vec<Value>>,
    /// Block dimensions as (height, width)
    pub block_size: (usize, usize),
    /// Number of copies along the direction
    pub repetitions: usize,
}

impl RepetitionFinding {
    /// Subtype tag used in pattern type names
    pub const fn subtype(&self) -> &'static str {
        match self.direction {
            RepeatDirection::Horizontal => "horizontal_repeat",
            RepeatDirection::Vertical => "vertical_repeat",
        }
    }
}

/// Try every block up to half the grid in each dimension
pub fn detect_repetition(grid: &Grid) -> DetectionResult<RepetitionFinding> {
    let array = grid.as_array();
    let (rows, cols) = grid.dimensions();
    let mut findings = Vec::new();

    for height in 1..=rows / 2 {
        for width in 1..=cols / 2 {
            let block = array.slice(s![..height, ..width]);
            let block_rows: Vec<Vec<Value>> = block
                .rows()
                .into_iter()
                .map(|row| row.to_vec())
                .collect();

            if cols % width == 0 {
                let repetitions = cols / width;
                let repeats = (0..cols)
                    .step_by(width)
                    .all(|start| array.slice(s![..height, start..start + width]) == block);
                if repeats {
                    findings.push(RepetitionFinding {
                        direction: RepeatDirection::Horizontal,
                        block: block_rows.clone(),
                        block_size: (height, width),
                        repetitions,
                    });
                }
            }

            if rows % height == 0 {
                let repetitions = rows / height;
                let repeats = (0..rows)
                    .step_by(height)
                    .all(|start| array.slice(s![start..start + height, ..width]) == block);
                if repeats {
                    findings.push(RepetitionFinding {
                        direction: RepeatDirection::Vertical,
                        block: block_rows,
                        block_size: (height, width),
                        repetitions,
                    });
                }
            }
        }
    }

    DetectionResult::new(findings)
}
