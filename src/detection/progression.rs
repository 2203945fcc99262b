//! Arithmetic and geometric progressions along rows and columns

use serde::Serialize;
use std::fmt;

use crate::detection::catalog::DetectionResult;
use crate::grid::{Grid, Value};

/// A single row or column of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    /// Row index
    Row(usize),
    /// Column index
    Col(usize),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(index) => write!(f, "row_{index}"),
            Self::Col(index) => write!(f, "col_{index}"),
        }
    }
}

/// A progression found along one line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressionFinding {
    /// Every successive difference equals `difference`
    Arithmetic {
        /// Line carrying the progression
        line: Line,
        /// Common difference
        difference: i32,
    },
    /// Every ratio between adjacent non-zero values equals `ratio`
    Geometric {
        /// Line carrying the progression
        line: Line,
        /// Common ratio
        ratio: f64,
    },
}

impl ProgressionFinding {
    /// Subtype tag used in pattern type names
    pub const fn subtype(&self) -> &'static str {
        match self {
            Self::Arithmetic { .. } => "arithmetic",
            Self::Geometric { .. } => "geometric",
        }
    }

    /// Line the progression was found on
    pub const fn line(&self) -> Line {
        match self {
            Self::Arithmetic { line, .. } | Self::Geometric { line, .. } => *line,
        }
    }
}

/// Detect progressions on every row, then every column
pub fn detect_progression(grid: &Grid) -> DetectionResult<ProgressionFinding> {
    let array = grid.as_array();
    let rows = array
        .rows()
        .into_iter()
        .enumerate()
        .map(|(index, row)| (Line::Row(index), row.to_vec()));
    let cols = array
        .columns()
        .into_iter()
        .enumerate()
        .map(|(index, col)| (Line::Col(index), col.to_vec()));

    let mut findings = Vec::new();
    for (line, values) in rows.chain(cols) {
        if let Some(difference) = common_difference(&values) {
            findings.push(ProgressionFinding::Arithmetic { line, difference });
        }
        if let Some(ratio) = common_ratio(&values) {
            findings.push(ProgressionFinding::Geometric { line, ratio });
        }
    }

    DetectionResult::new(findings)
}

/// Shared successive difference, `None` for fewer than two values
pub fn common_difference(values: &[Value]) -> Option<i32> {
    let mut differences = adjacent_pairs(values).map(|(a, b)| i32::from(b) - i32::from(a));
    let first = differences.next()?;
    differences.all(|d| d == first).then_some(first)
}

/// Shared ratio between adjacent non-zero values
///
/// Pairs containing a zero are skipped rather than divided. Requires at least
/// two non-zero values and one adjacent non-zero pair.
pub fn common_ratio(values: &[Value]) -> Option<f64> {
    if values.iter().filter(|&&v| v != 0).count() < 2 {
        return None;
    }
    let pairs: Vec<(u32, u32)> = adjacent_pairs(values)
        .filter(|&(a, b)| a != 0 && b != 0)
        .map(|(a, b)| (u32::from(a), u32::from(b)))
        .collect();
    let &(base_a, base_b) = pairs.first()?;
    // Cross-multiplication keeps the comparison exact
    pairs
        .iter()
        .all(|&(a, b)| b * base_a == base_b * a)
        .then(|| f64::from(base_b) / f64::from(base_a))
}

fn adjacent_pairs(values: &[Value]) -> impl Iterator<Item = (Value, Value)> + '_ {
    values.windows(2).filter_map(|pair| match pair {
        &[a, b] => Some((a, b)),
        _ => None,
    })
}
