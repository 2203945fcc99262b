//! Reflection and rotational symmetry detection

use serde::Serialize;

use crate::detection::catalog::DetectionResult;
use crate::grid::Grid;
use crate::grid::geometry::{self, FlipAxis, Rotation};

/// A symmetry found in one grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SymmetryFinding {
    /// Top half mirrors the bottom half across the row split `position`
    HorizontalReflection {
        /// First row of the bottom half
        position: usize,
    },
    /// Left half mirrors the right half across the column split `position`
    VerticalReflection {
        /// First column of the right half
        position: usize,
    },
    /// Grid equals itself rotated by 360/`order` degrees
    Rotational {
        /// 2 for 180 degrees, 4 for 90 degrees
        order: u8,
    },
}

impl SymmetryFinding {
    /// Subtype tag used in pattern type names
    pub fn subtype(&self) -> String {
        match self {
            Self::HorizontalReflection { .. } => "horizontal_reflection".to_string(),
            Self::VerticalReflection { .. } => "vertical_reflection".to_string(),
            Self::Rotational { order } => format!("rotational_{}", 360 / u16::from((*order).max(1))),
        }
    }
}

/// Detect reflection across the midline of even dimensions and 180/90 degree rotational symmetry
pub fn detect_symmetry(grid: &Grid) -> DetectionResult<SymmetryFinding> {
    let array = grid.as_array();
    let (rows, cols) = grid.dimensions();
    let mut findings = Vec::new();

    if rows % 2 == 0 {
        let position = rows / 2;
        let top = array.slice(ndarray::s![..position, ..]).to_owned();
        let bottom = array.slice(ndarray::s![position.., ..]).to_owned();
        if top == geometry::flip(&bottom, FlipAxis::Horizontal) {
            findings.push(SymmetryFinding::HorizontalReflection { position });
        }
    }

    if cols % 2 == 0 {
        let position = cols / 2;
        let left = array.slice(ndarray::s![.., ..position]).to_owned();
        let right = array.slice(ndarray::s![.., position..]).to_owned();
        if left == geometry::flip(&right, FlipAxis::Vertical) {
            findings.push(SymmetryFinding::VerticalReflection { position });
        }
    }

    for (rotation, order) in [(Rotation::Half, 2), (Rotation::Quarter, 4)] {
        if grid.rotated(rotation) == *grid {
            findings.push(SymmetryFinding::Rotational { order });
        }
    }

    DetectionResult::new(findings)
}
