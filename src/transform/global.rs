//! Whole-grid transformation detection

use serde::Serialize;

use crate::grid::Grid;
use crate::grid::geometry::{self, FlipAxis, Rotation};

/// Whole-grid rigid or scaling transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GlobalTransform {
    /// No whole-grid relation found (or the grids are identical)
    None,
    /// Counter-clockwise rotation
    Rotation {
        /// Rotation angle
        degrees: Rotation,
    },
    /// Mirror image
    Flip {
        /// Mirror axis
        axis: FlipAxis,
    },
    /// Integer upscale by block replication
    Scale {
        /// Scale factor (at least 2)
        factor: usize,
    },
}

impl GlobalTransform {
    /// Apply the transform, producing a new grid
    pub fn apply(&self, grid: &Grid) -> Grid {
        match *self {
            Self::None => grid.clone(),
            Self::Rotation { degrees } => grid.rotated(degrees),
            Self::Flip { axis } => grid.flipped(axis),
            Self::Scale { factor } => grid.scaled(factor),
        }
    }

    /// Check for the identity transform
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Find the whole-grid transform taking `input` to `output`
///
/// Checked in order: identity, flips (horizontal, vertical), rotations (90,
/// 180, 270), then integer scaling. Flips come first so that a mirror image
/// of a grid that also happens to match a rotation is reported as the
/// simpler involution. Scaling is a dimension test only; content differences
/// are left to the value mappings computed on the scaled grid.
pub fn detect_global_transform(input: &Grid, output: &Grid) -> GlobalTransform {
    if input == output {
        return GlobalTransform::None;
    }

    if input.dimensions() == output.dimensions() {
        for axis in FlipAxis::ALL {
            if input.flipped(axis) == *output {
                return GlobalTransform::Flip { axis };
            }
        }
    }

    for rotation in Rotation::ALL {
        let rotated = input.rotated(rotation);
        if rotated.dimensions() == output.dimensions() && rotated == *output {
            return GlobalTransform::Rotation { degrees: rotation };
        }
    }

    match geometry::uniform_factor(input.dimensions(), output.dimensions()) {
        Some(factor) if factor >= 2 => GlobalTransform::Scale { factor },
        _ => GlobalTransform::None,
    }
}
