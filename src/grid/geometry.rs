//! Rigid and scaling transformations over 2D arrays
//!
//! All operations return new arrays; inputs are never modified. Rotations are
//! counter-clockwise quarter turns, matching the orientation used throughout
//! the transformation analysis.

use ndarray::{Array2, Axis};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mirror axis for flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    /// Rows reversed (top becomes bottom)
    Horizontal,
    /// Columns reversed (left becomes right)
    Vertical,
}

impl FlipAxis {
    /// Both axes in detection priority order
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    const fn array_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis(0),
            Self::Vertical => Axis(1),
        }
    }
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// Counter-clockwise rotation by a whole number of quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    /// 90 degrees
    Quarter,
    /// 180 degrees
    Half,
    /// 270 degrees
    ThreeQuarter,
}

impl Rotation {
    /// All non-trivial rotations in detection priority order
    pub const ALL: [Self; 3] = [Self::Quarter, Self::Half, Self::ThreeQuarter];

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }

    /// Number of counter-clockwise quarter turns
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::Quarter => 1,
            Self::Half => 2,
            Self::ThreeQuarter => 3,
        }
    }

    /// Rotation for an angle in degrees, if it is a non-trivial quarter turn
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            90 => Some(Self::Quarter),
            180 => Some(Self::Half),
            270 => Some(Self::ThreeQuarter),
            _ => None,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or_else(|| format!("{degrees} is not 90, 180 or 270"))
    }
}

/// Where a cell sits relative to the grid border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCategory {
    /// On both a row extreme and a column extreme
    Corner,
    /// On exactly one extreme
    Edge,
    /// On no extreme
    Interior,
}

impl PositionCategory {
    /// Categorize `(row, col)` within a grid of `dimensions` (rows, cols)
    pub const fn of(row: usize, col: usize, dimensions: (usize, usize)) -> Self {
        let on_row_extreme = row == 0 || row + 1 == dimensions.0;
        let on_col_extreme = col == 0 || col + 1 == dimensions.1;
        match (on_row_extreme, on_col_extreme) {
            (true, true) => Self::Corner,
            (true, false) | (false, true) => Self::Edge,
            (false, false) => Self::Interior,
        }
    }

    /// Lowercase category name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Corner => "corner",
            Self::Edge => "edge",
            Self::Interior => "interior",
        }
    }
}

/// Rotate counter-clockwise by one quarter turn
pub fn rotate_quarter<T: Clone>(array: &Array2<T>) -> Array2<T> {
    let mut view = array.t();
    view.invert_axis(Axis(0));
    view.to_owned()
}

/// Rotate counter-clockwise by `rotation`
pub fn rotate<T: Clone>(array: &Array2<T>, rotation: Rotation) -> Array2<T> {
    let mut rotated = array.clone();
    for _ in 0..rotation.quarter_turns() {
        rotated = rotate_quarter(&rotated);
    }
    rotated
}

/// Mirror across `axis`
pub fn flip<T: Clone>(array: &Array2<T>, axis: FlipAxis) -> Array2<T> {
    let mut view = array.view();
    view.invert_axis(axis.array_axis());
    view.to_owned()
}

/// Replace every cell by a `factor`×`factor` block of the same value
pub fn upscale<T: Clone + Zero>(array: &Array2<T>, factor: usize) -> Array2<T> {
    let (rows, cols) = array.dim();
    let factor = factor.max(1);
    Array2::from_shape_fn((rows * factor, cols * factor), |(r, c)| {
        array
            .get((r / factor, c / factor))
            .cloned()
            .unwrap_or_else(T::zero)
    })
}

/// Boolean occupancy mask (true where the value is non-zero)
pub fn occupancy<T: Zero>(array: &Array2<T>) -> Array2<bool> {
    array.map(|value| !value.is_zero())
}

/// Integer factor `k` such that `to == k * from` in both axes, if one exists
pub const fn uniform_factor(from: (usize, usize), to: (usize, usize)) -> Option<usize> {
    if from.0 == 0 || from.1 == 0 || to.0 % from.0 != 0 || to.1 % from.1 != 0 {
        return None;
    }
    let factor = to.0 / from.0;
    if factor == to.1 / from.1 {
        Some(factor)
    } else {
        None
    }
}
