//! Relative position changes between matched object pairs

use serde::Serialize;

use crate::grid::{Object, Value};
use crate::io::configuration::POSITION_EPSILON;
use crate::transform::matcher::ObjectMatcher;

/// Center-to-center displacement from one object to another
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Displacement {
    /// Column difference
    pub dx: f64,
    /// Row difference
    pub dy: f64,
    /// Euclidean length
    pub distance: f64,
    /// `atan2(dy, dx)` in radians
    pub angle: f64,
}

impl Displacement {
    /// Displacement between two (row, col) centers
    pub fn between(from: (f64, f64), to: (f64, f64)) -> Self {
        let dx = to.1 - from.1;
        let dy = to.0 - from.0;
        Self {
            dx,
            dy,
            distance: dx.hypot(dy),
            angle: dy.atan2(dx),
        }
    }

    /// Check whether the (dx, dy) components agree within tolerance
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.dx - other.dx).abs() < POSITION_EPSILON && (self.dy - other.dy).abs() < POSITION_EPSILON
    }
}

/// A pair of objects whose displacement differs between input and output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativePositionChange {
    /// Values of the (first, second) objects
    pub objects: (Value, Value),
    /// Displacement in the input
    pub from: Displacement,
    /// Displacement in the output
    pub to: Displacement,
}

/// Record every input object pair whose matched output pair sits differently
///
/// Only evaluated when both grids hold the same number (greater than one) of
/// objects.
pub fn relative_position_changes(
    input_objects: &[Object],
    output_objects: &[Object],
    matcher: &dyn ObjectMatcher,
) -> Vec<RelativePositionChange> {
    if input_objects.len() < 2 || input_objects.len() != output_objects.len() {
        return Vec::new();
    }

    let mut changes = Vec::new();
    for (index, first) in input_objects.iter().enumerate() {
        for second in input_objects.iter().skip(index + 1) {
            let (Some(out_first), Some(out_second)) = (
                matcher.find_match(first, output_objects),
                matcher.find_match(second, output_objects),
            ) else {
                continue;
            };
            let from = Displacement::between(first.center, second.center);
            let to = Displacement::between(out_first.center, out_second.center);
            if !from.approx_eq(&to) {
                changes.push(RelativePositionChange {
                    objects: (first.value, second.value),
                    from,
                    to,
                });
            }
        }
    }
    changes
}
