//! Application of a consistent hypothesis to a new input
//!
//! Stages run in a fixed order, each on the result of the previous one:
//! 1. Global transform
//! 2. Value mappings: direct mappings on every cell simultaneously, then
//!    conditional mappings on that result
//! 3. Object rewrites on freshly extracted objects
//! 4. Relative position corrections

use tracing::debug;

use crate::grid::objects::{extract_objects, object_subgrid};
use crate::grid::{BACKGROUND, Cell, Grid, Value};
use crate::reasoning::consistency::{ConsistentHypothesis, PositionDelta};
use crate::transform::mapping::ValueMapping;

/// Predict the output for `input`
///
/// An empty hypothesis returns the input unchanged.
pub fn predict(input: &Grid, hypothesis: &ConsistentHypothesis) -> Grid {
    if hypothesis.is_empty() {
        debug!("no consistent hypothesis, returning input unchanged");
        return input.clone();
    }

    let global = hypothesis
        .global_transform
        .map_or_else(|| input.clone(), |transform| transform.apply(input));
    let mapped = apply_value_mappings(&global, hypothesis);
    let rewritten = apply_object_transforms(&mapped, hypothesis);
    hypothesis
        .relative_positions
        .iter()
        .fold(rewritten, |grid, delta| apply_position_delta(&grid, delta))
}

fn apply_value_mappings(grid: &Grid, hypothesis: &ConsistentHypothesis) -> Grid {
    if hypothesis.value_mappings.is_empty() {
        return grid.clone();
    }
    let direct = apply_mapping_pass(grid, hypothesis, |mapping| !mapping.is_conditional());
    apply_mapping_pass(&direct, hypothesis, ValueMapping::is_conditional)
}

// One simultaneous rewrite using only the mappings `selected` accepts
fn apply_mapping_pass(
    grid: &Grid,
    hypothesis: &ConsistentHypothesis,
    selected: impl Fn(&ValueMapping) -> bool,
) -> Grid {
    grid.map_values(|cell, value| {
        hypothesis
            .value_mappings
            .get(&value)
            .filter(|mapping| selected(mapping))
            .and_then(|mapping| mapping.target(grid.position_category(cell)))
            .unwrap_or(value)
    })
}

// Rewrites only when the transformed subgrid fits the object's bounding box
fn apply_object_transforms(grid: &Grid, hypothesis: &ConsistentHypothesis) -> Grid {
    if hypothesis.object_transforms.is_empty() {
        return grid.clone();
    }

    let mut current = grid.clone();
    for object in extract_objects(grid) {
        let Some(transform) = hypothesis.object_transforms.get(&object.value) else {
            continue;
        };
        let subgrid = object_subgrid(grid, &object);
        match transform.apply(&subgrid) {
            Some(transformed) if transformed.dimensions() == object.dimensions() => {
                current = current.with_patch(&transformed, object.bounds.min);
            }
            _ => debug!(
                value = object.value,
                transform = transform.kind(),
                "object rewrite skipped"
            ),
        }
    }
    current
}

// Centroid of every cell holding `value`
fn value_center(grid: &Grid, value: Value) -> Option<(f64, f64)> {
    let cells = grid.cells_with(value);
    if cells.is_empty() {
        return None;
    }
    let count = cells.len() as f64;
    let rows: f64 = cells.iter().map(|cell| cell.row as f64).sum();
    let cols: f64 = cells.iter().map(|cell| cell.col as f64).sum();
    Some((rows / count, cols / count))
}

// Move every cell of the second value so its displacement from the first matches
fn apply_position_delta(grid: &Grid, delta: &PositionDelta) -> Grid {
    let (first, second) = delta.objects;
    if first == second {
        return grid.clone();
    }
    let (Some(anchor), Some(moving)) = (value_center(grid, first), value_center(grid, second))
    else {
        return grid.clone();
    };

    let observed = (
        (moving.0 - anchor.0).round() as i64,
        (moving.1 - anchor.1).round() as i64,
    );
    if observed == delta.to {
        return grid.clone();
    }

    let shift = (delta.to.0 - observed.0, delta.to.1 - observed.1);
    let cells = grid.cells_with(second);
    let moved: Vec<Cell> = cells
        .iter()
        .filter_map(|cell| cell.offset(shift.0, shift.1))
        .collect();
    debug!(first, second, ?shift, "translating object");
    grid.with_cells(&cells, BACKGROUND).with_cells(&moved, second)
}
