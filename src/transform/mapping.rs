//! Per-value mapping inference between aligned input and output grids

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::grid::geometry::PositionCategory;
use crate::grid::{Cell, Grid, Value};

/// How one input value becomes output values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueMapping {
    /// Every occurrence becomes the same value
    Direct {
        /// Output value
        to: Value,
    },
    /// Output value is determined by the border category of the cell
    Conditional {
        /// Output value per category present in the input
        conditions: BTreeMap<PositionCategory, Value>,
    },
    /// No consistent rule; raw observations kept for diagnostics
    Complex {
        /// Output value at every occurrence, in row-major order
        observations: Vec<(Cell, Value)>,
    },
}

impl ValueMapping {
    /// Output value for an occurrence at `category`, if the mapping decides one
    pub fn target(&self, category: PositionCategory) -> Option<Value> {
        match self {
            Self::Direct { to } => Some(*to),
            Self::Conditional { conditions } => conditions.get(&category).copied(),
            Self::Complex { .. } => None,
        }
    }

    /// Check for the conditional variant
    pub const fn is_conditional(&self) -> bool {
        matches!(self, Self::Conditional { .. })
    }
}

/// Infer a mapping for every distinct input value, background included
///
/// Grids of different dimensions have no cell correspondence and yield no
/// mappings. The result does not depend on traversal order: observations are
/// grouped per value and category before classification.
pub fn infer_value_mappings(input: &Grid, output: &Grid) -> BTreeMap<Value, ValueMapping> {
    if input.dimensions() != output.dimensions() {
        return BTreeMap::new();
    }

    let mut observations: BTreeMap<Value, Vec<(Cell, Value)>> = BTreeMap::new();
    for (cell, value) in input.iter_cells() {
        if let Some(out) = output.get(cell) {
            observations.entry(value).or_default().push((cell, out));
        }
    }

    observations
        .into_iter()
        .map(|(value, mut seen)| {
            seen.sort_unstable();
            (value, classify(input, seen))
        })
        .collect()
}

fn classify(input: &Grid, observations: Vec<(Cell, Value)>) -> ValueMapping {
    let distinct: BTreeSet<Value> = observations.iter().map(|&(_, out)| out).collect();
    if let (1, Some(&to)) = (distinct.len(), distinct.first()) {
        return ValueMapping::Direct { to };
    }

    let mut by_category: BTreeMap<PositionCategory, BTreeSet<Value>> = BTreeMap::new();
    for &(cell, out) in &observations {
        by_category
            .entry(input.position_category(cell))
            .or_default()
            .insert(out);
    }

    let conditions: Option<BTreeMap<PositionCategory, Value>> = by_category
        .iter()
        .map(|(&category, outs)| match (outs.len(), outs.first()) {
            (1, Some(&out)) => Some((category, out)),
            _ => None,
        })
        .collect();

    match conditions {
        Some(conditions) => ValueMapping::Conditional { conditions },
        None => ValueMapping::Complex { observations },
    }
}
