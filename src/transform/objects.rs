//! Object-level transformation hypotheses
//!
//! Every input object is compared against every output object. All
//! non-complex relations are kept, so an input object may carry several
//! alternative hypotheses; resolving that ambiguity is left to the
//! consistency reduction across training pairs.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::grid::geometry::{self, FlipAxis, Rotation};
use crate::grid::objects::{Object, extract_objects, object_subgrid};
use crate::grid::{BACKGROUND, Grid, Value};

/// How one object's subgrid becomes another's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectTransform {
    /// Subgrids are identical
    None,
    /// Same footprint, one uniform value replaced by another
    ValueChange {
        /// Input value
        from: Value,
        /// Output value
        to: Value,
    },
    /// Output dimensions are `factor` times the input's in both axes
    Scale {
        /// Integer scale factor (at least 2)
        factor: usize,
    },
    /// Output footprint is the input footprint rotated counter-clockwise
    Rotation {
        /// Rotation angle
        degrees: Rotation,
    },
    /// Output footprint is the input footprint mirrored
    Flip {
        /// Mirror axis
        axis: FlipAxis,
    },
    /// No known relation
    Complex,
}

impl ObjectTransform {
    /// Tag naming the transform kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ValueChange { .. } => "value_change",
            Self::Scale { .. } => "scale",
            Self::Rotation { .. } => "rotation",
            Self::Flip { .. } => "flip",
            Self::Complex => "complex",
        }
    }

    /// Apply the transform to an object subgrid
    ///
    /// Returns `None` for [`ObjectTransform::Complex`], which has no
    /// constructive interpretation.
    pub fn apply(&self, subgrid: &Grid) -> Option<Grid> {
        match *self {
            Self::None => Some(subgrid.clone()),
            Self::ValueChange { to, .. } => Some(subgrid.map_values(|_, value| {
                if value == BACKGROUND { BACKGROUND } else { to }
            })),
            Self::Scale { factor } => Some(subgrid.scaled(factor)),
            Self::Rotation { degrees } => Some(subgrid.rotated(degrees)),
            Self::Flip { axis } => Some(subgrid.flipped(axis)),
            Self::Complex => None,
        }
    }
}

/// Classify the relation between two object subgrids, in priority order
pub fn classify_object_transform(input: &Grid, output: &Grid) -> ObjectTransform {
    if input == output {
        return ObjectTransform::None;
    }

    let input_mask = geometry::occupancy(input.as_array());
    let output_mask = geometry::occupancy(output.as_array());

    if input_mask == output_mask {
        match (uniform_value(input), uniform_value(output)) {
            (Some(from), Some(to)) if from != to => {
                return ObjectTransform::ValueChange { from, to };
            }
            _ => {}
        }
    }

    match geometry::uniform_factor(input.dimensions(), output.dimensions()) {
        Some(factor) if factor >= 2 => return ObjectTransform::Scale { factor },
        _ => {}
    }

    for rotation in Rotation::ALL {
        if geometry::rotate(&input_mask, rotation) == output_mask {
            return ObjectTransform::Rotation { degrees: rotation };
        }
    }

    for axis in FlipAxis::ALL {
        if geometry::flip(&input_mask, axis) == output_mask {
            return ObjectTransform::Flip { axis };
        }
    }

    ObjectTransform::Complex
}

// The single non-background value of a subgrid, if there is exactly one
fn uniform_value(subgrid: &Grid) -> Option<Value> {
    let values: BTreeSet<Value> = subgrid
        .distinct_values()
        .into_iter()
        .filter(|&v| v != BACKGROUND)
        .collect();
    match (values.len(), values.first()) {
        (1, Some(&value)) => Some(value),
        _ => None,
    }
}

/// One candidate output object for an input object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectMatch {
    /// Candidate output object
    pub output: Object,
    /// Relation from the input object to the candidate
    pub transform: ObjectTransform,
}

/// All candidate matches for one input object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectMapping {
    /// Input object
    pub input: Object,
    /// Candidates in output object order
    ///
    /// Complex candidates are never recorded, so no match carries
    /// [`ObjectTransform::Complex`].
    pub matches: Vec<ObjectMatch>,
}

impl ObjectMapping {
    /// The transform shared by every candidate, if the candidates agree
    pub fn agreed_transform(&self) -> Option<ObjectTransform> {
        let kinds: BTreeSet<ObjectTransform> = self.matches.iter().map(|m| m.transform).collect();
        match (kinds.len(), kinds.first()) {
            (1, Some(&transform)) => Some(transform),
            _ => None,
        }
    }
}

/// Object-level view of one input/output pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectTransforms {
    /// Output object count minus input object count
    pub count_change: i64,
    /// Input objects with at least one non-complex candidate
    pub mappings: Vec<ObjectMapping>,
}

/// Compare every input object against every output object
pub fn analyze_object_transforms(input: &Grid, output: &Grid) -> ObjectTransforms {
    let input_objects = extract_objects(input);
    let output_objects = extract_objects(output);
    let output_subgrids: Vec<(Object, Grid)> = output_objects
        .iter()
        .map(|object| (object.clone(), object_subgrid(output, object)))
        .collect();

    let mappings = input_objects
        .iter()
        .filter_map(|object| {
            let subgrid = object_subgrid(input, object);
            let matches: Vec<ObjectMatch> = output_subgrids
                .iter()
                .filter_map(|(candidate, candidate_grid)| {
                    let transform = classify_object_transform(&subgrid, candidate_grid);
                    (transform != ObjectTransform::Complex).then(|| ObjectMatch {
                        output: candidate.clone(),
                        transform,
                    })
                })
                .collect();
            (!matches.is_empty()).then(|| ObjectMapping {
                input: object.clone(),
                matches,
            })
        })
        .collect();

    ObjectTransforms {
        count_change: output_objects.len() as i64 - input_objects.len() as i64,
        mappings,
    }
}
