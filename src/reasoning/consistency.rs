//! Cross-pair consistency reduction
//!
//! A hypothesis survives only when every training pair produced it
//! identically. Reduction is a fold of [`ConsistentHypothesis::intersect`]
//! over per-pair hypotheses; intersection is commutative and associative, so
//! the result does not depend on pair order.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::grid::Value;
use crate::transform::analyzer::TransformationAnalysis;
use crate::transform::global::GlobalTransform;
use crate::transform::mapping::ValueMapping;
use crate::transform::objects::ObjectTransform;

/// Relative position change reduced to its value pair and integer deltas
///
/// Deltas are `(d_row, d_col)` of the second object's center relative to the
/// first, rounded to whole cells. Pairs are compared on the rounded deltas, and
/// a change that rounds away is not a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PositionDelta {
    /// Values of the (first, second) objects
    pub objects: (Value, Value),
    /// Displacement in the input
    pub from: (i64, i64),
    /// Displacement in the output
    pub to: (i64, i64),
}

/// Hypotheses holding identically across every training pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistentHypothesis {
    /// Value mappings by input value
    pub value_mappings: BTreeMap<Value, ValueMapping>,
    /// One agreed object transform per object value
    pub object_transforms: BTreeMap<Value, ObjectTransform>,
    /// Whole-grid transform, absent when pairs disagree
    pub global_transform: Option<GlobalTransform>,
    /// Relative position changes, sorted
    pub relative_positions: Vec<PositionDelta>,
    /// Object count change, absent when pairs disagree (reported, never applied)
    pub object_count_change: Option<i64>,
}

impl ConsistentHypothesis {
    /// Hypotheses of a single pair
    ///
    /// Object transforms are reduced to one per object value: an input
    /// object contributes when all its candidates agree, and a value whose
    /// objects disagree within the pair is dropped.
    pub fn from_analysis(analysis: &TransformationAnalysis) -> Self {
        let mut object_transforms: BTreeMap<Value, Option<ObjectTransform>> = BTreeMap::new();
        for mapping in &analysis.object_transforms.mappings {
            let agreed = mapping.agreed_transform();
            object_transforms
                .entry(mapping.input.value)
                .and_modify(|current| {
                    if *current != agreed {
                        *current = None;
                    }
                })
                .or_insert(agreed);
        }

        let mut relative_positions: Vec<PositionDelta> = analysis
            .relative_positions
            .iter()
            .map(|change| PositionDelta {
                objects: change.objects,
                from: (change.from.dy.round() as i64, change.from.dx.round() as i64),
                to: (change.to.dy.round() as i64, change.to.dx.round() as i64),
            })
            .filter(|delta| delta.from != delta.to)
            .collect();
        relative_positions.sort_unstable();
        relative_positions.dedup();

        Self {
            value_mappings: analysis.value_mappings.clone(),
            object_transforms: object_transforms
                .into_iter()
                .filter_map(|(value, transform)| Some((value, transform?)))
                .collect(),
            global_transform: Some(analysis.global_transform),
            relative_positions,
            object_count_change: Some(analysis.object_transforms.count_change),
        }
    }

    /// Keep only what both hypotheses hold identically
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            value_mappings: intersect_maps(&self.value_mappings, &other.value_mappings),
            object_transforms: intersect_maps(&self.object_transforms, &other.object_transforms),
            global_transform: self
                .global_transform
                .filter(|transform| other.global_transform == Some(*transform)),
            relative_positions: self
                .relative_positions
                .iter()
                .filter(|delta| other.relative_positions.binary_search(delta).is_ok())
                .copied()
                .collect(),
            object_count_change: self
                .object_count_change
                .filter(|change| other.object_count_change == Some(*change)),
        }
    }

    /// Check whether nothing applicable survived
    ///
    /// An identity global transform and the object count change do not count.
    pub fn is_empty(&self) -> bool {
        self.value_mappings.is_empty()
            && self.object_transforms.is_empty()
            && self.global_transform.is_none_or(|transform| transform.is_none())
            && self.relative_positions.is_empty()
    }
}

fn intersect_maps<K: Ord + Clone, V: PartialEq + Clone>(
    left: &BTreeMap<K, V>,
    right: &BTreeMap<K, V>,
) -> BTreeMap<K, V> {
    left.iter()
        .filter(|(key, value)| right.get(*key) == Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Reduce per-pair analyses to the hypotheses they all share
///
/// An empty list yields an empty hypothesis.
pub fn reduce(analyses: &[TransformationAnalysis]) -> ConsistentHypothesis {
    let mut hypotheses = analyses.iter().map(ConsistentHypothesis::from_analysis);
    hypotheses.next().map_or_else(ConsistentHypothesis::default, |first| {
        hypotheses.fold(first, |acc, next| acc.intersect(&next))
    })
}
