//! Per-pair transformation analysis
//!
//! The global transform is detected first and the remaining analyses run on
//! the globally aligned input, so that value mappings and object hypotheses
//! describe only what the whole-grid transform does not already explain.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::grid::objects::extract_objects;
use crate::grid::{Grid, Value};
use crate::transform::global::{GlobalTransform, detect_global_transform};
use crate::transform::mapping::{ValueMapping, infer_value_mappings};
use crate::transform::matcher::{AttributeScoreMatcher, ObjectMatcher};
use crate::transform::objects::{ObjectTransforms, analyze_object_transforms};
use crate::transform::positions::{RelativePositionChange, relative_position_changes};

/// Everything learned from one input/output pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationAnalysis {
    /// Whole-grid transform
    pub global_transform: GlobalTransform,
    /// Mapping per input value (on the aligned input)
    pub value_mappings: BTreeMap<Value, ValueMapping>,
    /// Object-level hypotheses (on the aligned input)
    pub object_transforms: ObjectTransforms,
    /// Pairwise displacement changes (on the aligned input)
    pub relative_positions: Vec<RelativePositionChange>,
}

/// Analyzer parameterized by its object matching strategy
#[derive(Debug, Clone, Default)]
pub struct TransformationAnalyzer<M = AttributeScoreMatcher> {
    matcher: M,
}

impl TransformationAnalyzer {
    /// Analyzer using [`AttributeScoreMatcher`]
    pub const fn new() -> Self {
        Self {
            matcher: AttributeScoreMatcher,
        }
    }
}

impl<M: ObjectMatcher> TransformationAnalyzer<M> {
    /// Analyzer using a custom matcher
    pub const fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Analyze one input/output pair
    pub fn analyze(&self, input: &Grid, output: &Grid) -> TransformationAnalysis {
        let global_transform = detect_global_transform(input, output);
        debug!(?global_transform, "global transform detected");

        let aligned = global_transform.apply(input);
        let value_mappings = infer_value_mappings(&aligned, output);
        let object_transforms = analyze_object_transforms(&aligned, output);
        let relative_positions = relative_position_changes(
            &extract_objects(&aligned),
            &extract_objects(output),
            &self.matcher,
        );

        debug!(
            value_mappings = value_mappings.len(),
            object_mappings = object_transforms.mappings.len(),
            relative_positions = relative_positions.len(),
            "pair analyzed"
        );

        TransformationAnalysis {
            global_transform,
            value_mappings,
            object_transforms,
            relative_positions,
        }
    }
}
