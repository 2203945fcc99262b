//! Transformation analysis between an input grid and its output
//!
//! This module derives, for one pair:
//! - A whole-grid rotation, flip or scale
//! - Per-value mappings, direct or conditioned on border position
//! - Object-level transform hypotheses
//! - Changes in relative position between matched objects

/// Pair analysis entry point
pub mod analyzer;
/// Whole-grid transform detection
pub mod global;
/// Value mapping inference
pub mod mapping;
/// Object correspondence strategies
pub mod matcher;
/// Object-level transform classification
pub mod objects;
/// Relative position changes
pub mod positions;

pub use analyzer::{TransformationAnalysis, TransformationAnalyzer};
pub use global::GlobalTransform;
pub use mapping::ValueMapping;
pub use matcher::{AttributeScoreMatcher, ObjectMatcher};
pub use objects::ObjectTransform;
