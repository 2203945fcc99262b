//! Multi-level pattern classification
//!
//! This module promotes detector findings into a hierarchy:
//! - Atomic patterns, one per finding
//! - Composite patterns over compatible atomic pairs
//! - Structural patterns over related composites
//! - Meta patterns describing the transformation itself
//!
//! Abstract patterns generalize groups of similar patterns across levels.

/// Abstract pattern extraction
pub mod abstraction;
/// Hierarchy state machine
pub mod builder;
/// Pattern values and their property view
pub mod pattern;

pub use abstraction::{AbstractPattern, find_abstractions};
pub use builder::{HierarchyLevels, PatternHierarchy};
pub use pattern::{Pattern, PatternKind, PatternLevel};
