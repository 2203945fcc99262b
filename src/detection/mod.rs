//! Atomic pattern detectors operating on a single grid
//!
//! Each detector is a pure function from a grid to a [`catalog::DetectionResult`]:
//! - Reflection and rotational symmetry
//! - Arithmetic and geometric progressions
//! - Block repetition
//! - Spatial arrangement of each value

/// Detection results and the combined detector run
pub mod catalog;
/// Row and column progressions
pub mod progression;
/// Block tiling detection
pub mod repetition;
/// Per-value spatial arrangements
pub mod spatial;
/// Reflection and rotational symmetry
pub mod symmetry;

pub use catalog::{DetectionResult, GridPatterns, detect_all};
