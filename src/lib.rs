//! Rule induction for small integer grids
//!
//! Given a few input/output grid pairs that share a transformation, the crate
//! detects per-grid regularities, analyzes what changed in each pair, keeps
//! only the hypotheses every pair agrees on, and applies them to new inputs.

#![deny(unsafe_code)]

/// Atomic pattern detectors over a single grid
pub mod detection;
/// Grid data model and connected-component objects
pub mod grid;
/// Four-level pattern hierarchy and abstraction
pub mod hierarchy;
/// Input/output operations, configuration and error handling
pub mod io;
/// Cross-pair consistency reduction, prediction and task solving
pub mod reasoning;
/// Per-pair transformation analysis
pub mod transform;

pub use io::error::{InferenceError, Result};
