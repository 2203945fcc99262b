//! Grid data model and object extraction
//!
//! This module contains the foundational data types:
//! - Validated, immutable grids and cell coordinates
//! - Rotation, flip and scaling helpers
//! - Connected-component objects

/// Rotation, flip, scaling and border classification helpers
pub mod geometry;
/// Validated grid type and cell coordinates
pub mod model;
/// Connected-component object extraction
pub mod objects;

pub use model::{BACKGROUND, Cell, Grid, Value};
pub use objects::{BoundingBox, Object};
