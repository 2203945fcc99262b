//! Cross-pair reasoning and prediction
//!
//! This module turns per-pair analyses into predictions:
//! - Consistency reduction across training pairs
//! - Staged application of the surviving hypothesis
//! - Task-level orchestration and scoring

/// Cross-pair hypothesis intersection
pub mod consistency;
/// Hypothesis application
pub mod predictor;
/// Task model and solving
pub mod task;

pub use consistency::{ConsistentHypothesis, reduce};
pub use predictor::predict;
pub use task::{Task, TaskReport, solve};
