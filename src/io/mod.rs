//! Input/output, configuration and error handling
//!
//! This module contains everything outside the inference core:
//! - Error types and context
//! - Constants and logging setup
//! - Task JSON loading and report writing
//! - The command-line batch runner, progress display and PNG rendering

/// Command-line interface
pub mod cli;
/// Inference constants
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering
pub mod image;
/// Log subscriber setup
pub mod logging;
/// Batch progress display
pub mod progress;
/// Task loading and report writing
pub mod task;
