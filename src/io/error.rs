//! Error types and context management for grid inference operations

use std::fmt;
use std::path::PathBuf;

/// Structural problem that makes a grid unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridDefect {
    /// The grid has no rows
    Empty,
    /// The first row has no cells
    EmptyRow,
    /// A row length differs from the first row
    Ragged {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
}

impl fmt::Display for GridDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no rows"),
            Self::EmptyRow => write!(f, "grid rows have no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
        }
    }
}

/// Main error type for all inference operations
#[derive(Debug)]
pub enum InferenceError {
    /// Grid is empty or ragged and cannot be analyzed
    MalformedGrid {
        /// What is wrong with the grid
        defect: GridDefect,
        /// Where the grid came from, when known (e.g. `task-1 train[0].input`)
        location: Option<String>,
    },

    /// Failed to read a task file from disk
    TaskLoad {
        /// Path to the task file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Task file is not valid task JSON
    TaskParse {
        /// Path to the task file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Task parsed but cannot be solved as given
    InvalidTask {
        /// Identifier of the task
        task_id: String,
        /// Description of what's wrong with the task
        reason: String,
    },

    /// Failed to save a rendered grid to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Numerical or structural computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// JSON could not be decoded or encoded
    Serialization {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Log subscriber could not be installed
    LoggingInit {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGrid { defect, location } => match location {
                Some(location) => write!(f, "Malformed grid at {location}: {defect}"),
                None => write!(f, "Malformed grid: {defect}"),
            },
            Self::TaskLoad { path, source } => {
                write!(f, "Failed to read task '{}': {source}", path.display())
            }
            Self::TaskParse { path, source } => {
                write!(f, "Failed to parse task '{}': {source}", path.display())
            }
            Self::InvalidTask { task_id, reason } => {
                write!(f, "Invalid task '{task_id}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::Serialization { source } => write!(f, "JSON error: {source}"),
            Self::LoggingInit { reason } => write!(f, "Failed to initialize logging: {reason}"),
        }
    }
}

impl std::error::Error for InferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TaskLoad { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::TaskParse { source, .. } | Self::Serialization { source } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for inference results
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Task the failing grid belongs to
    pub task_id: Option<String>,
    /// Role of the grid within the task (e.g. `train[0].input`)
    pub grid_role: Option<String>,
}

impl ErrorContext {
    /// Context for one grid of one task
    pub fn grid(task_id: &str, grid_role: impl Into<String>) -> Self {
        Self {
            task_id: Some(task_id.to_string()),
            grid_role: Some(grid_role.into()),
        }
    }

    fn location(&self) -> Option<String> {
        match (&self.task_id, &self.grid_role) {
            (Some(task), Some(role)) => Some(format!("{task} {role}")),
            (Some(task), None) => Some(task.clone()),
            (None, Some(role)) => Some(role.clone()),
            (None, None) => None,
        }
    }
}

/// Enriches error messages with task and grid information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<InferenceError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only grid errors carry a location
            if let InferenceError::MalformedGrid {
                location: location @ None,
                ..
            } = &mut error
            {
                *location = context.location();
            }
            error
        })
    }
}

impl From<GridDefect> for InferenceError {
    fn from(defect: GridDefect) -> Self {
        Self::MalformedGrid {
            defect,
            location: None,
        }
    }
}

impl From<serde_json::Error> for InferenceError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization { source }
    }
}

impl From<std::io::Error> for InferenceError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> InferenceError {
    InferenceError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid task error
pub fn invalid_task(task_id: &str, reason: &impl ToString) -> InferenceError {
    InferenceError::InvalidTask {
        task_id: task_id.to_string(),
        reason: reason.to_string(),
    }
}
