//! ARC task JSON loading and report writing
//!
//! Task files hold `{"task_id"?, "train": [{"input", "output"}], "test":
//! [{"input", "output"?}]}`. Every grid is validated here with its location
//! in the task, so nothing downstream needs to check grid shape again.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::grid::{Grid, Value};
use crate::io::error::{ErrorContext, InferenceError, Result, WithContext};
use crate::reasoning::task::{Task, TestCase, TrainingPair};

type RawGrid = Vec<Vec<Value>>;

#[derive(Deserialize)]
struct RawTask {
    #[serde(default)]
    task_id: Option<String>,
    train: Vec<RawPair>,
    #[serde(default)]
    test: Vec<RawTest>,
}

#[derive(Deserialize)]
struct RawPair {
    input: RawGrid,
    output: RawGrid,
}

#[derive(Deserialize)]
struct RawTest {
    input: RawGrid,
    #[serde(default)]
    output: Option<RawGrid>,
}

/// Parse task JSON, using `default_id` when the document has no `task_id`
///
/// # Errors
///
/// Returns [`InferenceError::Serialization`] for invalid JSON and
/// [`InferenceError::MalformedGrid`] (with its location) for an empty or
/// ragged grid
pub fn parse_task(default_id: &str, json: &str) -> Result<Task> {
    let raw: RawTask = serde_json::from_str(json)?;
    build_task(default_id, raw)
}

/// Load a task file; the file stem is the default task id
///
/// # Errors
///
/// Returns [`InferenceError::TaskLoad`] if the file cannot be read,
/// [`InferenceError::TaskParse`] if it is not task JSON, and
/// [`InferenceError::MalformedGrid`] for an empty or ragged grid
pub fn load_task(path: &Path) -> Result<Task> {
    let json = fs::read_to_string(path).map_err(|source| InferenceError::TaskLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawTask = serde_json::from_str(&json).map_err(|source| InferenceError::TaskParse {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path
        .file_stem()
        .map_or_else(|| "task".to_string(), |s| s.to_string_lossy().into_owned());
    build_task(&stem, raw)
}

fn build_task(default_id: &str, raw: RawTask) -> Result<Task> {
    let id = raw.task_id.unwrap_or_else(|| default_id.to_string());
    let grid = |rows: RawGrid, role: String| {
        Grid::new(rows).with_context(ErrorContext::grid(&id, role))
    };

    let train = raw
        .train
        .into_iter()
        .enumerate()
        .map(|(index, pair)| {
            Ok(TrainingPair {
                input: grid(pair.input, format!("train[{index}].input"))?,
                output: grid(pair.output, format!("train[{index}].output"))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let test = raw
        .test
        .into_iter()
        .enumerate()
        .map(|(index, case)| {
            let output = case
                .output
                .map(|rows| grid(rows, format!("test[{index}].output")))
                .transpose()?;
            Ok(TestCase {
                input: grid(case.input, format!("test[{index}].input"))?,
                output,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Task { id, train, test })
}

/// Write any serializable report as pretty JSON, creating parent directories
///
/// # Errors
///
/// Returns [`InferenceError::Serialization`] if encoding fails and
/// [`InferenceError::FileSystem`] if the file cannot be written
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| InferenceError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| InferenceError::FileSystem {
        path: path.to_path_buf(),
        operation: "write report",
        source,
    })
}
