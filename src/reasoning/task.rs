//! Task model and end-to-end solving

use serde::Serialize;
use tracing::info;

use crate::detection::detect_all;
use crate::grid::Grid;
use crate::hierarchy::{AbstractPattern, HierarchyLevels, PatternHierarchy, find_abstractions};
use crate::io::error::{Result, invalid_task};
use crate::reasoning::consistency::{ConsistentHypothesis, reduce};
use crate::reasoning::predictor::predict;
use crate::transform::analyzer::{TransformationAnalysis, TransformationAnalyzer};

/// One demonstration of the transformation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingPair {
    /// Input grid
    pub input: Grid,
    /// Expected output grid
    pub output: Grid,
}

/// One input to predict, with its expected output when known
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// Input grid
    pub input: Grid,
    /// Expected output, used only for scoring
    pub output: Option<Grid>,
}

/// Training pairs and test inputs sharing one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Task identifier
    pub id: String,
    /// Demonstrations
    pub train: Vec<TrainingPair>,
    /// Inputs to predict
    pub test: Vec<TestCase>,
}

/// Predicted output for one test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    /// Predicted grid
    pub grid: Grid,
    /// Whether it equals the expected output, when one was given
    pub correct: Option<bool>,
}

/// Everything produced while solving one task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    /// Task identifier
    pub task_id: String,
    /// One analysis per training pair
    pub analyses: Vec<TransformationAnalysis>,
    /// Patterns accumulated over all training pairs
    pub hierarchy: HierarchyLevels,
    /// Generalizations over the accumulated patterns
    pub abstractions: Vec<AbstractPattern>,
    /// Hypotheses shared by every training pair
    pub hypothesis: ConsistentHypothesis,
    /// One prediction per test case
    pub predictions: Vec<Prediction>,
    /// Every test case had an expected output and was predicted exactly
    pub solved: bool,
}

/// Analyze the training pairs, reduce, and predict every test input
///
/// # Errors
///
/// Returns [`crate::InferenceError::InvalidTask`] if the task has no
/// training pairs
pub fn solve(task: &Task) -> Result<TaskReport> {
    if task.train.is_empty() {
        return Err(invalid_task(&task.id, &"no training pairs"));
    }

    let analyzer = TransformationAnalyzer::new();
    let analyses: Vec<TransformationAnalysis> = task
        .train
        .iter()
        .map(|pair| analyzer.analyze(&pair.input, &pair.output))
        .collect();

    let mut hierarchy = PatternHierarchy::new();
    for (pair, analysis) in task.train.iter().zip(&analyses) {
        hierarchy.analyze(&detect_all(&pair.input), Some(analysis));
    }
    let abstractions = find_abstractions(hierarchy.levels().patterns());

    let hypothesis = reduce(&analyses);
    let predictions: Vec<Prediction> = task
        .test
        .iter()
        .map(|case| {
            let grid = predict(&case.input, &hypothesis);
            let correct = case.output.as_ref().map(|expected| *expected == grid);
            Prediction { grid, correct }
        })
        .collect();

    let solved = !predictions.is_empty()
        && predictions
            .iter()
            .all(|prediction| prediction.correct == Some(true));
    info!(
        task = %task.id,
        pairs = task.train.len(),
        tests = predictions.len(),
        solved,
        "task processed"
    );

    Ok(TaskReport {
        task_id: task.id.clone(),
        analyses,
        hierarchy: hierarchy.into_levels(),
        abstractions,
        hypothesis,
        predictions,
        solved,
    })
}
