//! Command-line interface for batch solving of ARC task files

use crate::io::configuration::{DEFAULT_CELL_PIXELS, PREDICTION_SUFFIX, REPORT_SUFFIX};
use crate::io::error::{InferenceError, Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::task::{load_task, write_json};
use crate::reasoning::task::{TaskReport, solve};
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "gridrule")]
#[command(
    author,
    version,
    about = "Infer grid transformation rules from ARC task examples and predict test outputs"
)]
/// Command-line arguments for the task solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Task JSON file or directory of task files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory for reports and renders (defaults to beside each task)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Render each prediction as a PNG
    #[arg(short, long)]
    pub render: bool,

    /// Suppress progress output and all logs below errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Process tasks even if a report exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write reports to standard output instead of files
    #[arg(long)]
    pub stdout: bool,
}

impl Cli {
    /// Check if existing reports should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip && !self.stdout
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !self.stdout
    }
}

/// Outcome counts of one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Tasks solved and reported
    pub processed: usize,
    /// Tasks whose every test prediction matched
    pub solved: usize,
    /// Tasks that could not be loaded or solved
    pub failed: usize,
}

/// Orchestrates batch solving of task files with progress tracking
pub struct TaskProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl TaskProcessor {
    /// Create a new task processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every task selected by the CLI arguments
    ///
    /// Tasks that fail to load or solve are logged and counted; the batch
    /// continues with the next task.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or an output cannot be written
    pub fn process(&mut self) -> Result<BatchSummary> {
        let files = self.collect_files()?;
        let mut summary = BatchSummary::default();

        if files.is_empty() {
            info!("no tasks to process");
            return Ok(summary);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            if let Some(ref pm) = self.progress_manager {
                pm.start_task(file);
            }
            let solved = match load_task(file).and_then(|task| solve(&task)) {
                Ok(report) => {
                    self.write_outputs(file, &report)?;
                    summary.processed += 1;
                    summary.solved += usize::from(report.solved);
                    report.solved
                }
                Err(error) => {
                    warn!(task = %file.display(), %error, "task skipped");
                    summary.failed += 1;
                    false
                }
            };
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_task(solved);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        info!(
            processed = summary.processed,
            solved = summary.solved,
            failed = summary.failed,
            "batch complete"
        );
        Ok(summary)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_task_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a .json task file",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let entries =
                std::fs::read_dir(target).map_err(|source| InferenceError::FileSystem {
                    path: target.clone(),
                    operation: "read directory",
                    source,
                })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_task_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a task file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let report_path = self.report_path(input_path);
        if report_path.exists() {
            debug!(task = %input_path.display(), "skipping, report exists");
            false
        } else {
            true
        }
    }

    fn write_outputs(&self, input_path: &Path, report: &TaskReport) -> Result<()> {
        if self.cli.stdout {
            let json = serde_json::to_string_pretty(report)?;
            writeln!(std::io::stdout().lock(), "{json}")?;
        } else {
            write_json(report, &self.report_path(input_path))?;
        }

        if self.cli.render {
            for (index, prediction) in report.predictions.iter().enumerate() {
                let suffix = format!("{PREDICTION_SUFFIX}_{index}");
                let path = self.output_path(input_path, &suffix, "png");
                export_grid_as_png(&prediction.grid, DEFAULT_CELL_PIXELS, &path)?;
            }
        }
        Ok(())
    }

    fn report_path(&self, input_path: &Path) -> PathBuf {
        self.output_path(input_path, REPORT_SUFFIX, "json")
    }

    fn output_path(&self, input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        match (&self.cli.output, input_path.parent()) {
            (Some(dir), _) => dir.join(name),
            (None, Some(parent)) => parent.join(name),
            (None, None) => PathBuf::from(name),
        }
    }
}

// JSON files that are not our own reports
fn is_task_file(path: &Path) -> bool {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
    let is_report = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(REPORT_SUFFIX));
    is_json && !is_report
}
