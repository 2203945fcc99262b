//! Batch progress display for task processing

use crate::io::configuration::{MIN_TASKS_FOR_PROGRESS, PROGRESS_BAR_WIDTH};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tasks: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{prefix}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks progress and the solved tally across a batch of tasks
///
/// Batches smaller than [`MIN_TASKS_FOR_PROGRESS`] draw nothing.
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    solved: usize,
    completed: usize,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the bar for `task_count` tasks
    pub fn initialize(&mut self, task_count: usize) {
        self.solved = 0;
        self.completed = 0;
        if task_count >= MIN_TASKS_FOR_PROGRESS {
            let bar = ProgressBar::new(task_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            self.bar = Some(bar);
        }
    }

    /// Show the task currently being processed
    pub fn start_task(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            bar.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
        }
    }

    /// Record a finished task
    pub fn complete_task(&mut self, solved: bool) {
        self.completed += 1;
        if solved {
            self.solved += 1;
        }
        if let Some(ref bar) = self.bar {
            bar.inc(1);
            bar.set_prefix(format!("solved {}", self.solved));
        }
    }

    /// Number of tasks recorded as solved
    pub const fn solved(&self) -> usize {
        self.solved
    }

    /// Number of tasks recorded as finished
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
