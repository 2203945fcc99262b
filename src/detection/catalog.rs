//! Detection results and the combined per-grid detector run

use serde::Serialize;

use crate::detection::progression::{ProgressionFinding, detect_progression};
use crate::detection::repetition::{RepetitionFinding, detect_repetition};
use crate::detection::spatial::{SpatialFinding, detect_spatial};
use crate::detection::symmetry::{SymmetryFinding, detect_symmetry};
use crate::grid::Grid;

/// Outcome of one detector over one grid
///
/// Detectors never fail on a well-formed grid; "nothing found" is an empty
/// result with `found == false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult<T> {
    /// Whether any finding was reported
    pub found: bool,
    /// Findings in detection order
    pub findings: Vec<T>,
}

impl<T> DetectionResult<T> {
    /// Wrap a list of findings
    pub fn new(findings: Vec<T>) -> Self {
        Self {
            found: !findings.is_empty(),
            findings,
        }
    }

    /// Number of findings
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Check whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl<T> Default for DetectionResult<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Every detector's findings for one grid
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridPatterns {
    /// Reflection and rotational symmetry
    pub symmetry: DetectionResult<SymmetryFinding>,
    /// Row and column progressions
    pub progression: DetectionResult<ProgressionFinding>,
    /// Block tilings
    pub repetition: DetectionResult<RepetitionFinding>,
    /// Per-value spatial arrangements
    pub spatial: DetectionResult<SpatialFinding>,
}

impl GridPatterns {
    /// Total findings across all detectors
    pub fn finding_count(&self) -> usize {
        self.symmetry.len() + self.progression.len() + self.repetition.len() + self.spatial.len()
    }

    /// Check whether no detector found anything
    pub fn is_empty(&self) -> bool {
        self.finding_count() == 0
    }
}

/// Run every atomic detector over `grid`
pub fn detect_all(grid: &Grid) -> GridPatterns {
    GridPatterns {
        symmetry: detect_symmetry(grid),
        progression: detect_progression(grid),
        repetition: detect_repetition(grid),
        spatial: detect_spatial(grid),
    }
}
