//! Inference constants and runtime configuration defaults

// Confidence is a prioritization signal, always clamped to [0, 1]
/// Starting confidence for any atomic detection
pub const BASE_CONFIDENCE: f64 = 0.5;
/// Confidence of every symmetry detection
pub const SYMMETRY_CONFIDENCE: f64 = 0.8;
/// Boost for constant-difference progressions
pub const PROGRESSION_BOOST: f64 = 0.3;
/// Boost for repetitions tiling more than twice
pub const REPETITION_BOOST: f64 = 0.2;
/// Repetition count above which the boost applies
pub const REPETITION_BOOST_THRESHOLD: usize = 2;
/// Weight of measured regularity for spatial arrangements
pub const SPATIAL_REGULARITY_WEIGHT: f64 = 0.3;

/// Damping applied to the weaker member of a composite
pub const COMPOSITE_DAMPING: f64 = 0.9;
/// Confidence of meta patterns derived from conditional value mappings
pub const META_CONDITIONAL_CONFIDENCE: f64 = 0.8;
/// Confidence of meta patterns derived from object transforms
pub const META_OBJECT_CONFIDENCE: f64 = 0.7;

// Abstraction level weights (sum to 1)
/// Weight of the variable ratio in the abstraction level
pub const ABSTRACTION_VARIABLE_WEIGHT: f64 = 0.4;
/// Weight of the unconstrained ratio in the abstraction level
pub const ABSTRACTION_CONSTRAINT_WEIGHT: f64 = 0.3;
/// Weight of type diversity in the abstraction level
pub const ABSTRACTION_DIVERSITY_WEIGHT: f64 = 0.3;

/// Tolerance when comparing centers and displacements
pub const POSITION_EPSILON: f64 = 1e-9;
/// Tolerance when testing abstraction variables for a constant relation
pub const RELATION_EPSILON: f64 = 1e-9;

// Rendering settings
/// Side length of one grid cell in rendered PNGs
pub const DEFAULT_CELL_PIXELS: u32 = 16;
/// RGBA colours for grid values 0-9; larger values wrap around
pub const ARC_PALETTE: [[u8; 4]; 10] = [
    [0, 0, 0, 255],
    [0, 116, 217, 255],
    [255, 65, 54, 255],
    [46, 204, 64, 255],
    [255, 220, 0, 255],
    [170, 170, 170, 255],
    [240, 18, 190, 255],
    [255, 133, 27, 255],
    [127, 219, 255, 255],
    [135, 12, 37, 255],
];

// Output settings
/// Suffix added to report filenames
pub const REPORT_SUFFIX: &str = "_report";
/// Suffix added to rendered prediction filenames
pub const PREDICTION_SUFFIX: &str = "_prediction";

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Task count below which no progress bar is drawn
pub const MIN_TASKS_FOR_PROGRESS: usize = 2;

/// Log filter used when `-v` is not given
pub const DEFAULT_LOG_DIRECTIVE: &str = "gridrule=warn";
