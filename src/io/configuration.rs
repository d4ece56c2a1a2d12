//! Engine constants and runtime configuration defaults

// Tolerances shared by solving, dedup and statistics
/// Decimal places used by solver predicates on floating-point tilings
pub const SOLVER_DECIMALS: u32 = 6;
/// Decimal places under which floating-point vertices are merged
pub const DEDUP_DECIMALS: u32 = 9;
/// Decimal places the Ammann A2 simplifier snaps coordinates to
pub const SNAP_DECIMALS: u32 = 12;

// Safety limit to prevent excessive memory allocation
/// Maximum number of tiles a generation may hold
pub const DEFAULT_MAX_TILES: usize = 5_000_000;

/// Maximum number of pair distances a statistic may collect
pub const DEFAULT_MAX_PAIRS: usize = 50_000_000;

/// Work items below which the sequential path is used
pub const PARALLEL_THRESHOLD: usize = 512;

// Default values for configurable parameters
/// Default number of substitution steps
pub const DEFAULT_STEPS: usize = 1;
/// Default tiling when none is named
pub const DEFAULT_TILING: &str = "chair";
/// Default plot-range configuration file
pub const DEFAULT_CONFIG_PATH: &str = "plots.conf";
/// Bin counts swept when none are given on the command line
pub const BIN_SWEEP: [usize; 8] = [100, 150, 200, 250, 750, 1000, 5000, 10000];

// Output settings
/// Directory all images are written to
pub const OUTPUT_DIR: &str = "output";
/// Side length of the tiling outline image in pixels
pub const TILING_IMAGE_SIZE: u32 = 1024;
/// Blank border around the tiling outline in pixels
pub const TILING_IMAGE_MARGIN: u32 = 16;
/// Width of histogram images in pixels
pub const HISTOGRAM_IMAGE_WIDTH: u32 = 800;
/// Height of histogram images in pixels
pub const HISTOGRAM_IMAGE_HEIGHT: u32 = 480;
/// Cells per side of the vertex density grid
pub const DENSITY_GRID_SIZE: usize = 256;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
