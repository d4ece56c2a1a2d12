//! Statistics over the vertex set of a generated mesh

/// Histograms and vertex density grids
pub mod histogram;
/// Pair correlation, angle and slope distributions
pub mod statistics;

pub use histogram::{DensityGrid, Histogram};
pub use statistics::Statistic;
