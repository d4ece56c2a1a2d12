/// Command-line parsing and the end-to-end driver
pub mod cli;
/// Compile-time defaults
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// PNG export of meshes, histograms and density grids
pub mod image;
/// Generation progress bar
pub mod progress;
/// Plot-range file reader
pub mod ranges;
