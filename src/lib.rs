//! Planar substitution tilings and the statistics of their vertex sets
//!
//! A tiling family is a seed plus a rule table: each step replaces every tile
//! by children computed with affine maps, lerps or circle intersections, in
//! floating point or in an exact field. The resulting vertex set is
//! deduplicated and summarized by pair correlation, angle and slope
//! distributions.

#![forbid(unsafe_code)]

/// Substitution engine, production rules and the constraint solver
pub mod algorithm;
/// Vertex statistics, histograms and density grids
pub mod analysis;
/// Built-in tiling families
pub mod catalog;
/// Input/output operations and error handling
pub mod io;
/// Coordinate fields: floating point and exact
pub mod math;
/// Points, affine maps, tiles and vertex sets
pub mod spatial;

pub use io::error::{Result, TilingError};
