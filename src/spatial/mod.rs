//! Planar geometry primitives
//!
//! This module contains the value types the engine is built on:
//! - Points and vectors over any coordinate field
//! - Affine maps with optional simplification
//! - Tagged tiles and containment tests
//! - Deduplicated vertex sets

/// Affine maps and simplification hooks
pub mod affine;
/// Points, vectors and interpolation
pub mod point;
/// Prototype-tagged polygons
pub mod tile;
/// Vertex extraction and deduplication
pub mod vertices;

pub use affine::{AffineTransform, Simplifier};
pub use point::Point;
pub use tile::{Prototype, Tile};
pub use vertices::VertexSet;
