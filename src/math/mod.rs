//! Coordinate fields for the geometry primitives

/// Exact rational and quadratic-surd arithmetic
pub mod exact;
/// The `Scalar` field abstraction and the shared equality rule
pub mod scalar;

pub use exact::{Golden, QuadraticSurd, Rational};
pub use scalar::{Equality, Scalar};
