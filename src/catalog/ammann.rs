//! Ammann A2 L-shapes
//!
//! Scaling the L-tile by `1/γ` (with `γ = √φ`) and by `1/γ²` yields two
//! pieces that together fill the original. Generation `n + 1` is therefore
//! the previous generation rotated and shrunk, plus the one before reflected
//! and shrunk twice as much. Tile counts follow the Fibonacci numbers.
//!
//! Coordinates are floating point and snapped after every map so that shared
//! vertices from the two branches coincide exactly.

use crate::algorithm::rules::{Recurrence, Transition};
use crate::catalog::Family;
use crate::io::configuration::{DEDUP_DECIMALS, SNAP_DECIMALS};
use crate::io::error::Result;
use crate::math::scalar::Equality;
use crate::spatial::affine::{AffineTransform, Simplifier};
use crate::spatial::point::Point;
use crate::spatial::tile::{Prototype, Tile};

/// Family name
pub const NAME: &str = "ammann-a2";

/// The only prototype of this family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LShape;

impl Prototype for LShape {
    fn name(self) -> &'static str {
        "l-shape"
    }

    fn vertex_count(self) -> usize {
        6
    }
}

/// Square root of the golden ratio
pub fn gamma() -> f64 {
    ((1.0 + 5f64.sqrt()) / 2.0).sqrt()
}

/// L-tile with its long arm along the x axis
///
/// # Errors
///
/// Returns `VertexCount` or `NonFiniteVertex` if a seed tile fails
/// [`Tile::from_corners`] validation
pub fn seed() -> Result<Vec<Tile<LShape, f64>>> {
    let g = gamma();
    let (g1, g4, g5, g6) = (g, g.powi(4), g.powi(5), g.powi(6));
    Ok(vec![Tile::from_corners(
        LShape,
        [
            Point::new(0.0, 0.0),
            Point::new(g5, 0.0),
            Point::new(g5, g4),
            Point::new(g5 - g1, g4),
            Point::new(g5 - g1, g6),
            Point::new(0.0, g6),
        ],
    )?])
}

/// Quarter turn scaled by `1/γ` for the latest generation, reflection scaled
/// by `1/γ²` for the one before
pub fn transition() -> Transition<LShape, f64> {
    let g = gamma();
    let snap = Simplifier::round_to(SNAP_DECIMALS);
    let recent = AffineTransform::new([[0.0, -1.0 / g], [1.0 / g, 0.0]], Point::new(g.powi(5), 0.0))
        .with_simplifier(snap.clone());
    let shrink = 1.0 / (g * g);
    let earlier = AffineTransform::new([[shrink, 0.0], [0.0, -shrink]], Point::new(0.0, g.powi(6)))
        .with_simplifier(snap);
    Recurrence { recent, earlier }.into()
}

/// Registry entry
pub fn family() -> Family<LShape, f64> {
    Family::new(
        NAME,
        "Ammann A2 L-shapes, two-generation recurrence",
        seed,
        transition,
        Equality::Decimals(DEDUP_DECIMALS),
    )
}
