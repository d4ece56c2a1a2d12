//! Ammann chair
//!
//! The L-shaped chair is the union of four half-scale copies of itself: two
//! translated, one rotated a quarter turn clockwise and one reflected across
//! the vertical axis. Coordinates stay dyadic, so the family is exact.

use crate::algorithm::rules::{AffineChild, Production, RuleTable, Transition};
use crate::algorithm::solver::ConstraintSolver;
use crate::catalog::Family;
use crate::io::error::Result;
use crate::math::exact::Rational;
use crate::math::scalar::Equality;
use crate::spatial::affine::AffineTransform;
use crate::spatial::point::Point;
use crate::spatial::tile::{Prototype, Tile};

/// Family name
pub const NAME: &str = "chair";

/// The only prototype of this family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chair;

impl Prototype for Chair {
    fn name(self) -> &'static str {
        "chair"
    }

    fn vertex_count(self) -> usize {
        6
    }
}

fn quarter(numerator: i128) -> Rational {
    Rational::new(numerator, 4)
}

/// Unit chair: the unit square minus its upper-right quadrant
///
/// # Errors
///
/// Returns `VertexCount` or `NonFiniteVertex` if a seed tile fails
/// [`Tile::from_corners`] validation
pub fn seed() -> Result<Vec<Tile<Chair, Rational>>> {
    let at = |x, y| Point::new(quarter(x), quarter(y));
    Ok(vec![Tile::from_corners(
        Chair,
        [at(0, 0), at(4, 0), at(4, 2), at(2, 2), at(2, 4), at(0, 4)],
    )?])
}

/// The four self-similar pieces of the chair
pub fn transition() -> Transition<Chair, Rational> {
    let half = quarter(2);
    let zero = Rational::integer(0);
    let child = |matrix, x, y| AffineChild {
        prototype: Chair,
        transform: AffineTransform::new(matrix, Point::new(quarter(x), quarter(y))),
    };
    let scaled = [[half, zero], [zero, half]];
    let rotated = [[zero, half], [-half, zero]];
    let mirrored = [[-half, zero], [zero, half]];

    RuleTable::new(NAME, ConstraintSolver::exact())
        .with(
            Chair,
            Production::Affine(vec![
                child(scaled, 0, 0),
                child(scaled, 1, 1),
                child(rotated, 0, 4),
                child(mirrored, 4, 0),
            ]),
        )
        .into()
}

/// Registry entry
pub fn family() -> Family<Chair, Rational> {
    Family::new(
        NAME,
        "Ammann chair, four half-scale copies per step",
        seed,
        transition,
        Equality::Exact,
    )
}
