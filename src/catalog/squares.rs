//! Unit square quartered at every step
//!
//! The smallest non-trivial family: generation `n` holds `4ⁿ` squares of side
//! `2⁻ⁿ` covering the unit square.

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
pub const NAME: &str = "squares";

/// The only prototype of this family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square;

impl Prototype for Square {
    fn name(self) -> &'static str {
        "square"
    }

    fn vertex_count(self) -> usize {
        4
    }
}

/// Counter-clockwise unit square at the origin
///
/// # Errors
///
/// Returns `VertexCount` or `NonFiniteVertex` if a seed tile fails
/// [`Tile::from_corners`] validation
pub fn seed() -> Result<Vec<Tile<Square, Rational>>> {
    let corner = |x, y| Point::new(Rational::integer(x), Rational::integer(y));
    Ok(vec![Tile::from_corners(
        Square,
        [corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)],
    )?])
}

/// Four half-scale copies, one per quadrant
pub fn transition() -> Transition<Square, Rational> {
    let half = Rational::new(1, 2);
    let quadrant = |x: i128, y: i128| AffineChild {
        prototype: Square,
        transform: AffineTransform::scaling(half, Point::new(Rational::new(x, 2), Rational::new(y, 2))),
    };
    RuleTable::new(NAME, ConstraintSolver::exact())
        .with(
            Square,
            Production::Affine(vec![quadrant(0, 0), quadrant(1, 0), quadrant(0, 1), quadrant(1, 1)]),
        )
        .into()
}

/// Registry entry
pub fn family() -> Family<Square, Rational> {
    Family::new(
        NAME,
        "unit square split into four half-size squares",
        seed,
        transition,
        Equality::Exact,
    )
}
