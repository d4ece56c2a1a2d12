//! Fibonacci squares
//!
//! Three rectangle kinds with branching 1, 4 and 2. Blue tiles are retagged
//! as yellow without moving. Yellow tiles split at thirds of their sides;
//! orange tiles split across their second edge, which is the long one.

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
pub const NAME: &str = "fibonacci";

/// Rectangle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rectangle {
    /// Grows into a yellow tile in place
    Blue,
    /// Splits into four
    Yellow,
    /// Oblong, splits into two
    Orange,
}

impl Prototype for Rectangle {
    fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
        }
    }

    fn vertex_count(self) -> usize {
        4
    }
}

type Quad = Tile<Rectangle, Rational>;

fn third(numerator: i128) -> Rational {
    Rational::new(numerator, 3)
}

/// One 9 × 9 yellow square at the origin
///
/// # Errors
///
/// Returns `VertexCount` or `NonFiniteVertex` if a seed tile fails
/// [`Tile::from_corners`] validation
pub fn seed() -> Result<Vec<Quad>> {
    let at = |x, y| Point::new(Rational::integer(x), Rational::integer(y));
    Ok(vec![Tile::from_corners(
        Rectangle::Yellow,
        [at(0, 0), at(9, 0), at(9, 9), at(0, 9)],
    )?])
}

fn split_yellow(tile: &Quad, _solver: &ConstraintSolver) -> Result<Vec<Quad>> {
    let [a, b, c, d] = tile.corners()?;
    let m1 = a.lerp(third(2), b);
    let m2 = b.lerp(third(2), c);
    let m3 = c.lerp(third(1), d);
    let m4 = d.lerp(third(1), a);
    let centre = m3.lerp(third(1), m1);
    Ok(vec![
        Tile::from_corners(Rectangle::Orange, [m1, b, m2, centre])?,
        Tile::from_corners(Rectangle::Yellow, [a, m1, centre, m4])?,
        Tile::from_corners(Rectangle::Blue, [centre, m2, c, m3])?,
        Tile::from_corners(Rectangle::Orange, [m4, d, m3, centre])?,
    ])
}

fn split_orange(tile: &Quad, _solver: &ConstraintSolver) -> Result<Vec<Quad>> {
    let [a, b, c, d] = tile.corners()?;
    let m1 = b.lerp(third(2), c);
    let m2 = d.lerp(third(1), a);
    Ok(vec![
        Tile::from_corners(Rectangle::Orange, [m2, d, c, m1])?,
        Tile::from_corners(Rectangle::Yellow, [a, b, m1, m2])?,
    ])
}

/// Blue becomes yellow in place, yellow splits in four and orange in two
pub fn transition() -> Transition<Rectangle, Rational> {
    let regrow = AffineChild {
        prototype: Rectangle::Yellow,
        transform: AffineTransform::identity(),
    };
    RuleTable::new(NAME, ConstraintSolver::exact())
        .with(Rectangle::Blue, Production::Affine(vec![regrow]))
        .with(Rectangle::Yellow, Production::rule(split_yellow))
        .with(Rectangle::Orange, Production::rule(split_orange))
        .into()
}

/// Registry entry
pub fn family() -> Family<Rectangle, Rational> {
    Family::new(
        NAME,
        "Fibonacci squares, blue regrows as yellow",
        seed,
        transition,
        Equality::Exact,
    )
}
