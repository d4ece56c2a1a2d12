//! Square-triangle pinwheel
//!
//! A square splits into a tilted inner square and four right triangles whose
//! corners are found by circle intersection. Every squared distance involved
//! is a rational multiple of the parent's squared side, so the intersections
//! stay rational and the family runs in exact arithmetic.
//!
//! Square vertices run counter-clockwise. Triangle vertices are the right
//! angle, then the ends of the hypotenuse.

use crate::algorithm::rules::{Production, RuleTable, Transition};
use crate::algorithm::solver::{Constraint, ConstraintSolver};
use crate::catalog::Family;
use crate::io::error::Result;
use crate::math::exact::Rational;
use crate::math::scalar::Equality;
use crate::spatial::point::Point;
use crate::spatial::tile::{Prototype, Tile};

/// Family name
pub const NAME: &str = "pinwheel";

/// Square or right triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    /// Square, four vertices
    Square,
    /// Right triangle with legs in ratio 1 : 2
    Triangle,
}

impl Prototype for Piece {
    fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Triangle => "triangle",
        }
    }

    fn vertex_count(self) -> usize {
        match self {
            Self::Square => 4,
            Self::Triangle => 3,
        }
    }
}

type PieceTile = Tile<Piece, Rational>;

/// A 10 × 10 square at the origin
///
/// # Errors
///
/// Returns `VertexCount` or `NonFiniteVertex` if a seed tile fails
/// [`Tile::from_corners`] validation
pub fn seed() -> Result<Vec<PieceTile>> {
    let at = |x, y| Point::new(Rational::integer(x), Rational::integer(y));
    Ok(vec![Tile::from_corners(
        Piece::Square,
        [at(0, 0), at(10, 0), at(10, 10), at(0, 10)],
    )?])
}

fn split_square(tile: &PieceTile, solver: &ConstraintSolver) -> Result<Vec<PieceTile>> {
    let [a, b, c, d] = tile.corners()?;
    // Short leg of the corner triangles, squared; the long leg is twice as long
    let short = a.distance_squared(b) / Rational::integer(5);
    let long = short * Rational::integer(4);
    let inside = Constraint::InsidePolygon(vec![a, b, c, d]);

    let sc = solver.solve_squared(c, short, d, long, &inside)?;
    let sb = solver.solve_squared(b, short, c, long, &inside)?;
    let sa = solver.solve_squared(a, short, sb, short, &inside)?;
    let sd = solver.solve_squared(sa, short, a, long, &inside)?;

    Ok(vec![
        Tile::from_corners(Piece::Square, [sb, sc, sd, sa])?,
        Tile::from_corners(Piece::Triangle, [sa, a, b])?,
        Tile::from_corners(Piece::Triangle, [sb, b, c])?,
        Tile::from_corners(Piece::Triangle, [sc, c, d])?,
        Tile::from_corners(Piece::Triangle, [sd, d, a])?,
    ])
}

fn split_triangle(tile: &PieceTile, _solver: &ConstraintSolver) -> Result<Vec<PieceTile>> {
    let [a, b, c] = tile.corners()?;
    let fifth = |n| Rational::new(n, 5);
    let m1 = a.midpoint(c);
    let m2 = c.lerp(fifth(2), b);
    let m3 = c.lerp(fifth(3), b);
    let m4 = c.lerp(fifth(4), b);
    let m5 = a.midpoint(m4);
    let m6 = m1.midpoint(m5);

    Ok(vec![
        Tile::from_corners(Piece::Triangle, [m4, b, a])?,
        Tile::from_corners(Piece::Triangle, [m5, a, m1])?,
        Tile::from_corners(Piece::Triangle, [m2, m1, c])?,
        Tile::from_corners(Piece::Square, [m6, m1, m2, m3])?,
        Tile::from_corners(Piece::Square, [m5, m6, m3, m4])?,
    ])
}

/// Both pieces split into five
pub fn transition() -> Transition<Piece, Rational> {
    RuleTable::new(NAME, ConstraintSolver::exact())
        .with(Piece::Square, Production::rule(split_square))
        .with(Piece::Triangle, Production::rule(split_triangle))
        .into()
}

/// Registry entry
pub fn family() -> Family<Piece, Rational> {
    Family::new(
        NAME,
        "squares and 1:2 right triangles, corners solved by circle intersection",
        seed,
        transition,
        Equality::Exact,
    )
}
