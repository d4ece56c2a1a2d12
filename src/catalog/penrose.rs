//! Penrose tiling by Robinson triangles
//!
//! Points are stored in the skew frame `a + b·ζ` with `ζ = e^{iπ/5}`, where
//! every tenth root of unity has coordinates in ℚ(√5). Splitting a golden
//! triangle only divides edges by `φ`, so the whole family stays exact and
//! vertex dedup needs no tolerance.
//!
//! Triangle vertices are the apex, then the two base corners.

use crate::algorithm::rules::{Production, RuleTable, Transition};
use crate::algorithm::solver::ConstraintSolver;
use crate::catalog::Family;
use crate::io::error::Result;
use crate::math::exact::Golden;
use crate::math::scalar::{Equality, Scalar};
use crate::spatial::point::Point;
use crate::spatial::tile::{Prototype, Tile};
use std::f64::consts::PI;

/// Family name
pub const NAME: &str = "penrose";

/// Golden triangle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Robinson {
    /// 36° apex, long legs
    Acute,
    /// 108° apex, short legs
    Obtuse,
}

impl Prototype for Robinson {
    fn name(self) -> &'static str {
        match self {
            Self::Acute => "acute",
            Self::Obtuse => "obtuse",
        }
    }

    fn vertex_count(self) -> usize {
        3
    }
}

type Triangle = Tile<Robinson, Golden>;

/// `ζ^k` in the skew frame
pub fn unit_root(k: usize) -> Point<Golden> {
    let phi = Golden::golden_ratio();
    let (zero, one) = (Golden::from_integer(0), Golden::from_integer(1));
    let base = match k % 5 {
        0 => Point::new(one, zero),
        1 => Point::new(zero, one),
        2 => Point::new(-one, phi),
        3 => Point::new(-phi, phi),
        _ => Point::new(-phi, one),
    };
    // ζ⁵ = -1
    if (k / 5) % 2 == 0 { base } else { -base }
}

/// Map skew coordinates to the Euclidean plane
///
/// The seed's spokes sit on multiples of `π/5`; the embedding turns them back
/// by `π/10` so the sun has its usual orientation.
pub fn embed(point: Point<Golden>) -> Point<f64> {
    let (a, b) = (point.x.to_f64(), point.y.to_f64());
    let skew = PI / 5.0;
    let (x, y) = (a + b * skew.cos(), b * skew.sin());
    let (sin, cos) = (-PI / 10.0).sin_cos();
    Point::new(x * cos - y * sin, x * sin + y * cos)
}

/// Sun: ten acute triangles around the origin, mirrored in alternation
///
/// # Errors
///
/// Returns `VertexCount` or `NonFiniteVertex` if a seed tile fails
/// [`Tile::from_corners`] validation
pub fn seed() -> Result<Vec<Triangle>> {
    (0..10)
        .map(|i| {
            let (b, c) = (unit_root(i), unit_root(i + 1));
            let (b, c) = if i % 2 == 0 { (c, b) } else { (b, c) };
            Tile::from_corners(Robinson::Acute, [Point::origin(), b, c])
        })
        .collect()
}

fn inverse_phi() -> Golden {
    Golden::golden_ratio() - Golden::from_integer(1)
}

fn split_acute(tile: &Triangle, _solver: &ConstraintSolver) -> Result<Vec<Triangle>> {
    let [a, b, c] = tile.corners()?;
    let p = a + (b - a) * inverse_phi();
    Ok(vec![
        Tile::from_corners(Robinson::Acute, [c, p, b])?,
        Tile::from_corners(Robinson::Obtuse, [p, c, a])?,
    ])
}

fn split_obtuse(tile: &Triangle, _solver: &ConstraintSolver) -> Result<Vec<Triangle>> {
    let [a, b, c] = tile.corners()?;
    let q = b + (a - b) * inverse_phi();
    let r = b + (c - b) * inverse_phi();
    Ok(vec![
        Tile::from_corners(Robinson::Obtuse, [r, c, a])?,
        Tile::from_corners(Robinson::Obtuse, [q, r, b])?,
        Tile::from_corners(Robinson::Acute, [r, q, a])?,
    ])
}

/// Acute triangles split in two, obtuse ones in three
pub fn transition() -> Transition<Robinson, Golden> {
    RuleTable::new(NAME, ConstraintSolver::exact())
        .with(Robinson::Acute, Production::rule(split_acute))
        .with(Robinson::Obtuse, Production::rule(split_obtuse))
        .into()
}

/// Registry entry
pub fn family() -> Family<Robinson, Golden> {
    Family::new(
        NAME,
        "Penrose sun deflated by Robinson triangles, exact in Q(sqrt 5)",
        seed,
        transition,
        Equality::Exact,
    )
    .with_embedding(embed)
}
