//! Deduplicated vertex sets extracted from tile meshes

use crate::math::scalar::{Equality, Scalar};
use crate::spatial::point::Point;
use crate::spatial::tile::{Prototype, Tile};
use std::cmp::Ordering;

/// Distinct vertices of a mesh, sorted by `(x, y)`
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSet<S> {
    points: Vec<Point<S>>,
}

impl<S: Scalar> VertexSet<S> {
    /// Collect and deduplicate every vertex of every tile
    pub fn from_tiles<P: Prototype>(tiles: &[Tile<P, S>], equality: Equality) -> Self {
        let points = tiles
            .iter()
            .flat_map(|tile| tile.vertices().iter().copied())
            .collect();
        Self::from_points(points, equality)
    }

    /// Deduplicate an arbitrary point list
    pub fn from_points(points: Vec<Point<S>>, equality: Equality) -> Self {
        Self {
            points: dedup_points(points, equality),
        }
    }

    /// Distinct points in sorted order
    pub fn points(&self) -> &[Point<S>] {
        &self.points
    }

    /// Take ownership of the points
    pub fn into_points(self) -> Vec<Point<S>> {
        self.points
    }

    /// Number of distinct points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points converted to floating point
    pub fn to_f64(&self) -> Vec<Point<f64>> {
        self.points.iter().map(|p| p.to_f64()).collect()
    }
}

fn compare_points<S: Scalar>(a: &Point<S>, b: &Point<S>) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Sort and remove points that are equal under `equality`
///
/// With `Equality::Decimals` points are grouped by their rounded coordinates
/// and the first point of each group in input order is kept.
pub fn dedup_points<S: Scalar>(mut points: Vec<Point<S>>, equality: Equality) -> Vec<Point<S>> {
    match equality {
        Equality::Exact => {
            points.sort_by(compare_points);
            points.dedup();
        }
        Equality::Decimals(_) => {
            let key = |p: &Point<S>| {
                (
                    equality.quantize(p.x.to_f64()),
                    equality.quantize(p.y.to_f64()),
                )
            };
            points.sort_by(|a, b| {
                let (ax, ay) = key(a);
                let (bx, by) = key(b);
                ax.total_cmp(&bx).then(ay.total_cmp(&by))
            });
            points.dedup_by(|a, b| key(a) == key(b));
        }
    }
    points
}
