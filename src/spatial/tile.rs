//! Tagged polygons and point-in-polygon tests

use crate::io::error::{Result, TilingError};
use crate::math::scalar::{Equality, Scalar};
use crate::spatial::affine::AffineTransform;
use crate::spatial::point::Point;
use std::fmt::Debug;
use std::hash::Hash;

/// Category of tile within one tiling family
///
/// Each prototype fixes how many vertices its tiles carry; the meaning of each
/// vertex position is documented by the rule table that uses it.
pub trait Prototype: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Short name used in diagnostics
    fn name(self) -> &'static str;

    /// Number of vertices every tile of this prototype has
    fn vertex_count(self) -> usize;
}

/// A polygon tagged with its prototype
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<P, S> {
    prototype: P,
    vertices: Vec<Point<S>>,
}

impl<P: Prototype, S: Scalar> Tile<P, S> {
    /// Create a tile, checking the vertex count against the prototype
    ///
    /// # Errors
    ///
    /// Returns `VertexCount` if `vertices` does not match the prototype
    pub fn new(prototype: P, vertices: Vec<Point<S>>) -> Result<Self> {
        let expected = prototype.vertex_count();
        if vertices.len() != expected {
            return Err(TilingError::VertexCount {
                prototype: prototype.name(),
                expected,
                found: vertices.len(),
            });
        }
        Ok(Self {
            prototype,
            vertices,
        })
    }

    /// Create a tile from a fixed-size vertex array
    ///
    /// # Errors
    ///
    /// Returns `VertexCount` if `N` does not match the prototype
    pub fn from_corners<const N: usize>(prototype: P, corners: [Point<S>; N]) -> Result<Self> {
        Self::new(prototype, corners.to_vec())
    }

    /// Prototype tag
    pub const fn prototype(&self) -> P {
        self.prototype
    }

    /// Vertices in order
    pub fn vertices(&self) -> &[Point<S>] {
        &self.vertices
    }

    /// Take ownership of the vertices
    pub fn into_vertices(self) -> Vec<Point<S>> {
        self.vertices
    }

    /// Vertices as a fixed-size array, for destructuring inside rules
    ///
    /// # Errors
    ///
    /// Returns `VertexCount` if the tile does not have exactly `N` vertices
    pub fn corners<const N: usize>(&self) -> Result<[Point<S>; N]> {
        <[Point<S>; N]>::try_from(self.vertices.as_slice()).map_err(|_mismatch| {
            TilingError::VertexCount {
                prototype: self.prototype.name(),
                expected: N,
                found: self.vertices.len(),
            }
        })
    }

    /// Image of this tile under `transform`, tagged with `prototype`
    ///
    /// # Errors
    ///
    /// Returns `VertexCount` if `prototype` takes a different number of vertices
    pub fn transformed(&self, transform: &AffineTransform<S>, prototype: P) -> Result<Self> {
        Self::new(prototype, transform.apply_to_points(&self.vertices))
    }

    /// Position of the first vertex that is not finite
    pub fn first_non_finite(&self) -> Option<usize> {
        self.vertices.iter().position(|v| !v.is_finite())
    }

    /// Check the tile against its prototype contract
    ///
    /// # Errors
    ///
    /// Returns `VertexCount` or `NonFiniteVertex` describing the first violation
    pub fn validate(&self) -> Result<()> {
        let expected = self.prototype.vertex_count();
        if self.vertices.len() != expected {
            return Err(TilingError::VertexCount {
                prototype: self.prototype.name(),
                expected,
                found: self.vertices.len(),
            });
        }
        match self.first_non_finite() {
            Some(index) => Err(TilingError::NonFiniteVertex {
                prototype: self.prototype.name(),
                index,
            }),
            None => Ok(()),
        }
    }

    /// Average of the vertices
    pub fn centroid(&self) -> Point<S> {
        let count = S::from_integer(self.vertices.len() as i64);
        let sum = self
            .vertices
            .iter()
            .fold(Point::origin(), |acc, &v| acc + v);
        sum / count
    }

    /// Whether `point` lies inside the tile or on its boundary
    pub fn contains(&self, point: Point<S>, equality: Equality) -> bool {
        polygon_contains(&self.vertices, point, equality)
    }

    /// Convert to floating point coordinates
    pub fn to_f64(&self) -> Tile<P, f64> {
        Tile {
            prototype: self.prototype,
            vertices: self.vertices.iter().map(|v| v.to_f64()).collect(),
        }
    }
}

fn edges<S: Scalar>(polygon: &[Point<S>]) -> impl Iterator<Item = (Point<S>, Point<S>)> + '_ {
    polygon
        .iter()
        .copied()
        .zip(polygon.iter().copied().cycle().skip(1))
}

/// Whether `point` lies on the segment `start`–`end` under `equality`
pub fn on_segment<S: Scalar>(point: Point<S>, start: Point<S>, end: Point<S>, equality: Equality) -> bool {
    let direction = end - start;
    let offset = point - start;
    let length_squared = direction.norm_squared();
    if equality.is_zero(length_squared) {
        return equality.is_zero(offset.norm_squared());
    }
    if !on_line(point, start, end, equality) {
        return false;
    }
    let along = offset.dot(direction);
    let inside_start = along > S::zero() || equality.is_zero(along / length_squared);
    let inside_end = along < length_squared || equality.same(along / length_squared, S::one());
    inside_start && inside_end
}

/// Whether `point` lies on the infinite line through `start` and `end`
///
/// Under `Equality::Decimals` the perpendicular distance is rounded, so the
/// test does not depend on the segment length.
pub fn on_line<S: Scalar>(point: Point<S>, start: Point<S>, end: Point<S>, equality: Equality) -> bool {
    let direction = end - start;
    let cross = direction.cross(point - start);
    match equality {
        Equality::Exact => cross == S::zero(),
        Equality::Decimals(_) => {
            let length = direction.norm_squared().to_f64().sqrt();
            length > 0.0 && equality.is_zero(cross.to_f64() / length)
        }
    }
}

/// Crossing-number containment, with the boundary counted as inside
pub fn polygon_contains<S: Scalar>(polygon: &[Point<S>], point: Point<S>, equality: Equality) -> bool {
    if edges(polygon).any(|(start, end)| on_segment(point, start, end, equality)) {
        return true;
    }
    let mut inside = false;
    for (start, end) in edges(polygon) {
        let straddles = (end.y < point.y && start.y >= point.y) || (start.y < point.y && end.y >= point.y);
        if straddles {
            let crossing = end.x + (point.y - end.y) / (start.y - end.y) * (start.x - end.x);
            if crossing < point.x {
                inside = !inside;
            }
        }
    }
    inside
}
