//! Vertex placement by two-circle intersection
//!
//! Some subdivision vertices are not affine images of the parent's vertices;
//! they are pinned down by their distances to two known points instead. The
//! solver intersects the two circles in the coordinate field of the tiling
//! and picks the candidate satisfying a per-call [`Constraint`].
//!
//! Candidates are enumerated in a fixed order: the intersection to the left
//! of the directed line from the first anchor to the second comes first.
//! Tangent circles yield a single candidate.

use crate::io::configuration::SOLVER_DECIMALS;
use crate::io::error::{Result, TilingError};
use crate::math::scalar::{Equality, Scalar};
use crate::spatial::point::Point;
use crate::spatial::tile::{on_line, on_segment, polygon_contains};
use std::fmt;
use std::sync::Arc;

/// Predicate used to choose between circle intersections
pub enum Constraint<S> {
    /// Accept the first candidate
    Any,
    /// Candidate must lie on the line through two points
    OnLine(Point<S>, Point<S>),
    /// Candidate must lie on the closed segment between two points
    OnSegment(Point<S>, Point<S>),
    /// Candidate must lie inside or on the boundary of a polygon
    InsidePolygon(Vec<Point<S>>),
    /// Candidate must satisfy an arbitrary test
    Custom {
        /// Shown in error messages
        description: &'static str,
        /// The test itself
        test: Arc<dyn Fn(Point<S>) -> bool + Send + Sync>,
    },
}

impl<S: Scalar> Constraint<S> {
    /// Wrap a closure as a constraint
    pub fn custom(
        description: &'static str,
        test: impl Fn(Point<S>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Custom {
            description,
            test: Arc::new(test),
        }
    }

    /// Evaluate the constraint at `point`
    pub fn holds(&self, point: Point<S>, equality: Equality) -> bool {
        match self {
            Self::Any => true,
            Self::OnLine(start, end) => on_line(point, *start, *end, equality),
            Self::OnSegment(start, end) => on_segment(point, *start, *end, equality),
            Self::InsidePolygon(polygon) => polygon_contains(polygon, point, equality),
            Self::Custom { test, .. } => test(point),
        }
    }

    /// Human-readable form for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Any => "any point".to_string(),
            Self::OnLine(start, end) => {
                format!("on line {} -> {}", start.to_f64(), end.to_f64())
            }
            Self::OnSegment(start, end) => {
                format!("on segment {} -> {}", start.to_f64(), end.to_f64())
            }
            Self::InsidePolygon(polygon) => {
                let corners: Vec<String> = polygon.iter().map(|p| p.to_f64().to_string()).collect();
                format!("inside polygon [{}]", corners.join(", "))
            }
            Self::Custom { description, .. } => (*description).to_string(),
        }
    }
}

impl<S: Clone> Clone for Constraint<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Any => Self::Any,
            Self::OnLine(a, b) => Self::OnLine(a.clone(), b.clone()),
            Self::OnSegment(a, b) => Self::OnSegment(a.clone(), b.clone()),
            Self::InsidePolygon(polygon) => Self::InsidePolygon(polygon.clone()),
            Self::Custom { description, test } => Self::Custom {
                description: *description,
                test: Arc::clone(test),
            },
        }
    }
}

impl<S: Scalar> fmt::Debug for Constraint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Two-circle intersection solver with a fixed tie tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintSolver {
    tolerance: Equality,
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new(Equality::Decimals(SOLVER_DECIMALS))
    }
}

fn coordinates<S: Scalar>(point: Point<S>) -> (f64, f64) {
    let p = point.to_f64();
    (p.x, p.y)
}

impl ConstraintSolver {
    /// Create a solver comparing under `tolerance`
    pub const fn new(tolerance: Equality) -> Self {
        Self { tolerance }
    }

    /// Solver for exact coordinate fields
    pub const fn exact() -> Self {
        Self::new(Equality::Exact)
    }

    /// Tie tolerance used by predicates and tangency checks
    pub const fn tolerance(&self) -> Equality {
        self.tolerance
    }

    /// Tangency test on the squared half-chord, in coordinate units
    ///
    /// Exact fields are tangent only on an exact zero. Decimal tolerances
    /// compare the half-chord length itself, so two intersections further
    /// apart than the tolerance are never merged.
    fn half_chord_vanishes<S: Scalar>(&self, chord_squared: S) -> bool {
        match self.tolerance {
            Equality::Exact => chord_squared == S::zero(),
            Equality::Decimals(_) => self.tolerance.is_zero(chord_squared.to_f64().abs().sqrt()),
        }
    }

    /// All intersections of two circles given by squared radii
    ///
    /// Returns one point for tangent circles and two otherwise, left of
    /// `anchor_a → anchor_b` first.
    ///
    /// # Errors
    ///
    /// - `DegenerateCircles` if the anchors coincide
    /// - `NoIntersection` if the circles are disjoint or nested
    /// - `InexactRoot` if the field cannot represent the intersection
    pub fn intersections<S: Scalar>(
        &self,
        anchor_a: Point<S>,
        radius_squared_a: S,
        anchor_b: Point<S>,
        radius_squared_b: S,
    ) -> Result<Vec<Point<S>>> {
        let direction = anchor_b - anchor_a;
        let distance_squared = direction.norm_squared();
        if self.tolerance.is_zero(distance_squared) {
            let reason = if self.tolerance.same(radius_squared_a, radius_squared_b) {
                "circles coincide"
            } else {
                "anchors coincide"
            };
            return Err(TilingError::DegenerateCircles {
                anchor_a: coordinates(anchor_a),
                anchor_b: coordinates(anchor_b),
                reason,
            });
        }

        // Foot of the radical line, as a fraction of the anchor distance
        let along = (radius_squared_a - radius_squared_b + distance_squared)
            / (distance_squared + distance_squared);
        // Squared half-chord, in units of the anchor distance
        let height_squared = radius_squared_a / distance_squared - along * along;
        let foot = anchor_a + direction * along;

        if self.half_chord_vanishes(height_squared * distance_squared) {
            return Ok(vec![foot]);
        }
        if height_squared < S::zero() {
            return Err(TilingError::NoIntersection {
                anchor_a: coordinates(anchor_a),
                radius_a: radius_squared_a.to_f64().sqrt(),
                anchor_b: coordinates(anchor_b),
                radius_b: radius_squared_b.to_f64().sqrt(),
            });
        }
        let height = height_squared
            .checked_sqrt()
            .ok_or_else(|| TilingError::InexactRoot {
                operation: "circle intersection",
                value: format!("{height_squared:?}"),
            })?;
        let offset = direction.perpendicular() * height;
        Ok(vec![foot + offset, foot - offset])
    }

    /// First intersection of two circles satisfying `constraint`
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::intersections`], and returns
    /// `NoSolution` if no candidate satisfies the constraint
    pub fn solve<S: Scalar>(
        &self,
        anchor_a: Point<S>,
        radius_a: S,
        anchor_b: Point<S>,
        radius_b: S,
        constraint: &Constraint<S>,
    ) -> Result<Point<S>> {
        self.solve_squared(
            anchor_a,
            radius_a * radius_a,
            anchor_b,
            radius_b * radius_b,
            constraint,
        )
    }

    /// Like [`Self::solve`], with squared radii
    ///
    /// Lets exact fields place points whose radii are irrational but whose
    /// squared radii are not.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::intersections`], and returns
    /// `NoSolution` if no candidate satisfies the constraint
    pub fn solve_squared<S: Scalar>(
        &self,
        anchor_a: Point<S>,
        radius_squared_a: S,
        anchor_b: Point<S>,
        radius_squared_b: S,
        constraint: &Constraint<S>,
    ) -> Result<Point<S>> {
        let candidates =
            self.intersections(anchor_a, radius_squared_a, anchor_b, radius_squared_b)?;
        if let Some(found) = candidates
            .iter()
            .copied()
            .find(|&c| constraint.holds(c, self.tolerance))
        {
            return Ok(found);
        }

        tracing::debug!(
            constraint = %constraint.describe(),
            candidates = candidates.len(),
            "no circle intersection satisfies constraint"
        );
        Err(TilingError::NoSolution {
            anchor_a: coordinates(anchor_a),
            radius_a: radius_squared_a.to_f64().sqrt(),
            anchor_b: coordinates(anchor_b),
            radius_b: radius_squared_b.to_f64().sqrt(),
            constraint: constraint.describe(),
            candidates: candidates.into_iter().map(coordinates).collect(),
        })
    }
}
