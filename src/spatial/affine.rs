//! Affine maps `p ↦ M·p + T` with an optional simplification hook

use crate::math::scalar::{Scalar, round_to_decimals};
use crate::spatial::point::Point;
use std::fmt;
use std::sync::Arc;

/// Post-processing applied to every coordinate an affine map produces
///
/// Keeps symbolic or noisy coordinates in a reduced form as they flow through
/// long composition chains.
pub struct Simplifier<S> {
    name: &'static str,
    function: Arc<dyn Fn(S) -> S + Send + Sync>,
}

impl<S> Clone for Simplifier<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            function: Arc::clone(&self.function),
        }
    }
}

impl<S> fmt::Debug for Simplifier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Simplifier").field(&self.name).finish()
    }
}

impl<S: Scalar> Simplifier<S> {
    /// Wrap a coordinate function under a descriptive name
    pub fn new(name: &'static str, function: impl Fn(S) -> S + Send + Sync + 'static) -> Self {
        Self {
            name,
            function: Arc::new(function),
        }
    }

    /// Name given at construction
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Simplify one coordinate
    pub fn apply(&self, value: S) -> S {
        (self.function)(value)
    }

    /// Simplify both coordinates of a point
    pub fn apply_point(&self, point: Point<S>) -> Point<S> {
        point.map(|v| self.apply(v))
    }
}

impl Simplifier<f64> {
    /// Snap coordinates to a fixed number of decimal places
    pub fn round_to(places: u32) -> Self {
        Self::new("round", move |v| round_to_decimals(v, places))
    }
}

/// Linear part plus translation
#[derive(Clone, Debug)]
pub struct AffineTransform<S> {
    matrix: [[S; 2]; 2],
    translation: Point<S>,
    simplifier: Option<Simplifier<S>>,
}

impl<S: Scalar> AffineTransform<S> {
    /// Create a transform from a row-major matrix and a translation
    pub const fn new(matrix: [[S; 2]; 2], translation: Point<S>) -> Self {
        Self {
            matrix,
            translation,
            simplifier: None,
        }
    }

    /// The identity map
    pub fn identity() -> Self {
        Self::new(
            [[S::one(), S::zero()], [S::zero(), S::one()]],
            Point::origin(),
        )
    }

    /// Uniform scaling about the origin followed by a translation
    pub fn scaling(factor: S, translation: Point<S>) -> Self {
        Self::new([[factor, S::zero()], [S::zero(), factor]], translation)
    }

    /// Attach a simplification hook
    #[must_use]
    pub fn with_simplifier(mut self, simplifier: Simplifier<S>) -> Self {
        self.simplifier = Some(simplifier);
        self
    }

    /// Copy of the row-major matrix
    pub const fn matrix(&self) -> [[S; 2]; 2] {
        self.matrix
    }

    /// Copy of the translation vector
    pub const fn translation(&self) -> Point<S> {
        self.translation
    }

    /// The attached simplification hook, if any
    pub const fn simplifier(&self) -> Option<&Simplifier<S>> {
        self.simplifier.as_ref()
    }

    /// Determinant of the linear part
    pub fn determinant(&self) -> S {
        let [[a, b], [c, d]] = self.matrix;
        a * d - b * c
    }

    /// Whether the map reverses orientation
    pub fn is_reflection(&self) -> bool {
        self.determinant() < S::zero()
    }

    fn linear(&self, point: Point<S>) -> Point<S> {
        let [[a, b], [c, d]] = self.matrix;
        Point::new(a * point.x + b * point.y, c * point.x + d * point.y)
    }

    fn simplify(&self, value: S) -> S {
        self.simplifier.as_ref().map_or(value, |s| s.apply(value))
    }

    /// Map a point: `M·p + T`
    pub fn apply_to_point(&self, point: Point<S>) -> Point<S> {
        let image = self.linear(point) + self.translation;
        image.map(|v| self.simplify(v))
    }

    /// Map every point of a polygon
    pub fn apply_to_points(&self, points: &[Point<S>]) -> Vec<Point<S>> {
        points.iter().map(|&p| self.apply_to_point(p)).collect()
    }

    /// The map "apply `inner`, then `self`": `(M·M', M·T' + T)`
    ///
    /// The result keeps the receiver's simplifier, or `inner`'s when the
    /// receiver has none.
    #[must_use]
    pub fn compose(&self, inner: &Self) -> Self {
        let [[a, b], [c, d]] = self.matrix;
        let [[e, f], [g, h]] = inner.matrix;
        let simplifier = self.simplifier.clone().or_else(|| inner.simplifier.clone());
        let simplify = |v: S| simplifier.as_ref().map_or(v, |s| s.apply(v));
        let matrix = [
            [simplify(a * e + b * g), simplify(a * f + b * h)],
            [simplify(c * e + d * g), simplify(c * f + d * h)],
        ];
        let translation = (self.linear(inner.translation) + self.translation).map(simplify);
        Self {
            matrix,
            translation,
            simplifier,
        }
    }

    /// The map "apply `self`, then `outer`"
    #[must_use]
    pub fn then(&self, outer: &Self) -> Self {
        outer.compose(self)
    }

    /// Convert to floating point, dropping the simplifier
    pub fn to_f64(&self) -> AffineTransform<f64> {
        let [[a, b], [c, d]] = self.matrix;
        AffineTransform::new(
            [[a.to_f64(), b.to_f64()], [c.to_f64(), d.to_f64()]],
            self.translation.to_f64(),
        )
    }
}

impl<S: Scalar> PartialEq for AffineTransform<S> {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix && self.translation == other.translation
    }
}

impl<S: Scalar + fmt::Display> fmt::Display for AffineTransform<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b], [c, d]] = self.matrix;
        write!(f, "[[{a}, {b}], [{c}, {d}]] + {}", self.translation)
    }
}
