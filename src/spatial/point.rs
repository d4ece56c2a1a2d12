//! Planar points and vectors over any coordinate field

use crate::math::scalar::Scalar;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point (or displacement vector) in the plane
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Point<S> {
    /// Horizontal coordinate
    pub x: S,
    /// Vertical coordinate
    pub y: S,
}

impl<S: Scalar> Point<S> {
    /// Create a point from its coordinates
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }

    /// The origin
    pub fn origin() -> Self {
        Self::new(S::zero(), S::zero())
    }

    /// Point with integer coordinates
    pub fn from_integers(x: i64, y: i64) -> Self {
        Self::new(S::from_integer(x), S::from_integer(y))
    }

    /// Dot product
    pub fn dot(self, other: Self) -> S {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product, positive when `other` is counter-clockwise
    pub fn cross(self, other: Self) -> S {
        self.x * other.y - self.y * other.x
    }

    /// Squared Euclidean length, exact in the coordinate field
    pub fn norm_squared(self) -> S {
        self.dot(self)
    }

    /// Squared Euclidean distance, exact in the coordinate field
    pub fn distance_squared(self, other: Self) -> S {
        (self - other).norm_squared()
    }

    /// Euclidean distance
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).to_f64().sqrt()
    }

    /// The vector rotated a quarter turn counter-clockwise
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(S::from_ratio(1, 2), other)
    }

    /// Weighted interpolation `(1 - t)·self + t·other`
    pub fn lerp(self, t: S, other: Self) -> Self {
        self * (S::one() - t) + other * t
    }

    /// Convert to floating point coordinates
    pub fn to_f64(self) -> Point<f64> {
        Point::new(self.x.to_f64(), self.y.to_f64())
    }

    /// Whether both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Apply a function to both coordinates
    pub fn map<T>(self, f: impl Fn(S) -> T) -> Point<T> {
        Point {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl Point<f64> {
    /// Polar angle normalized to whole turns, in `(-0.5, 0.5]`
    pub fn turn(self) -> f64 {
        self.y.atan2(self.x) / std::f64::consts::TAU
    }

    /// `y / x`, or `y` itself on the vertical axis
    pub fn slope(self) -> f64 {
        if self.x == 0.0 {
            self.y
        } else {
            self.y / self.x
        }
    }
}

impl<S: Scalar> Add for Point<S> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<S: Scalar> Sub for Point<S> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<S: Scalar> Neg for Point<S> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<S: Scalar> Mul<S> for Point<S> {
    type Output = Self;

    fn mul(self, factor: S) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl<S: Scalar> Div<S> for Point<S> {
    type Output = Self;

    fn div(self, divisor: S) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }
}

impl<S: fmt::Display> fmt::Display for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
