//! Coordinate fields and the equality rule shared by dedup, solving and statistics

use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Div, Mul, Neg, Sub};

/// Arithmetic a coordinate field must provide
///
/// Implemented by `f64` for floating-point tilings and by the exact fields in
/// [`crate::math::exact`] for tilings that depend on exact cancellation.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The value `numerator / denominator`
    fn from_ratio(numerator: i64, denominator: i64) -> Self;

    /// Nearest `f64`
    fn to_f64(self) -> f64;

    /// Non-negative square root, if the field can represent it
    fn checked_sqrt(self) -> Option<Self>;

    /// False for NaN, infinities and overflowed exact values
    fn is_finite(self) -> bool;

    /// The integer `value`
    fn from_integer(value: i64) -> Self {
        Self::from_ratio(value, 1)
    }
}

impl Scalar for f64 {
    fn from_ratio(numerator: i64, denominator: i64) -> Self {
        numerator as Self / denominator as Self
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn checked_sqrt(self) -> Option<Self> {
        (self >= 0.0).then(|| self.sqrt())
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// How two coordinates are judged equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equality {
    /// Field equality, for exact coordinates
    Exact,
    /// Equal after rounding to the given number of decimal places
    Decimals(u32),
}

impl Equality {
    /// Check whether `a` and `b` are the same value under this rule
    pub fn same<S: Scalar>(self, a: S, b: S) -> bool {
        match self {
            Self::Exact => a == b,
            Self::Decimals(places) => {
                round_to_decimals(a.to_f64(), places) == round_to_decimals(b.to_f64(), places)
            }
        }
    }

    /// Check whether `value` is zero under this rule
    pub fn is_zero<S: Scalar>(self, value: S) -> bool {
        self.same(value, S::zero())
    }

    /// Representative used for sorting and grouping under this rule
    pub fn quantize(self, value: f64) -> f64 {
        match self {
            Self::Exact => value,
            Self::Decimals(places) => round_to_decimals(value, places),
        }
    }
}

/// Round to a fixed number of decimal places
pub fn round_to_decimals(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    // Adding +0.0 turns -0.0 into +0.0
    (value * scale).round() / scale + 0.0
}
