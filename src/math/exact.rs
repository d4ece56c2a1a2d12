//! Exact coordinate fields
//!
//! [`Rational`] is a reduced fraction over `i128`. Arithmetic is checked: an
//! operation that overflows produces an *invalid* value that is never equal to
//! anything and reports `is_finite() == false`, so an overflowing tiling fails
//! validation instead of producing wrong coordinates.
//!
//! [`QuadraticSurd`] is `a + b·√D` with rational `a` and `b`. With `D = 5` it
//! represents the golden ratio and everything built from it exactly.

use crate::math::scalar::Scalar;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Reduced fraction with a positive denominator
#[derive(Clone, Copy, Debug)]
pub struct Rational {
    numerator: i128,
    denominator: i128,
}

const INVALID: Rational = Rational {
    numerator: 0,
    denominator: 0,
};

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    i128::try_from(a).unwrap_or(0)
}

impl Rational {
    /// Build `numerator / denominator` in lowest terms
    ///
    /// A zero denominator yields the invalid value.
    pub fn new(numerator: i128, denominator: i128) -> Self {
        if denominator == 0 {
            return INVALID;
        }
        let divisor = gcd(numerator, denominator);
        if divisor == 0 {
            return INVALID;
        }
        let (n, d) = (numerator / divisor, denominator / divisor);
        if d < 0 {
            match (n.checked_neg(), d.checked_neg()) {
                (Some(n), Some(d)) => Self {
                    numerator: n,
                    denominator: d,
                },
                _ => INVALID,
            }
        } else {
            Self {
                numerator: n,
                denominator: d,
            }
        }
    }

    /// The integer `value`
    pub const fn integer(value: i128) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// Numerator in lowest terms
    pub const fn numerator(self) -> i128 {
        self.numerator
    }

    /// Denominator in lowest terms, zero for the invalid value
    pub const fn denominator(self) -> i128 {
        self.denominator
    }

    /// False once an operation has overflowed or divided by zero
    pub const fn is_valid(self) -> bool {
        self.denominator != 0
    }

    /// Multiplicative inverse, invalid for zero
    pub fn recip(self) -> Self {
        if self.is_valid() {
            Self::new(self.denominator, self.numerator)
        } else {
            INVALID
        }
    }

    /// Sign as -1, 0 or 1; zero for the invalid value
    pub const fn signum(self) -> i32 {
        if !self.is_valid() || self.numerator == 0 {
            0
        } else if self.numerator > 0 {
            1
        } else {
            -1
        }
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        let divisor = gcd(self.denominator, other.denominator);
        let left = self
            .numerator
            .checked_mul(other.denominator / divisor)?;
        let right = other.numerator.checked_mul(self.denominator / divisor)?;
        let denominator = self.denominator.checked_mul(other.denominator / divisor)?;
        Some(Self::new(left.checked_add(right)?, denominator))
    }

    fn checked_mul(self, other: Self) -> Option<Self> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        if self.numerator == 0 || other.numerator == 0 {
            return Some(Self::zero());
        }
        let g1 = gcd(self.numerator, other.denominator);
        let g2 = gcd(other.numerator, self.denominator);
        let numerator = (self.numerator / g1).checked_mul(other.numerator / g2)?;
        let denominator = (self.denominator / g2).checked_mul(other.denominator / g1)?;
        Some(Self::new(numerator, denominator))
    }
}

// Compares a/b with c/d for positive b and d by continued-fraction expansion,
// so no intermediate product can overflow.
fn compare_fractions(a: i128, b: i128, c: i128, d: i128) -> Ordering {
    let (mut a, mut b, mut c, mut d) = (a, b, c, d);
    loop {
        let (qa, ra) = (a.div_euclid(b), a.rem_euclid(b));
        let (qc, rc) = (c.div_euclid(d), c.rem_euclid(d));
        if qa != qc {
            return qa.cmp(&qc);
        }
        match (ra == 0, rc == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        // ra/b < rc/d exactly when d/rc < b/ra
        (a, b, c, d) = (d, rc, b, ra);
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.numerator == other.numerator
            && self.denominator == other.denominator
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.is_valid() && other.is_valid()).then(|| {
            compare_fractions(
                self.numerator,
                self.denominator,
                other.numerator,
                other.denominator,
            )
        })
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(other).unwrap_or(INVALID)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.checked_mul(other).unwrap_or(INVALID)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        self * other.recip()
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        if !self.is_valid() {
            return INVALID;
        }
        self.numerator.checked_neg().map_or(INVALID, |numerator| Self {
            numerator,
            denominator: self.denominator,
        })
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::integer(0)
    }

    fn is_zero(&self) -> bool {
        self.is_valid() && self.numerator == 0
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::integer(1)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::integer(i128::from(value))
    }
}

impl Scalar for Rational {
    fn from_ratio(numerator: i64, denominator: i64) -> Self {
        Self::new(i128::from(numerator), i128::from(denominator))
    }

    fn to_f64(self) -> f64 {
        if self.is_valid() {
            self.numerator as f64 / self.denominator as f64
        } else {
            f64::NAN
        }
    }

    fn checked_sqrt(self) -> Option<Self> {
        if !self.is_valid() || self.numerator < 0 {
            return None;
        }
        let numerator = self.numerator.isqrt();
        let denominator = self.denominator.isqrt();
        (numerator.checked_mul(numerator) == Some(self.numerator)
            && denominator.checked_mul(denominator) == Some(self.denominator))
        .then_some(Self {
            numerator,
            denominator,
        })
    }

    fn is_finite(self) -> bool {
        self.is_valid()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            write!(f, "NaN")
        } else if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// The number `rational + surd·√D`
///
/// `D` must be a positive non-square integer so that the representation is
/// unique.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticSurd<const D: i64> {
    rational: Rational,
    surd: Rational,
}

/// Elements of ℚ(√5)
pub type Golden = QuadraticSurd<5>;

impl<const D: i64> QuadraticSurd<D> {
    /// Build `rational + surd·√D`
    pub const fn new(rational: Rational, surd: Rational) -> Self {
        Self { rational, surd }
    }

    /// The element `√D`
    pub const fn root() -> Self {
        Self::new(Rational::integer(0), Rational::integer(1))
    }

    /// Rational part
    pub const fn rational(self) -> Rational {
        self.rational
    }

    /// Coefficient of `√D`
    pub const fn surd(self) -> Rational {
        self.surd
    }

    /// The conjugate `rational - surd·√D`
    pub fn conjugate(self) -> Self {
        Self::new(self.rational, -self.surd)
    }

    /// Field norm `rational² - D·surd²`
    pub fn norm(self) -> Rational {
        self.rational * self.rational - Rational::from(D) * self.surd * self.surd
    }

    fn signum(self) -> Option<i32> {
        if !self.is_finite() {
            return None;
        }
        let (a, b) = (self.rational.signum(), self.surd.signum());
        if a >= 0 && b >= 0 {
            return Some(i32::from(a > 0 || b > 0));
        }
        if a <= 0 && b <= 0 {
            return Some(-1);
        }
        // Mixed signs: the rational part wins iff a² > D·b²
        let a_squared = self.rational * self.rational;
        let b_squared = Rational::from(D) * self.surd * self.surd;
        match a_squared.partial_cmp(&b_squared)? {
            Ordering::Greater => Some(a),
            Ordering::Less => Some(b),
            Ordering::Equal => Some(0),
        }
    }
}

impl Golden {
    /// The golden ratio `(1 + √5) / 2`
    pub fn golden_ratio() -> Self {
        let half = Rational::new(1, 2);
        Self::new(half, half)
    }
}

impl<const D: i64> PartialOrd for QuadraticSurd<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (*self - *other).signum().map(|sign| sign.cmp(&0))
    }
}

impl<const D: i64> Add for QuadraticSurd<D> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.rational + other.rational, self.surd + other.surd)
    }
}

impl<const D: i64> Sub for QuadraticSurd<D> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.rational - other.rational, self.surd - other.surd)
    }
}

impl<const D: i64> Mul for QuadraticSurd<D> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let d = Rational::from(D);
        Self::new(
            self.rational * other.rational + d * self.surd * other.surd,
            self.rational * other.surd + self.surd * other.rational,
        )
    }
}

impl<const D: i64> Div for QuadraticSurd<D> {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        let inverse_norm = other.norm().recip();
        let numerator = self * other.conjugate();
        Self::new(numerator.rational * inverse_norm, numerator.surd * inverse_norm)
    }
}

impl<const D: i64> Neg for QuadraticSurd<D> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.rational, -self.surd)
    }
}

impl<const D: i64> Zero for QuadraticSurd<D> {
    fn zero() -> Self {
        Self::new(Rational::zero(), Rational::zero())
    }

    fn is_zero(&self) -> bool {
        self.rational.is_zero() && self.surd.is_zero()
    }
}

impl<const D: i64> One for QuadraticSurd<D> {
    fn one() -> Self {
        Self::new(Rational::one(), Rational::zero())
    }
}

impl<const D: i64> From<Rational> for QuadraticSurd<D> {
    fn from(value: Rational) -> Self {
        Self::new(value, Rational::zero())
    }
}

impl<const D: i64> Scalar for QuadraticSurd<D> {
    fn from_ratio(numerator: i64, denominator: i64) -> Self {
        Self::from(Rational::from_ratio(numerator, denominator))
    }

    fn to_f64(self) -> f64 {
        self.rational.to_f64() + self.surd.to_f64() * (D as f64).sqrt()
    }

    fn checked_sqrt(self) -> Option<Self> {
        if self.signum()? < 0 {
            return None;
        }
        if self.surd.is_zero() {
            if let Some(root) = self.rational.checked_sqrt() {
                return Some(Self::from(root));
            }
            // rational = D·y² has root y·√D
            let root = (self.rational / Rational::from(D)).checked_sqrt()?;
            return Some(Self::new(Rational::zero(), root));
        }
        // (x + y√D)² = a + b√D needs x² = (a ± √(a² - D·b²)) / 2 and y = b / 2x
        let discriminant = self.norm().checked_sqrt()?;
        let half = Rational::new(1, 2);
        for x_squared in [
            (self.rational + discriminant) * half,
            (self.rational - discriminant) * half,
        ] {
            let Some(x) = x_squared.checked_sqrt() else {
                continue;
            };
            if x.is_zero() {
                continue;
            }
            let candidate = Self::new(x, self.surd / (x + x));
            if candidate.signum()? < 0 {
                return Some(-candidate);
            }
            return Some(candidate);
        }
        None
    }

    fn is_finite(self) -> bool {
        self.rational.is_valid() && self.surd.is_valid()
    }
}

impl<const D: i64> fmt::Display for QuadraticSurd<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.surd.is_zero() {
            write!(f, "{}", self.rational)
        } else {
            write!(f, "{} + {}√{D}", self.rational, self.surd)
        }
    }
}
