//! Point-set statistics: pair correlation, angles, slopes and their gaps
//!
//! Every function is a pure transform of a vertex list. Per-point and
//! per-pair work runs on the rayon pool for large inputs; results are sorted
//! or kept in input order, never in completion order.

use crate::io::configuration::{DEFAULT_MAX_PAIRS, PARALLEL_THRESHOLD};
use crate::io::error::{Result, TilingError};
use crate::math::scalar::Equality;
use crate::spatial::point::Point;
use clap::ValueEnum;
use rayon::prelude::*;

/// Whether pair distances are reported plain or squared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceKind {
    /// Euclidean distance
    #[default]
    Euclidean,
    /// Squared Euclidean distance
    Squared,
}

/// Which vertex pairs contribute a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pairs {
    /// Both (a, b) and (b, a), so every distance appears twice
    #[default]
    Ordered,
    /// Each unordered pair once
    Unordered,
}

/// Options for [`pair_correlation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOptions {
    /// Plain or squared distances
    pub kind: DistanceKind,
    /// Ordered or unordered pairs
    pub pairs: Pairs,
    /// Sort the result ascending
    pub sorted: bool,
    /// Largest number of pairs that may be collected
    pub max_pairs: usize,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            kind: DistanceKind::default(),
            pairs: Pairs::default(),
            sorted: false,
            max_pairs: DEFAULT_MAX_PAIRS,
        }
    }
}

fn pair_count(points: usize, pairs: Pairs) -> Option<usize> {
    let ordered = points.checked_mul(points.saturating_sub(1))?;
    Some(match pairs {
        Pairs::Ordered => ordered,
        Pairs::Unordered => ordered / 2,
    })
}

fn sort_values(values: &mut [f64]) {
    if values.len() < PARALLEL_THRESHOLD {
        values.sort_unstable_by(f64::total_cmp);
    } else {
        values.par_sort_unstable_by(f64::total_cmp);
    }
}

fn per_point(points: &[Point<f64>], f: fn(Point<f64>) -> f64) -> Vec<f64> {
    if points.len() < PARALLEL_THRESHOLD {
        points.iter().map(|&p| f(p)).collect()
    } else {
        points.par_iter().map(|&p| f(p)).collect()
    }
}

/// Distances between all distinct pairs of points, zero distances excluded
///
/// Unsorted output lists pairs row by row in input order.
///
/// # Errors
///
/// Returns `ResourceExhausted` if the pair count exceeds
/// `options.max_pairs` or the distances cannot be allocated
pub fn pair_correlation(points: &[Point<f64>], options: PairOptions) -> Result<Vec<f64>> {
    let count = pair_count(points.len(), options.pairs).unwrap_or(usize::MAX);
    let exhausted = || TilingError::ResourceExhausted {
        step: 0,
        resource: "pair distances",
        requested: count,
        limit: options.max_pairs,
    };
    if count > options.max_pairs {
        tracing::warn!(
            points = points.len(),
            pairs = count,
            limit = options.max_pairs,
            "pair budget exceeded"
        );
        return Err(exhausted());
    }
    let mut distances: Vec<f64> = Vec::new();
    distances
        .try_reserve_exact(count)
        .map_err(|_allocation| exhausted())?;

    let row = |(i, &a): (usize, &Point<f64>)| {
        let start = match options.pairs {
            Pairs::Ordered => 0,
            Pairs::Unordered => i + 1,
        };
        points
            .iter()
            .skip(start)
            .map(move |&b| match options.kind {
                DistanceKind::Euclidean => a.distance(b),
                DistanceKind::Squared => a.distance_squared(b),
            })
            .filter(|&d| d != 0.0)
    };

    if points.len() < PARALLEL_THRESHOLD {
        distances.extend(points.iter().enumerate().flat_map(row));
    } else {
        distances.par_extend(points.par_iter().enumerate().flat_map_iter(row));
    }

    if options.sorted {
        sort_values(&mut distances);
    }
    Ok(distances)
}

/// Sort ascending and drop values equal under `equality`
pub fn sorted_unique(mut values: Vec<f64>, equality: Equality) -> Vec<f64> {
    sort_values(&mut values);
    values.dedup_by(|a, b| equality.same(*a, *b));
    values
}

/// Consecutive differences of a sorted sequence
pub fn gaps(sorted: &[f64]) -> Vec<f64> {
    sorted
        .windows(2)
        .map(|pair| match pair {
            [a, b] => b - a,
            _ => 0.0,
        })
        .collect()
}

/// Per-point angle `atan2(y, x) / 2π`, sorted ascending, duplicates kept
pub fn point_angles(points: &[Point<f64>]) -> Vec<f64> {
    let mut angles = per_point(points, Point::<f64>::turn);
    sort_values(&mut angles);
    angles
}

/// Distinct per-point angles, sorted ascending
pub fn sorted_angles(points: &[Point<f64>], equality: Equality) -> Vec<f64> {
    sorted_unique(per_point(points, Point::<f64>::turn), equality)
}

/// Gaps between consecutive distinct angles
pub fn angle_gaps(points: &[Point<f64>], equality: Equality) -> Vec<f64> {
    gaps(&sorted_angles(points, equality))
}

/// Per-point slope `y / x` (`y` when `x == 0`), sorted ascending, duplicates kept
pub fn point_slopes(points: &[Point<f64>]) -> Vec<f64> {
    let mut slopes = per_point(points, Point::<f64>::slope);
    sort_values(&mut slopes);
    slopes
}

/// Distinct per-point slopes, sorted ascending
pub fn sorted_slopes(points: &[Point<f64>], equality: Equality) -> Vec<f64> {
    sorted_unique(per_point(points, Point::<f64>::slope), equality)
}

/// Gaps between consecutive distinct slopes
pub fn slope_gaps(points: &[Point<f64>], equality: Equality) -> Vec<f64> {
    gaps(&sorted_slopes(points, equality))
}

/// Statistic selectable from the command line and the plot-range file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Statistic {
    /// Pair-correlation distances
    #[value(name = "pc-edist")]
    PairDistance,
    /// Pair-correlation squared distances
    #[value(name = "pc-edistsq")]
    PairDistanceSquared,
    /// Sorted distinct point angles
    #[value(name = "angles")]
    Angles,
    /// Gaps between sorted point angles
    #[value(name = "anglegaps")]
    AngleGaps,
    /// Sorted distinct point slopes
    #[value(name = "slopes")]
    Slopes,
    /// Gaps between sorted point slopes
    #[value(name = "slopegaps")]
    SlopeGaps,
}

impl Statistic {
    /// All statistics, in plot-range file column order
    pub const ALL: [Self; 6] = [
        Self::PairDistance,
        Self::PairDistanceSquared,
        Self::Angles,
        Self::AngleGaps,
        Self::Slopes,
        Self::SlopeGaps,
    ];

    /// Key used in file names and the plot-range file
    pub const fn key(self) -> &'static str {
        match self {
            Self::PairDistance => "pc-edist",
            Self::PairDistanceSquared => "pc-edistsq",
            Self::Angles => "angles",
            Self::AngleGaps => "anglegaps",
            Self::Slopes => "slopes",
            Self::SlopeGaps => "slopegaps",
        }
    }

    /// Column of this statistic in the plot-range file
    pub const fn column(self) -> usize {
        match self {
            Self::PairDistance => 0,
            Self::PairDistanceSquared => 1,
            Self::Angles => 2,
            Self::AngleGaps => 3,
            Self::Slopes => 4,
            Self::SlopeGaps => 5,
        }
    }

    /// Whether this statistic measures gaps
    pub const fn is_gap(self) -> bool {
        matches!(self, Self::AngleGaps | Self::SlopeGaps)
    }

    /// Compute the statistic over a deduplicated vertex list
    ///
    /// Pair statistics collect at most `max_pairs` distances.
    ///
    /// # Errors
    ///
    /// Returns `ResourceExhausted` if a pair statistic exceeds `max_pairs`
    pub fn compute(
        self,
        points: &[Point<f64>],
        equality: Equality,
        max_pairs: usize,
    ) -> Result<Vec<f64>> {
        let pair_options = |kind| PairOptions {
            kind,
            pairs: Pairs::Ordered,
            sorted: true,
            max_pairs,
        };
        Ok(match self {
            Self::PairDistance => pair_correlation(points, pair_options(DistanceKind::Euclidean))?,
            Self::PairDistanceSquared => {
                pair_correlation(points, pair_options(DistanceKind::Squared))?
            }
            Self::Angles => sorted_angles(points, equality),
            Self::AngleGaps => angle_gaps(points, equality),
            Self::Slopes => sorted_slopes(points, equality),
            Self::SlopeGaps => slope_gaps(points, equality),
        })
    }

    /// Rescale values for binning: gaps are multiplied by their count squared
    pub fn rescale(self, mut values: Vec<f64>) -> Vec<f64> {
        if self.is_gap() {
            let count = values.len() as f64;
            let factor = count * count;
            for value in &mut values {
                *value *= factor;
            }
        }
        values
    }
}
