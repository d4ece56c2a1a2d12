//! Equal-width histograms and 2D vertex density grids

use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::point::Point;
use ndarray::{Array1, Array2};

/// Counts of values in equal-width bins over a closed range
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    range: (f64, f64),
    counts: Array1<u64>,
    total: u64,
}

fn bin_index(value: f64, min: f64, width: f64, bins: usize) -> usize {
    // The maximum of the range lands in the last bin
    (((value - min) / width) as usize).min(bins.saturating_sub(1))
}

impl Histogram {
    /// Bin `values` over `range`, ignoring values outside it
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `bins` is zero or the range is empty or
    /// not finite, and `Computation` if the range is too wide to divide
    pub fn new(values: &[f64], bins: usize, range: (f64, f64)) -> Result<Self> {
        if bins == 0 {
            return Err(invalid_parameter("bins", &bins, &"must be positive"));
        }
        let (min, max) = range;
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(invalid_parameter(
                "range",
                &format!("[{min}, {max}]"),
                &"must be a finite interval with min < max",
            ));
        }

        let width = (max - min) / bins as f64;
        if !width.is_finite() {
            return Err(computation_error("histogram bin width", &"range overflows f64"));
        }
        let mut counts = Array1::<u64>::zeros(bins);
        let mut total = 0;
        for &value in values {
            if value.is_finite() && value >= min && value <= max {
                if let Some(count) = counts.get_mut(bin_index(value, min, width, bins)) {
                    *count += 1;
                    total += 1;
                }
            }
        }

        Ok(Self {
            range,
            counts,
            total,
        })
    }

    /// Bin `values` over their own minimum and maximum
    ///
    /// A single repeated value is centred in a unit-wide range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if there are no finite values or `bins` is zero
    pub fn from_data(values: &[f64], bins: usize) -> Result<Self> {
        let range = data_range(values).ok_or_else(|| {
            invalid_parameter("values", &values.len(), &"no finite values to bin")
        })?;
        Self::new(values, bins, range)
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Closed range covered by the bins
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Width of every bin
    pub fn bin_width(&self) -> f64 {
        (self.range.1 - self.range.0) / self.bins() as f64
    }

    /// Raw counts per bin
    pub const fn counts(&self) -> &Array1<u64> {
        &self.counts
    }

    /// Number of values that fell inside the range
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Bin boundaries, one more than the number of bins
    pub fn edges(&self) -> Array1<f64> {
        Array1::linspace(self.range.0, self.range.1, self.bins() + 1)
    }

    /// Counts normalized so that the bar areas sum to one
    pub fn density(&self) -> Array1<f64> {
        if self.total == 0 {
            return Array1::zeros(self.bins());
        }
        let scale = self.total as f64 * self.bin_width();
        self.counts.mapv(|count| count as f64 / scale)
    }
}

/// Smallest range containing every finite value
///
/// Widened to a unit interval around the value when all values are equal.
pub fn data_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |bounds: Option<(f64, f64)>, v| match bounds {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if min < max {
        Some((min, max))
    } else {
        Some((min - 0.5, max + 0.5))
    }
}

/// Counts of points in a square grid over their bounding box
///
/// Row 0 is the top of the box (largest y).
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    counts: Array2<u64>,
    lower: Point<f64>,
    upper: Point<f64>,
}

impl DensityGrid {
    /// Bin finite points into a `resolution × resolution` grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `resolution` is zero or there are no
    /// finite points
    pub fn from_points(points: &[Point<f64>], resolution: usize) -> Result<Self> {
        if resolution == 0 {
            return Err(invalid_parameter(
                "resolution",
                &resolution,
                &"must be positive",
            ));
        }
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let (Some((x_min, x_max)), Some((y_min, y_max))) = (data_range(&xs), data_range(&ys))
        else {
            return Err(invalid_parameter(
                "points",
                &points.len(),
                &"no finite points to bin",
            ));
        };

        let width = (x_max - x_min) / resolution as f64;
        let height = (y_max - y_min) / resolution as f64;
        let mut counts = Array2::<u64>::zeros((resolution, resolution));
        for point in points.iter().filter(|p| p.is_finite()) {
            let row = bin_index(y_max - point.y, 0.0, height, resolution);
            let col = bin_index(point.x - x_min, 0.0, width, resolution);
            if let Some(count) = counts.get_mut([row, col]) {
                *count += 1;
            }
        }

        Ok(Self {
            counts,
            lower: Point::new(x_min, y_min),
            upper: Point::new(x_max, y_max),
        })
    }

    /// Cells per side
    pub fn resolution(&self) -> usize {
        self.counts.nrows()
    }

    /// Raw counts, indexed `[row, col]`
    pub const fn counts(&self) -> &Array2<u64> {
        &self.counts
    }

    /// Lower-left and upper-right corners of the covered box
    pub const fn bounds(&self) -> (Point<f64>, Point<f64>) {
        (self.lower, self.upper)
    }

    /// Largest count in any cell
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
