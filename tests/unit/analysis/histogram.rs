//! Tests for histograms and density grids

#[cfg(test)]
mod tests {
    use inflatile::TilingError;
    use inflatile::analysis::histogram::{DensityGrid, Histogram, data_range};
    use inflatile::spatial::point::Point;

    fn histogram(values: &[f64], bins: usize, range: (f64, f64)) -> Histogram {
        Histogram::new(values, bins, range).unwrap_or_else(|e| panic!("histogram: {e}"))
    }

    // Tests values land in equal-width bins with the maximum in the last bin
    // Verified by dropping values equal to the maximum
    #[test]
    fn test_binning() {
        let h = histogram(&[0.0, 0.1, 0.5, 0.99, 1.0], 4, (0.0, 1.0));
        assert_eq!(h.counts().to_vec(), vec![2, 0, 1, 2]);
        assert_eq!(h.total(), 5);
        assert_eq!(h.bins(), 4);
        assert!((h.bin_width() - 0.25).abs() < 1e-12);
    }

    // Tests values outside the range or not finite are ignored
    // Verified by clamping outliers into the edge bins
    #[test]
    fn test_out_of_range_ignored() {
        let h = histogram(&[-1.0, 0.5, 2.0, f64::NAN, f64::INFINITY], 2, (0.0, 1.0));
        assert_eq!(h.counts().to_vec(), vec![0, 1]);
        assert_eq!(h.total(), 1);
    }

    // Tests a range wider than f64 can divide reports a computation error
    // Verified by binning everything into the first bin
    #[test]
    fn test_overflowing_range() {
        assert!(matches!(
            Histogram::new(&[0.0], 4, (-f64::MAX, f64::MAX)),
            Err(TilingError::Computation { .. })
        ));
    }

    // Tests invalid bin counts and ranges are rejected
    // Verified by accepting an empty range
    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Histogram::new(&[1.0], 0, (0.0, 1.0)),
            Err(TilingError::InvalidParameter { parameter: "bins", .. })
        ));
        assert!(matches!(
            Histogram::new(&[1.0], 3, (1.0, 1.0)),
            Err(TilingError::InvalidParameter { parameter: "range", .. })
        ));
        assert!(Histogram::new(&[1.0], 3, (0.0, f64::NAN)).is_err());
    }

    // Tests edges span the range with one more entry than bins
    // Verified by generating one edge per bin
    #[test]
    fn test_edges() {
        let edges = histogram(&[], 4, (-1.0, 1.0)).edges();
        let expected = [-1.0, -0.5, 0.0, 0.5, 1.0];
        assert_eq!(edges.len(), expected.len());
        for (edge, want) in edges.iter().zip(expected) {
            assert!((edge - want).abs() < 1e-12);
        }
    }

    // Tests density integrates to one
    // Verified by normalizing by the count only
    #[test]
    fn test_density_integrates_to_one() {
        let h = histogram(&[0.1, 0.2, 0.2, 1.7, 3.9], 8, (0.0, 4.0));
        let area: f64 = h.density().iter().map(|d| d * h.bin_width()).sum();
        assert!((area - 1.0).abs() < 1e-12);
        assert!(histogram(&[], 3, (0.0, 1.0)).density().iter().all(|&d| d == 0.0));
    }

    // Tests the data range covers finite values and widens constants
    // Verified by including infinite values in the range
    #[test]
    fn test_data_range() {
        assert_eq!(data_range(&[3.0, -1.0, f64::INFINITY, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(data_range(&[2.0, 2.0]), Some((1.5, 2.5)));
        assert_eq!(data_range(&[f64::NAN]), None);
        assert_eq!(data_range(&[]), None);
    }

    // Tests binning over the data's own range
    // Verified by using the unit interval for every input
    #[test]
    fn test_from_data() {
        let h = Histogram::from_data(&[10.0, 20.0, 30.0], 2).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(h.range(), (10.0, 30.0));
        assert_eq!(h.counts().to_vec(), vec![1, 2]);
        assert!(Histogram::from_data(&[], 2).is_err());
    }

    // Tests density grid rows run from the top of the bounding box
    // Verified by putting row zero at the bottom
    #[test]
    fn test_density_grid() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.9, 0.9),
            Point::new(0.1, 0.9),
        ];
        let grid = DensityGrid::from_points(&points, 2).unwrap_or_else(|e| panic!("grid: {e}"));
        assert_eq!(grid.resolution(), 2);
        assert_eq!(grid.counts().get([0, 1]).copied(), Some(2));
        assert_eq!(grid.counts().get([0, 0]).copied(), Some(1));
        assert_eq!(grid.counts().get([1, 0]).copied(), Some(1));
        assert_eq!(grid.max_count(), 2);
        assert_eq!(grid.bounds(), (Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
    }

    // Tests empty grids are rejected
    // Verified by returning an empty grid
    #[test]
    fn test_density_grid_invalid() {
        assert!(DensityGrid::from_points(&[], 4).is_err());
        assert!(DensityGrid::from_points(&[Point::new(0.0, 0.0)], 0).is_err());
    }
}
