//! Tests for two-circle intersection and constraint selection

#[cfg(test)]
mod tests {
    use inflatile::TilingError;
    use inflatile::algorithm::solver::{Constraint, ConstraintSolver};
    use inflatile::math::exact::Rational;
    use inflatile::math::scalar::Equality;
    use inflatile::spatial::point::Point;

    const EPSILON: f64 = 1e-9;

    fn close(a: Point<f64>, b: Point<f64>) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    fn q(x: i128, y: i128) -> Point<Rational> {
        Point::new(Rational::integer(x), Rational::integer(y))
    }

    // Tests both intersections are returned left of the anchor line first
    // Verified by swapping the offset sign
    #[test]
    fn test_two_intersections_left_first() {
        let solver = ConstraintSolver::default();
        let points = solver
            .intersections(Point::new(0.0, 0.0), 100.0, Point::new(10.0, 0.0), 100.0)
            .unwrap_or_else(|e| panic!("intersections: {e}"));
        assert_eq!(points.len(), 2);
        let height = 75.0_f64.sqrt();
        assert!(close(points[0], Point::new(5.0, height)));
        assert!(close(points[1], Point::new(5.0, -height)));
    }

    // Tests tangent circles give one candidate
    // Verified by always returning two candidates
    #[test]
    fn test_tangent_single_candidate() {
        let solver = ConstraintSolver::default();
        let points = solver
            .intersections(Point::new(0.0, 0.0), 25.0, Point::new(10.0, 0.0), 25.0)
            .unwrap_or_else(|e| panic!("tangent: {e}"));
        assert_eq!(points.len(), 1);
        assert!(close(points[0], Point::new(5.0, 0.0)));

        let grazing = solver
            .intersections(Point::new(0.0, 0.0), 25.0 + 1e-14, Point::new(10.0, 0.0), 25.0)
            .unwrap_or_else(|e| panic!("grazing: {e}"));
        assert_eq!(grazing.len(), 1);
    }

    // Tests solve squares plain radii before intersecting
    // Verified by passing radii through unsquared
    #[test]
    fn test_solve_with_any() {
        let solver = ConstraintSolver::default();
        let point = solver
            .solve(Point::new(0.0, 0.0), 10.0, Point::new(10.0, 0.0), 10.0, &Constraint::Any)
            .unwrap_or_else(|e| panic!("solve: {e}"));
        assert!(close(point, Point::new(5.0, 75.0_f64.sqrt())));
    }

    // Tests a constraint selects the second candidate
    // Verified by ignoring the constraint
    #[test]
    fn test_constraint_selects_candidate() {
        let solver = ConstraintSolver::default();
        let below = Constraint::custom("below the x axis", |p: Point<f64>| p.y < 0.0);
        let point = solver
            .solve(Point::new(0.0, 0.0), 10.0, Point::new(10.0, 0.0), 10.0, &below)
            .unwrap_or_else(|e| panic!("solve: {e}"));
        assert!(close(point, Point::new(5.0, -(75.0_f64.sqrt()))));

        let triangle = Constraint::InsidePolygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, -10.0),
            Point::new(10.0, 0.0),
        ]);
        let inside = solver
            .solve(Point::new(0.0, 0.0), 10.0, Point::new(10.0, 0.0), 10.0, &triangle)
            .unwrap_or_else(|e| panic!("solve: {e}"));
        assert!(inside.y < 0.0);
    }

    // Tests coinciding anchors are rejected with a reason
    // Verified by dividing by the zero anchor distance
    #[test]
    fn test_degenerate_circles() {
        let solver = ConstraintSolver::default();
        let origin = Point::new(0.0, 0.0);
        match solver.intersections(origin, 1.0, origin, 1.0) {
            Err(TilingError::DegenerateCircles { reason, .. }) => assert_eq!(reason, "circles coincide"),
            other => panic!("expected DegenerateCircles, got {other:?}"),
        }
        match solver.intersections(origin, 1.0, origin, 4.0) {
            Err(TilingError::DegenerateCircles { reason, .. }) => assert_eq!(reason, "anchors coincide"),
            other => panic!("expected DegenerateCircles, got {other:?}"),
        }
    }

    // Tests disjoint and nested circles report no intersection
    // Verified by taking the root of a negative height
    #[test]
    fn test_no_intersection() {
        let solver = ConstraintSolver::default();
        let disjoint = solver.intersections(Point::new(0.0, 0.0), 1.0, Point::new(10.0, 0.0), 1.0);
        assert!(matches!(disjoint, Err(TilingError::NoIntersection { .. })));
        let nested = solver.intersections(Point::new(0.0, 0.0), 100.0, Point::new(1.0, 0.0), 1.0);
        assert!(matches!(nested, Err(TilingError::NoIntersection { .. })));
    }

    // Tests a failed constraint lists the rejected candidates
    // Verified by returning the first candidate regardless
    #[test]
    fn test_no_solution_lists_candidates() {
        let solver = ConstraintSolver::default();
        let far = Constraint::OnSegment(Point::new(0.0, 20.0), Point::new(1.0, 20.0));
        match solver.solve(Point::new(0.0, 0.0), 10.0, Point::new(10.0, 0.0), 10.0, &far) {
            Err(TilingError::NoSolution {
                candidates,
                constraint,
                ..
            }) => {
                assert_eq!(candidates.len(), 2);
                assert!(constraint.starts_with("on segment"));
            }
            other => panic!("expected NoSolution, got {other:?}"),
        }
    }

    // Tests exact intersections stay in the rational field
    // Verified by routing through floating point
    #[test]
    fn test_exact_intersections() {
        let solver = ConstraintSolver::exact();
        let two = Rational::integer(2);
        let points = solver
            .intersections(q(0, 0), two, q(2, 0), two)
            .unwrap_or_else(|e| panic!("exact: {e}"));
        assert_eq!(points, vec![q(1, 1), q(1, -1)]);

        let one = Rational::integer(1);
        let tangent = solver
            .intersections(q(0, 0), one, q(2, 0), one)
            .unwrap_or_else(|e| panic!("tangent: {e}"));
        assert_eq!(tangent, vec![q(1, 0)]);
    }

    // Tests a short chord between distant anchors keeps both intersections
    // Verified by judging tangency relative to the anchor distance
    #[test]
    fn test_short_chord_far_anchors() {
        let radius_squared = 500.0 * 500.0 + 0.25;
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1000.0, 0.0);
        let points = ConstraintSolver::default()
            .intersections(a, radius_squared, b, radius_squared)
            .unwrap_or_else(|e| panic!("intersections: {e}"));
        assert_eq!(points.len(), 2);
        for point in &points {
            assert!((point.distance_squared(a) - radius_squared).abs() < 1e-6);
            assert!((point.distance_squared(b) - radius_squared).abs() < 1e-6);
        }
        assert!((points[0].y - 0.5).abs() < 1e-6);
        assert!((points[1].y + 0.5).abs() < 1e-6);

        let above = ConstraintSolver::default()
            .solve_squared(
                a,
                radius_squared,
                b,
                radius_squared,
                &Constraint::custom("y > 0", |p| p.y > 0.0),
            )
            .unwrap_or_else(|e| panic!("solve: {e}"));
        assert!((above.x - 500.0).abs() < 1e-6);

        let exact_radius = Rational::integer(250_000) + Rational::new(1, 4);
        let exact = ConstraintSolver::exact()
            .intersections(q(0, 0), exact_radius, q(1000, 0), exact_radius)
            .unwrap_or_else(|e| panic!("exact: {e}"));
        let half = Rational::new(1, 2);
        assert_eq!(
            exact,
            vec![
                Point::new(Rational::integer(500), half),
                Point::new(Rational::integer(500), -half),
            ]
        );
    }

    // Tests an irrational height fails in the rational field
    // Verified by rounding the root
    #[test]
    fn test_inexact_root() {
        let solver = ConstraintSolver::exact();
        let three = Rational::integer(3);
        let result = solver.intersections(q(0, 0), three, q(2, 0), three);
        assert!(matches!(result, Err(TilingError::InexactRoot { .. })));
    }

    // Tests constraint predicates and descriptions
    // Verified by inverting the line predicate
    #[test]
    fn test_constraint_holds() {
        let equality = Equality::Decimals(6);
        let on_line = Constraint::OnLine(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(on_line.holds(Point::new(5.0, 5.0), equality));
        assert!(!on_line.holds(Point::new(5.0, 4.0), equality));
        let on_segment = Constraint::OnSegment(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(!on_segment.holds(Point::new(5.0, 5.0), equality));
        assert!(Constraint::<f64>::Any.holds(Point::new(9.0, 9.0), equality));
        assert_eq!(Constraint::<f64>::Any.describe(), "any point");
        assert_eq!(
            Constraint::custom("right half", |p: Point<f64>| p.x > 0.0).describe(),
            "right half"
        );
    }

    // Tests the default solver compares floating point with a tolerance
    // Verified by defaulting to exact comparison
    #[test]
    fn test_default_tolerance() {
        assert!(matches!(ConstraintSolver::default().tolerance(), Equality::Decimals(_)));
        assert_eq!(ConstraintSolver::exact().tolerance(), Equality::Exact);
    }
}
