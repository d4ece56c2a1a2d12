//! Tests for the square-triangle pinwheel family

#[cfg(test)]
mod tests {
    use inflatile::algorithm::engine::SubstitutionEngine;
    use inflatile::catalog::pinwheel::{self, Piece};
    use inflatile::math::exact::Rational;
    use inflatile::spatial::tile::Tile;

    type PieceTile = Tile<Piece, Rational>;

    fn area(tile: &PieceTile) -> Rational {
        let vertices = tile.vertices();
        let twice = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .fold(Rational::integer(0), |sum, (&a, &b)| sum + a.cross(b));
        let half = twice / Rational::integer(2);
        if half < Rational::integer(0) { -half } else { half }
    }

    fn generation(steps: usize) -> Vec<PieceTile> {
        pinwheel::family()
            .generation(&SubstitutionEngine::default(), steps, &mut |_| {})
            .map(|g| g.into_tiles())
            .unwrap_or_else(|e| panic!("pinwheel {steps}: {e}"))
    }

    // Tests both pieces split into five
    // Verified by dropping the inner square
    #[test]
    fn test_counts() {
        for steps in 0..4 {
            assert_eq!(generation(steps).len(), 5usize.pow(steps as u32));
        }
    }

    // Tests the first square split gives one square and four triangles
    // Verified by tagging the inner square as a triangle
    #[test]
    fn test_first_split() {
        let tiles = generation(1);
        let squares = tiles.iter().filter(|t| t.prototype() == Piece::Square).count();
        assert_eq!(squares, 1);
        assert_eq!(tiles.first().map(Tile::prototype), Some(Piece::Square));
    }

    // Tests circle-solved corners keep the area exact
    // Verified by swapping the short and long radii
    #[test]
    fn test_area_preserved() {
        for steps in 0..4 {
            let total = generation(steps)
                .iter()
                .fold(Rational::integer(0), |sum, tile| sum + area(tile));
            assert_eq!(total, Rational::integer(100));
        }
    }

    // Tests every triangle is right-angled at its first vertex with legs 1 : 2
    // Verified by placing the right angle on the hypotenuse
    #[test]
    fn test_triangle_shape() {
        for tile in generation(2).iter().filter(|t| t.prototype() == Piece::Triangle) {
            let [a, b, c] = tile.corners().unwrap_or_else(|e| panic!("corners: {e}"));
            assert_eq!((b - a).dot(c - a), Rational::integer(0));
            let (ab, ac) = (a.distance_squared(b), a.distance_squared(c));
            let four = Rational::integer(4);
            assert!(ab == ac * four || ac == ab * four, "{ab} vs {ac}");
        }
    }

    // Tests every square has equal sides and right angles
    // Verified by skewing the inner square
    #[test]
    fn test_square_shape() {
        for tile in generation(2).iter().filter(|t| t.prototype() == Piece::Square) {
            let [a, b, c, d] = tile.corners().unwrap_or_else(|e| panic!("corners: {e}"));
            let side = a.distance_squared(b);
            assert_eq!(b.distance_squared(c), side);
            assert_eq!(c.distance_squared(d), side);
            assert_eq!(d.distance_squared(a), side);
            assert_eq!((b - a).dot(c - b), Rational::integer(0));
        }
    }

    // Tests the seed is a single tile that passes prototype validation
    // Verified by seeding with a vertex missing
    #[test]
    fn test_seed_valid() {
        let seed = pinwheel::seed().unwrap_or_else(|e| panic!("seed: {e}"));
        assert_eq!(seed.len(), 1);
        assert!(seed[0].validate().is_ok());
        assert_eq!(area(&seed[0]), Rational::integer(100));
    }
}
