//! Tests for the Fibonacci squares family

#[cfg(test)]
mod tests {
    use inflatile::algorithm::engine::SubstitutionEngine;
    use inflatile::catalog::fibonacci::{self, Rectangle};
    use inflatile::math::exact::Rational;
    use inflatile::spatial::tile::Tile;

    type Quad = Tile<Rectangle, Rational>;

    fn area(tile: &Quad) -> Rational {
        let vertices = tile.vertices();
        let twice = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .fold(Rational::integer(0), |sum, (&a, &b)| sum + a.cross(b));
        let half = twice / Rational::integer(2);
        if half < Rational::integer(0) { -half } else { half }
    }

    fn generation(steps: usize) -> Vec<Quad> {
        fibonacci::family()
            .generation(&SubstitutionEngine::default(), steps, &mut |_| {})
            .map(|g| g.into_tiles())
            .unwrap_or_else(|e| panic!("fibonacci {steps}: {e}"))
    }

    fn count(tiles: &[Quad], kind: Rectangle) -> usize {
        tiles.iter().filter(|t| t.prototype() == kind).count()
    }

    // Tests tile counts follow the squared Fibonacci numbers
    // Verified by splitting orange tiles into three
    #[test]
    fn test_counts() {
        let counts: Vec<usize> = (0..7).map(|steps| generation(steps).len()).collect();
        assert_eq!(counts, vec![1, 4, 9, 25, 64, 169, 441]);
    }

    // Tests the first split produces each kind in order
    // Verified by tagging the centre piece yellow
    #[test]
    fn test_first_split_kinds() {
        let kinds: Vec<Rectangle> = generation(1).iter().map(Tile::prototype).collect();
        assert_eq!(
            kinds,
            vec![Rectangle::Orange, Rectangle::Yellow, Rectangle::Blue, Rectangle::Orange]
        );
    }

    // Tests blue tiles regrow as yellow without moving
    // Verified by dropping blue tiles
    #[test]
    fn test_blue_regrows_in_place() {
        let first = generation(1);
        let second = generation(2);
        assert_eq!(count(&first, Rectangle::Blue), 1);
        let blue = first.iter().find(|t| t.prototype() == Rectangle::Blue);
        let regrown = blue.map(|b| b.vertices().to_vec());
        assert!(
            second
                .iter()
                .any(|t| t.prototype() == Rectangle::Yellow && Some(t.vertices().to_vec()) == regrown)
        );
    }

    // Tests subdivision never changes the covered area
    // Verified by splitting yellow at halves
    #[test]
    fn test_area_preserved() {
        for steps in 0..5 {
            let total = generation(steps)
                .iter()
                .fold(Rational::integer(0), |sum, tile| sum + area(tile));
            assert_eq!(total, Rational::integer(81));
        }
    }

    // Tests the kinds evolve by the substitution matrix
    // Verified by swapping the orange children's kinds
    #[test]
    fn test_kind_recurrence() {
        let mut previous = generation(1);
        for steps in 2..6 {
            let next = generation(steps);
            let (blue, yellow, orange) = (
                count(&previous, Rectangle::Blue),
                count(&previous, Rectangle::Yellow),
                count(&previous, Rectangle::Orange),
            );
            assert_eq!(count(&next, Rectangle::Blue), yellow);
            assert_eq!(count(&next, Rectangle::Yellow), blue + yellow + orange);
            assert_eq!(count(&next, Rectangle::Orange), 2 * yellow + orange);
            previous = next;
        }
    }

    // Tests the seed is a single tile that passes prototype validation
    // Verified by seeding with a vertex missing
    #[test]
    fn test_seed_valid() {
        let seed = fibonacci::seed().unwrap_or_else(|e| panic!("seed: {e}"));
        assert_eq!(seed.len(), 1);
        assert!(seed[0].validate().is_ok());
        assert_eq!(area(&seed[0]), Rational::integer(81));
    }
}
