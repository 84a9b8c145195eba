use crate::point::Point;
use rand::prelude::*;

/// Generate **count** points, whose coordinates are independently and uniformly drawn from `[0, max_coord]`.
///
/// The experiment draws its dataset first and its initial centroids afterwards from the same generator,
/// so both are reproducible from one seed.
pub fn generate_points(rnd: &mut dyn RngCore, count: usize, max_coord: u32) -> Vec<Point<i64>> {
    let upper = i64::from(max_coord) + 1;
    (0..count)
        .map(|_| Point::new(rnd.gen_range(0, upper), rnd.gen_range(0, upper)))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_stay_in_range() {
        let mut rnd = StdRng::seed_from_u64(42);
        let points = generate_points(&mut rnd, 1000, 30);
        assert_eq!(points.len(), 1000);
        assert!(points.iter().all(|p| (0..=30).contains(&p.x) && (0..=30).contains(&p.y)));
        // both bounds are reachable
        assert!(points.iter().any(|p| p.x == 0 || p.y == 0));
        assert!(points.iter().any(|p| p.x == 30 || p.y == 30));
    }

    #[test]
    fn zero_bound_yields_origin() {
        let mut rnd = StdRng::seed_from_u64(1);
        assert_eq!(generate_points(&mut rnd, 3, 0), vec![Point::new(0, 0);3]);
    }

    #[test]
    fn same_seed_same_points() {
        let a = generate_points(&mut StdRng::seed_from_u64(7), 50, 100);
        let b = generate_points(&mut StdRng::seed_from_u64(7), 50, 100);
        assert_eq!(a, b);
        assert!(generate_points(&mut StdRng::seed_from_u64(7), 0, 100).is_empty());
    }
}
