use crate::point::*;

/// Manhattan (L1) distance between two points: `|a.x - b.x| + |a.y - b.y|`.
#[inline(always)]
pub fn manhattan_distance<T: Primitive>(a: &Point<T>, b: &Point<T>) -> T {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Index of and distance to the centroid closest to **sample**.
/// Centroids are scanned left to right and only a strictly smaller distance replaces the current best,
/// so on ties the lowest index wins.
///
/// **centroids** must not be empty.
#[inline(always)]
pub(crate) fn nearest_centroid<T: Primitive>(sample: &Point<T>, centroids: &[Point<T>]) -> (usize, T) {
    centroids.iter().enumerate()
        .map(|(ci, c)| (ci, manhattan_distance(sample, c)))
        .fold((0, T::infinity()), |(best_idx, best_dist), (ci, dist)| {
            if dist < best_dist { (ci, dist) } else { (best_idx, best_dist) }
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn distance_values() {
        assert_eq!(manhattan_distance(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0)), 7.0);
        assert_eq!(manhattan_distance(&Point::new(-1.5f64, 2.0), &Point::new(1.0, -2.0)), 6.5);
        assert_eq!(manhattan_distance(&Point::new(2.0f32, 2.0), &Point::new(2.0, 2.0)), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_zero_only_on_identity() {
        let mut rnd = StdRng::seed_from_u64(1337);
        for _ in 0..1000 {
            let a = Point::new(rnd.gen_range(-100.0f64, 100.0), rnd.gen_range(-100.0f64, 100.0));
            let b = Point::new(rnd.gen_range(-100.0f64, 100.0), rnd.gen_range(-100.0f64, 100.0));
            assert_eq!(manhattan_distance(&a, &b), manhattan_distance(&b, &a));
            assert_eq!(manhattan_distance(&a, &a), 0.0);
            if a != b {
                assert!(manhattan_distance(&a, &b) > 0.0);
            }
        }
    }

    #[test]
    fn nearest_centroid_prefers_lowest_index_on_ties() {
        let centroids = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 0.0)];
        assert_eq!(nearest_centroid(&Point::new(5.0, 0.0), &centroids), (0, 5.0));
        assert_eq!(nearest_centroid(&Point::new(0.0, 0.0), &centroids), (0, 0.0));
        assert_eq!(nearest_centroid(&Point::new(9.0, 1.0), &centroids), (1, 2.0));
    }
}
