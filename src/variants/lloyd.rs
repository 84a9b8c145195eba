use crate::{point::*, Convergence, KMeans, KMeansConfig, KMeansError, KMeansState, Result};
use std::ops::DerefMut;

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    fn update_centroids(data: &KMeans<T>, state: &mut KMeansState<T>, round: usize, config: &KMeansConfig<'_, T>) -> Result<Vec<Point<T>>> {
        let update = {
            let mut rnd = config.rnd.borrow_mut();
            data.recompute_centroids(&state.assignments, &state.centroids, rnd.deref_mut())?
        };
        state.centroid_frequency = update.centroid_frequency;
        state.reinitialized += update.reinitialized.len();
        for &(ci, _) in update.reinitialized.iter() {
            (config.cluster_reinitialized)(ci, round, &update.centroids[ci]);
        }
        Ok(update.centroids)
    }

    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<T>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        if k == 0 {
            return Err(KMeansError::NoClusters);
        }

        let mut state = KMeansState::new(data.sample_cnt(), k);

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        (config.init_done)(&state);

        loop {
            state.status = match state.status {
                Convergence::Running(round) if round >= max_iter => {
                    log::info!("No convergence after {} iterations.", round);
                    Convergence::Exhausted(round)
                },
                Convergence::Running(round) => {
                    let round = round + 1;
                    log::info!("Iteration {}/{}", round, max_iter);
                    data.update_cluster_assignments(&mut state);
                    let new_centroids = Self::update_centroids(data, &mut state, round, config)?;
                    let converged = config.tolerance.all_close(&state.centroids, &new_centroids);
                    state.centroids = new_centroids;
                    if converged {
                        log::info!("Converged at iteration {}.", round);
                        Convergence::Converged(round)
                    } else {
                        Convergence::Running(round)
                    }
                },
                Convergence::Converged(_) | Convergence::Exhausted(_) => break
            };
            // Notify subscriber about finished round
            if let Convergence::Running(round) | Convergence::Converged(round) = state.status {
                (config.round_done)(&state, round);
            }
        }

        // Final assignment against the returned centroids
        data.update_cluster_assignments(&mut state);
        data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        Ok(state)
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use std::cell::{Cell, RefCell};

    fn points(coords: &[(f64, f64)]) -> Vec<Point<f64>> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn two_well_separated_clusters() {
        let kmean = KMeans::new(points(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)])).unwrap();
        let rounds = RefCell::new(Vec::new());
        let round_done = |s: &KMeansState<f64>, round: usize| rounds.borrow_mut().push((round, s.centroids.clone(), s.status));
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(1))
            .round_done(&round_done)
            .build();

        let res = kmean.kmeans_lloyd(2, 10, KMeans::init_precomputed(points(&[(0.0, 0.0), (10.0, 10.0)])), &conf).unwrap();

        assert_eq!(res.status, Convergence::Converged(2));
        assert_eq!(res.assignments, vec![0, 0, 1, 1]);
        assert_eq!(res.centroids, points(&[(0.0, 0.5), (10.0, 10.5)]));
        assert_eq!(res.centroid_frequency, vec![2, 2]);
        assert_eq!(res.centroid_distances, vec![0.5, 0.5, 0.5, 0.5]);
        assert_eq!(res.distsum, 2.0);
        assert_eq!(res.reinitialized, 0);

        let rounds = rounds.into_inner();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0], (1, points(&[(0.0, 0.5), (10.0, 10.5)]), Convergence::Running(1)));
        assert_eq!(rounds[1], (2, points(&[(0.0, 0.5), (10.0, 10.5)]), Convergence::Converged(2)));
    }

    #[test]
    fn fixed_point_converges_in_first_round() {
        let kmean = KMeans::new(points(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)])).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1)).build();
        let res = kmean.kmeans_lloyd(2, 10, KMeans::init_precomputed(points(&[(0.0, 0.5), (10.0, 10.5)])), &conf).unwrap();
        assert_eq!(res.status, Convergence::Converged(1));
        assert_eq!(res.assignments, vec![0, 0, 1, 1]);
    }

    #[test]
    fn never_exceeds_max_iter() {
        let mut rnd = StdRng::seed_from_u64(1337);
        let samples: Vec<_> = (0..500).map(|_| Point::new(rnd.gen_range(0.0, 100.0), rnd.gen_range(0.0, 100.0))).collect();
        let initial: Vec<_> = samples.iter().take(8).cloned().collect();
        let kmean = KMeans::new(samples).unwrap();

        for max_iter in 0..5 {
            let calls = Cell::new(0);
            let round_done = |_: &KMeansState<f64>, _: usize| calls.set(calls.get() + 1);
            let conf = KMeansConfig::build()
                .random_generator(StdRng::seed_from_u64(1))
                .round_done(&round_done)
                .build();
            let res = kmean.kmeans_lloyd(8, max_iter, KMeans::init_precomputed(initial.clone()), &conf).unwrap();
            assert!(res.status.is_terminal());
            assert!(res.status.rounds() <= max_iter);
            assert_eq!(calls.get(), res.status.rounds());
            if !res.status.is_converged() {
                assert_eq!(res.status, Convergence::Exhausted(max_iter));
            }
            // returned assignment always matches the returned centroids
            assert_eq!(res.assignments, kmean.assign(&res.centroids).unwrap());
        }
    }

    #[test]
    fn zero_iterations_keep_initial_centroids() {
        let kmean = KMeans::new(points(&[(0.0, 0.0), (4.0, 4.0)])).unwrap();
        let initial = points(&[(1.0, 1.0), (3.0, 3.0)]);
        let res = kmean.kmeans_lloyd(2, 0, KMeans::init_precomputed(initial.clone()), &KMeansConfig::default()).unwrap();
        assert_eq!(res.status, Convergence::Exhausted(0));
        assert_eq!(res.centroids, initial);
        assert_eq!(res.assignments, vec![0, 1]);
        assert_eq!(res.distsum, 4.0);
    }

    #[test]
    fn zero_clusters_fail_fast() {
        let kmean = KMeans::new(points(&[(0.0, 0.0)])).unwrap();
        let res = kmean.kmeans_lloyd(0, 10, KMeans::init_precomputed(vec![]), &KMeansConfig::default());
        assert!(matches!(res, Err(KMeansError::NoClusters)));
    }

    #[test]
    fn empty_cluster_handling() {
        let samples = points(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let kmean = KMeans::new(samples.clone()).unwrap();
        let events = RefCell::new(Vec::new());
        let on_reinit = |cluster: usize, round: usize, c: &Point<f64>| events.borrow_mut().push((cluster, round, *c));
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(1))
            .cluster_reinitialized(&on_reinit)
            .build();

        let res = kmean.kmeans_lloyd(2, 1, KMeans::init_precomputed(points(&[(2.0, 0.0), (1337.0, 0.0)])), &conf).unwrap();

        let events = events.into_inner();
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].0, events[0].1), (1, 1));
        assert!(samples.contains(&events[0].2));
        assert_eq!(res.reinitialized, 1);
        assert_eq!(res.status, Convergence::Exhausted(1));
        assert_eq!(res.centroids[0], Point::new(2.0, 0.0));
        assert_eq!(res.centroids[1], events[0].2);
        assert!(res.centroids.iter().all(|c| c.is_finite()));
        assert_eq!(res.assignments, kmean.assign(&res.centroids).unwrap());
        assert_eq!(res.centroid_frequency.iter().sum::<usize>(), 3);
    }

    #[test]
    fn more_clusters_than_distinct_samples() {
        let samples = points(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        let kmean = KMeans::new(samples).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(3)).build();
        let initial = points(&[(0.0, 0.0), (1.0, 1.0), (9.0, 9.0), (20.0, 20.0)]);
        let res = kmean.kmeans_lloyd(4, 10, KMeans::init_precomputed(initial), &conf).unwrap();

        // every centroid collapses onto the only sample value, the lowest index takes all samples
        assert_eq!(res.status, Convergence::Converged(2));
        assert!(res.centroids.iter().all(|c| *c == Point::new(5.0, 5.0)));
        assert_eq!(res.assignments, vec![0, 0, 0]);
        assert_eq!(res.reinitialized, 3 + 3);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut rnd = StdRng::seed_from_u64(42);
        let samples: Vec<_> = (0..200).map(|_| Point::new(rnd.gen_range(0.0f32, 30.0), rnd.gen_range(0.0f32, 30.0))).collect();
        let initial: Vec<_> = (0..12).map(|_| Point::new(rnd.gen_range(0.0f32, 30.0), rnd.gen_range(0.0f32, 30.0))).collect();
        let kmean = KMeans::new(samples).unwrap();

        let run = || {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(7)).build();
            kmean.kmeans_lloyd(12, 25, KMeans::init_precomputed(initial.clone()), &conf).unwrap()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.status, b.status);
        assert_approx_eq!(a.distsum, a.centroid_distances.iter().sum::<f32>(), 1e-3);
    }
}
