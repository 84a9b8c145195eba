use crate::{distance::nearest_centroid, point::*, Convergence, KMeansError, Result, Tolerance};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type RoundDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize);
pub type ClusterReinitializedCallbackFn<'a, T> = &'a dyn Fn(usize, usize, &Point<T>);

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, the convergence tolerance, or a couple of callbacks, that can be set
/// to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each round
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the round (new centroids, assignments of this round)
    /// - **round**: Number of the finished round (starting at 1)
    pub(crate) round_done: RoundDoneCallbackFn<'a, T>,
    /// Callback that is called, whenever an empty cluster was re-initialized
    /// ## Arguments
    /// - **cluster**: Index of the cluster that went empty
    /// - **round**: Number of the round in which it went empty
    /// - **centroid**: The sample that was chosen as new centroid
    pub(crate) cluster_reinitialized: ClusterReinitializedCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Tolerance used for the convergence test
    pub(crate) tolerance: Tolerance<T>
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            round_done: &|_,_| {},
            cluster_reinitialized: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            tolerance: Tolerance::default()
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("tolerance", &self.tolerance).finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each round during a running k-means calculation.
    pub fn round_done(mut self, round_done: RoundDoneCallbackFn<'a, T>) -> Self {
        self.config.round_done = round_done; self
    }
    /// Set the callback that should be called, whenever an empty cluster was re-initialized.
    pub fn cluster_reinitialized(mut self, cluster_reinitialized: ClusterReinitializedCallbackFn<'a, T>) -> Self {
        self.config.cluster_reinitialized = cluster_reinitialized; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the tolerance used to detect convergence. For more information, see documentation of [`Tolerance`].
    /// ## Default
    /// [`Tolerance`] `{ rtol: 1e-5, atol: 1e-8 }`
    pub fn tolerance(mut self, tolerance: Tolerance<T>) -> Self {
        self.config.tolerance = tolerance; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of Manhattan distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **centroid_distances**: Vector containing each sample's Manhattan distance to its centroid
/// - **reinitialized**: How often an empty cluster had to be re-initialized during the calculation
/// - **status**: State of the calculation, see [`Convergence`]
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<Point<T>>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub reinitialized: usize,
    pub status: Convergence
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![Point::default();k],
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            reinitialized: 0,
            status: Convergence::default()
        }
    }
}


/// Result of a single centroid update step.
///
/// ## Fields
/// - **centroids**: The new centroids (mean of the assigned samples, or a random sample for empty clusters)
/// - **centroid_frequency**: Amount of samples that were assigned to each cluster
/// - **reinitialized**: `(cluster, sample)` pairs for every empty cluster, that was re-initialized to a randomly chosen sample
#[derive(Clone, Debug, PartialEq)]
pub struct CentroidUpdate<T> {
    pub centroids: Vec<Point<T>>,
    pub centroid_frequency: Vec<usize>,
    pub reinitialized: Vec<(usize, usize)>
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) under the Manhattan metric [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - Precomputed centroids [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) samples: Vec<Point<T>>
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: The dataset. The index of a sample identifies it for the lifetime of this instance.
    ///
    /// ## Errors
    /// [`KMeansError::EmptyDataset`] if there are no samples, [`KMeansError::NonFiniteSample`] if a sample
    /// contains NaN or infinite coordinates.
    pub fn new(samples: Vec<Point<T>>) -> Result<Self> {
        if samples.is_empty() {
            return Err(KMeansError::EmptyDataset);
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(KMeansError::NonFiniteSample { index });
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Point<T>] { &self.samples }
    pub fn sample_cnt(&self) -> usize { self.samples.len() }

    fn work_packet_size(&self) -> usize {
        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        (self.samples.len() / rayon::current_num_threads()).max(1)
    }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>) {
        let centroids = &state.centroids;
        self.samples.par_iter()
            .with_min_len(self.work_packet_size())
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = nearest_centroid(s, centroids);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    /// Assignment step: map every sample to the index of its nearest centroid (Manhattan distance).
    /// Ties are resolved in favor of the lowest centroid index.
    ///
    /// ## Errors
    /// [`KMeansError::NoClusters`] if **centroids** is empty.
    pub fn assign(&self, centroids: &[Point<T>]) -> Result<Vec<usize>> {
        if centroids.is_empty() {
            return Err(KMeansError::NoClusters);
        }
        Ok(self.samples.par_iter()
            .with_min_len(self.work_packet_size())
            .map(|s| nearest_centroid(s, centroids).0)
            .collect())
    }

    /// Centroid update step: recompute every centroid as the coordinate-wise mean of its assigned samples.
    ///
    /// Clusters without any assigned sample are re-initialized to a sample chosen uniformly at random from the
    /// whole dataset (using **rnd**). This is reported as warning and listed in [`CentroidUpdate::reinitialized`].
    ///
    /// ## Arguments
    /// - **assignments**: Cluster index for every sample, as returned by [`KMeans::assign`]
    /// - **previous**: The centroids the assignments were calculated with (determines `k`)
    /// - **rnd**: Random number generator for the re-initialization of empty clusters
    pub fn recompute_centroids(&self, assignments: &[usize], previous: &[Point<T>], rnd: &mut dyn RngCore) -> Result<CentroidUpdate<T>> {
        let k = previous.len();
        if k == 0 {
            return Err(KMeansError::NoClusters);
        }
        if assignments.len() != self.samples.len() {
            return Err(KMeansError::AssignmentLengthMismatch { expected: self.samples.len(), actual: assignments.len() });
        }
        if let Some((index, &cluster)) = assignments.iter().enumerate().find(|&(_, &a)| a >= k) {
            return Err(KMeansError::InvalidAssignment { index, cluster, k });
        }

        // Sum all samples in a cluster together, while counting the samples per cluster
        let mut centroid_frequency = vec![0usize;k];
        let mut used_centroids_cnt = 0;
        let mut sums = vec![Point::<T>::default();k];
        rayon::scope(|s| {
            s.spawn(|_| {
                used_centroids_cnt = self.update_cluster_frequencies(assignments, &mut centroid_frequency);
            });
            s.spawn(|_| {
                self.samples.iter().zip(assignments.iter().cloned())
                    .for_each(|(s, centroid_id)| {
                        sums[centroid_id].x += s.x;
                        sums[centroid_id].y += s.y;
                    });
            });
        });

        let mut centroids = Vec::with_capacity(k);
        let mut reinitialized = Vec::with_capacity(k - used_centroids_cnt);
        for (ci, (sum, cfreq)) in sums.into_iter().zip(centroid_frequency.iter().cloned()).enumerate() {
            if cfreq > 0 {
                let n = T::from(cfreq).unwrap_or_else(T::nan);
                let mean = Point::new(sum.x / n, sum.y / n);
                if mean.is_finite() {
                    centroids.push(mean);
                } else {
                    // the plain sum overflowed; the scaled sum stays within the range of the samples
                    centroids.push(self.scaled_mean(assignments, ci, n));
                }
            } else {
                // samples is never empty (checked in new()), so gen_range has a non-empty range
                let sample_id = rnd.gen_range(0, self.samples.len());
                log::warn!("cluster {} became empty, re-initializing its centroid to sample {} {}", ci, sample_id, self.samples[sample_id]);
                centroids.push(self.samples[sample_id]);
                reinitialized.push((ci, sample_id));
            }
        }
        Ok(CentroidUpdate { centroids, centroid_frequency, reinitialized })
    }


    fn scaled_mean(&self, assignments: &[usize], cluster: usize, n: T) -> Point<T> {
        self.samples.iter().zip(assignments.iter())
            .filter(|&(_, &a)| a == cluster)
            .fold(Point::default(), |mut acc, (s, _)| {
                acc.x += s.x / n;
                acc.y += s.y / n;
                acc
            })
    }


    /// Normal K-Means algorithm implementation (Lloyd), using the Manhattan distance for the assignment step.
    ///
    /// Each round assigns all samples to their nearest centroid and then moves every centroid into the mean of
    /// its samples. The calculation ends as soon as a round leaves all centroids unchanged (within the configured
    /// [`Tolerance`]), or when **max_iter** rounds were executed. Which of both happened is recorded in
    /// [`KMeansState::status`]. In both cases, the returned assignments were calculated against the returned centroids.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of rounds
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_manhattan::*;
    ///
    /// let samples = vec![Point::new(0.0f64, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 10.0), Point::new(10.0, 11.0)];
    /// let kmean = KMeans::new(samples).unwrap();
    /// let init = KMeans::init_precomputed(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
    /// let result = kmean.kmeans_lloyd(2, 10, init, &KMeansConfig::default()).unwrap();
    ///
    /// assert_eq!(result.status, Convergence::Converged(2));
    /// assert_eq!(result.assignments, vec![0, 0, 1, 1]);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given **centroids** (e.g. generated or loaded by the caller) as initial centroids.
    /// Their amount has to match the `k` passed to the variant.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass the returned closure to an instance-method of [`KMeans`].
    pub fn init_precomputed(centroids: Vec<Point<T>>) -> impl for<'c> FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        move |kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
        }
    }
}
