use crate::{generate::generate_points, grid::Grid, persistence::*, point::Point};
use crate::{KMeans, KMeansConfig, KMeansError, KMeansState, Result};
use rand::prelude::*;
use std::path::PathBuf;

/// Parameters of a complete experiment run: data generation, clustering and projection.
///
/// ## Default
/// 100 points, 10 clusters, coordinates in `[0, 30]`, at most 10 iterations, seed 42,
/// data persisted to `data_points.txt` and `initial_centroids.txt`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentConfig {
    pub num_points: usize,
    pub num_clusters: usize,
    /// Largest coordinate value generated. Also bounds the grid: `max_coord + 1` cells per axis.
    pub max_coord: u32,
    pub max_iter: usize,
    /// Seed for data generation and empty-cluster re-initialization. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub data_points_file: PathBuf,
    pub initial_centroids_file: PathBuf,
    /// Load points and initial centroids from the files instead of generating (and overwriting) them.
    pub reuse_files: bool
}
impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_points: 100,
            num_clusters: 10,
            max_coord: 30,
            max_iter: 10,
            seed: Some(42),
            data_points_file: PathBuf::from("data_points.txt"),
            initial_centroids_file: PathBuf::from("initial_centroids.txt"),
            reuse_files: false
        }
    }
}
impl ExperimentConfig {
    pub fn grid_width(&self) -> usize { self.max_coord as usize + 1 }
    pub fn grid_height(&self) -> usize { self.max_coord as usize + 1 }
}


/// Points and initial centroids of an experiment, before clustering.
#[derive(Clone, Debug)]
pub struct ExperimentInput {
    pub points: Vec<Point<i64>>,
    pub initial_centroids: Vec<Point<i64>>,
    rnd: StdRng
}


/// Everything an experiment produced, ready to be reported.
#[derive(Clone, Debug)]
pub struct ExperimentOutcome {
    pub points: Vec<Point<i64>>,
    pub initial_centroids: Vec<Point<i64>>,
    pub result: KMeansState<f64>,
    pub grid: Grid
}


pub struct Experiment {
    config: ExperimentConfig
}
impl Experiment {
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExperimentConfig { &self.config }

    /// Run the whole pipeline: [`Experiment::prepare`] followed by [`Experiment::cluster`].
    pub fn run(&self) -> Result<ExperimentOutcome> {
        self.prepare().and_then(|input| self.cluster(input))
    }

    /// Generate (and persist) or load the points and the initial centroids. All file I/O happens here.
    pub fn prepare(&self) -> Result<ExperimentInput> {
        let cfg = &self.config;
        let mut rnd = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };

        let (points, initial_centroids) = if cfg.reuse_files {
            let points = load_points(&cfg.data_points_file)?;
            let centroids = load_points(&cfg.initial_centroids_file)?;
            log::info!("Loaded {} data points from {}", points.len(), cfg.data_points_file.display());
            log::info!("Loaded {} initial centroids from {}", centroids.len(), cfg.initial_centroids_file.display());
            (points, centroids)
        } else {
            if cfg.num_points == 0 {
                return Err(KMeansError::EmptyDataset);
            }
            if cfg.num_clusters == 0 {
                return Err(KMeansError::NoClusters);
            }
            let points = generate_points(&mut rnd, cfg.num_points, cfg.max_coord);
            let centroids = generate_points(&mut rnd, cfg.num_clusters, cfg.max_coord);
            save_points(&cfg.data_points_file, &points)?;
            save_points(&cfg.initial_centroids_file, &centroids)?;
            log::info!("Generated {} data points, saved to {}", points.len(), cfg.data_points_file.display());
            log::info!("Generated {} initial centroids, saved to {}", centroids.len(), cfg.initial_centroids_file.display());
            (points, centroids)
        };
        Ok(ExperimentInput { points, initial_centroids, rnd })
    }

    /// Cluster prepared input and project the result onto the grid.
    ///
    /// The random generator that produced the input is handed on to the clustering for empty-cluster
    /// re-initialization, so a seeded run is reproducible as a whole.
    pub fn cluster(&self, input: ExperimentInput) -> Result<ExperimentOutcome> {
        let cfg = &self.config;
        let ExperimentInput { points, initial_centroids, rnd } = input;

        let kmean = KMeans::new(points.iter().map(Point::to_f64).collect())?;
        let k = initial_centroids.len();
        let conf = KMeansConfig::build().random_generator(rnd).build();
        let init = KMeans::init_precomputed(initial_centroids.iter().map(Point::to_f64).collect());
        let result = kmean.kmeans_lloyd(k, cfg.max_iter, init, &conf)?;

        let grid = Grid::project(kmean.samples(), &result.centroids, &result.assignments, cfg.grid_width(), cfg.grid_height())?;
        Ok(ExperimentOutcome { points, initial_centroids, result, grid })
    }
}
