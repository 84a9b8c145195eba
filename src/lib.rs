//! # kmeans_manhattan - API documentation
//!
//! Kmeans_manhattan is a small rust library for k-means clustering of two-dimensional points under
//! the Manhattan (L1) distance, together with the tooling around an experiment run: random data generation,
//! persistence of points as simple comma-separated text, and an ASCII grid renderer for the result.
//!
//! ## Algorithm
//! The clustering is Lloyd's algorithm: every round assigns each sample to its nearest centroid
//! (lowest index wins ties) and then moves every centroid into the coordinate-wise mean of its samples.
//! A cluster that ends up without samples is re-initialized to a randomly chosen sample; this is logged
//! as warning and reported through [`KMeansConfigBuilder::cluster_reinitialized`].
//! The calculation stops when a round leaves all centroids unchanged within a [`Tolerance`], or
//! when the iteration limit is reached. The outcome is recorded as [`Convergence`] state.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_manhattan::*;
//! use rand::prelude::*;
//!
//! let samples = vec![Point::new(0.0f64, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 10.0), Point::new(10.0, 11.0)];
//! let initial = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(StdRng::seed_from_u64(42))
//!     .round_done(&|s, round| println!("Round {} - Error: {:.2}", round, s.distsum))
//!     .build();
//!
//! let kmean = KMeans::new(samples).unwrap();
//! let result = kmean.kmeans_lloyd(2, 10, KMeans::init_precomputed(initial), &conf).unwrap();
//!
//! assert_eq!(result.status, Convergence::Converged(2));
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//!
//! let grid = Grid::project(kmean.samples(), &result.centroids, &result.assignments, 12, 12).unwrap();
//! println!("{}", grid);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, which takes over the samples into its ownership.
//! Its instance-methods do not mutate it: a new instance of [`KMeansState`] stores the state (and finally the
//! result) of a calculation. Assignment step ([`KMeans::assign`]) and update step ([`KMeans::recompute_centroids`])
//! are available individually as well. The [`Experiment`] bundles generation, persistence, clustering and
//! projection, configured by an [`ExperimentConfig`].

#[macro_use] mod helpers;
mod point;
mod error;
mod distance;
mod api;
mod convergence;
mod variants;
mod inits;
mod grid;
mod generate;
mod persistence;
mod experiment;
pub mod report;

pub use api::{KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans, CentroidUpdate};
pub use convergence::{Convergence, Tolerance};
pub use distance::manhattan_distance;
pub use error::{KMeansError, Result};
pub use experiment::{Experiment, ExperimentConfig, ExperimentInput, ExperimentOutcome};
pub use generate::generate_points;
pub use grid::Grid;
pub use persistence::{load_points, save_points};
pub use point::{Point, Primitive};
