//! Experiment binary
//!
//! Generates random points and initial centroids, clusters them under the Manhattan distance
//! and prints the result as ASCII grid.

use clap::Parser;
use kmeans_manhattan::*;
use std::{io::Write, path::PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "K-Means clustering with Manhattan distance")]
struct Opts {
    /// Number of data points to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    points: usize,
    /// Number of clusters
    #[arg(short = 'k', long, default_value_t = 10)]
    clusters: usize,
    /// Largest coordinate value; the grid spans max_coord + 1 cells per axis
    #[arg(short, long, default_value_t = 30)]
    max_coord: u32,
    /// Maximum number of iterations
    #[arg(short, long, default_value_t = 10)]
    iterations: usize,
    /// Random seed (data generation and empty-cluster re-initialization)
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Seed from entropy instead of --seed
    #[arg(long, action = clap::ArgAction::SetTrue)]
    random: bool,
    /// File the data points are written to (or read from with --reuse)
    #[arg(long, default_value = "data_points.txt")]
    data_file: PathBuf,
    /// File the initial centroids are written to (or read from with --reuse)
    #[arg(long, default_value = "initial_centroids.txt")]
    centroids_file: PathBuf,
    /// Cluster previously written files instead of generating new data
    #[arg(long, action = clap::ArgAction::SetTrue)]
    reuse: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}
impl From<Opts> for ExperimentConfig {
    fn from(opts: Opts) -> Self {
        Self {
            num_points: opts.points,
            num_clusters: opts.clusters,
            max_coord: opts.max_coord,
            max_iter: opts.iterations,
            seed: if opts.random { None } else { Some(opts.seed) },
            data_points_file: opts.data_file,
            initial_centroids_file: opts.centroids_file,
            reuse_files: opts.reuse,
        }
    }
}

fn log(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(level, config, simplelog::TerminalMode::Mixed, simplelog::ColorChoice::Auto)
        .expect("initialize logger");
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    log(opts.verbose);

    println!("--- K-Means Clustering with Manhattan Distance ---");
    let experiment = Experiment::new(ExperimentConfig::from(opts));
    let input = experiment.prepare()?;
    report::write_input(&mut std::io::stdout(), &input)?;

    let outcome = experiment.cluster(input)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_result(&mut out, &outcome)?;
    writeln!(out, "\n--- Experiment Complete ---")?;
    Ok(())
}
