//! Console report of an experiment run.

use crate::{experiment::*, grid::Grid, helpers, point::*, Convergence};
use std::io::{self, Write};

pub fn write_sample<W: Write, T: std::fmt::Display>(w: &mut W, title: &str, points: &[Point<T>], n: usize) -> io::Result<()> {
    writeln!(w, "\nSample {} (first {}):", title, n.min(points.len()))?;
    for p in points.iter().take(n) {
        writeln!(w, "  {}", p)?;
    }
    Ok(())
}

/// One line per centroid, labeled with the letter used in the grid and the cluster index.
pub fn write_centroids<W: Write, T: Primitive>(w: &mut W, centroids: &[Point<T>]) -> io::Result<()> {
    writeln!(w, "\nFinal Centroids:")?;
    for (ci, c) in centroids.iter().enumerate() {
        writeln!(w, "Cluster {} ({}): ({:.2}, {:.2})", helpers::centroid_glyph(ci), ci, c.x, c.y)?;
    }
    Ok(())
}

pub fn write_status<W: Write>(w: &mut W, status: Convergence, reinitialized: usize) -> io::Result<()> {
    match status {
        Convergence::Converged(round) => writeln!(w, "\nConverged at iteration {}.", round)?,
        Convergence::Exhausted(rounds) => writeln!(w, "\nNo convergence after {} iterations.", rounds)?,
        Convergence::Running(round) => writeln!(w, "\nStill running after {} iterations.", round)?
    }
    if reinitialized > 0 {
        writeln!(w, "Empty clusters were re-initialized {} times.", reinitialized)?;
    }
    Ok(())
}

pub fn write_visualization<W: Write>(w: &mut W, grid: &Grid) -> io::Result<()> {
    writeln!(w, "\nClustering Visualization (Manhattan K-Means):")?;
    writeln!(w, "Data points: 0-9 (cluster ID), Centroids: A-J (cluster ID)")?;
    writeln!(w, "{}", grid)?;
    writeln!(w, "\nNote: Y-axis is printed from max value down to 0.")
}

/// Samples of the clustering input, printed before the clustering runs.
pub fn write_input<W: Write>(w: &mut W, input: &ExperimentInput) -> io::Result<()> {
    write_sample(w, "Initial Centroids", &input.initial_centroids, 3)?;
    write_sample(w, "Data Points", &input.points, 3)
}

/// Outcome of the clustering: status, final centroids and the grid.
pub fn write_result<W: Write>(w: &mut W, outcome: &ExperimentOutcome) -> io::Result<()> {
    write_status(w, outcome.result.status, outcome.result.reinitialized)?;
    write_centroids(w, &outcome.result.centroids)?;
    write_visualization(w, &outcome.grid)
}

/// Full report in the order the pipeline produced it.
pub fn write_report<W: Write>(w: &mut W, outcome: &ExperimentOutcome) -> io::Result<()> {
    write_sample(w, "Initial Centroids", &outcome.initial_centroids, 3)?;
    write_sample(w, "Data Points", &outcome.points, 3)?;
    write_result(w, outcome)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn centroids_use_two_decimals_and_letters() {
        let out = render(|w| write_centroids(w, &[Point::new(0.0f64, 0.5), Point::new(10.0, 10.0 / 3.0)]));
        assert_eq!(out, "\nFinal Centroids:\nCluster A (0): (0.00, 0.50)\nCluster B (1): (10.00, 3.33)\n");
    }

    #[test]
    fn sample_is_truncated() {
        let points = [Point::new(1, 2), Point::new(3, 4), Point::new(5, 6), Point::new(7, 8)];
        let out = render(|w| write_sample(w, "Data Points", &points, 3));
        assert_eq!(out, "\nSample Data Points (first 3):\n  (1, 2)\n  (3, 4)\n  (5, 6)\n");
        let out = render(|w| write_sample(w, "Data Points", &points[..1], 3));
        assert_eq!(out, "\nSample Data Points (first 1):\n  (1, 2)\n");
    }

    #[test]
    fn status_lines() {
        assert_eq!(render(|w| write_status(w, Convergence::Converged(2), 0)), "\nConverged at iteration 2.\n");
        assert_eq!(
            render(|w| write_status(w, Convergence::Exhausted(10), 3)),
            "\nNo convergence after 10 iterations.\nEmpty clusters were re-initialized 3 times.\n"
        );
    }

    #[test]
    fn input_lists_centroids_before_points() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ExperimentConfig {
            num_points: 4,
            num_clusters: 2,
            data_points_file: dir.path().join("data_points.txt"),
            initial_centroids_file: dir.path().join("initial_centroids.txt"),
            ..ExperimentConfig::default()
        };
        let experiment = Experiment::new(cfg);
        let input = experiment.prepare().unwrap();
        let out = render(|w| write_input(w, &input));
        let centroids_at = out.find("Sample Initial Centroids (first 2):").unwrap();
        let points_at = out.find("Sample Data Points (first 3):").unwrap();
        assert!(centroids_at < points_at);

        let outcome = experiment.cluster(input.clone()).unwrap();
        let input_text = render(|w| write_input(w, &input));
        let result_text = render(|w| write_result(w, &outcome));
        assert_eq!(render(|w| write_report(w, &outcome)), input_text + &result_text);
    }

    #[test]
    fn visualization_wraps_grid() {
        let grid = Grid::project(&[Point::new(0.0, 0.0)], &[Point::new(1.0, 0.0)], &[0], 2, 1).unwrap();
        let out = render(|w| write_visualization(w, &grid));
        assert!(out.starts_with("\nClustering Visualization (Manhattan K-Means):\n"));
        assert!(out.contains("\n 0|0A|\n"));
        assert!(out.ends_with("  +--+\n\nNote: Y-axis is printed from max value down to 0.\n"));
    }
}
