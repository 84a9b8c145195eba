use thiserror::Error;

/// Errors reported by the clustering, projection and persistence entry points.
///
/// Empty clusters and running out of iterations are not errors; they are reported through
/// [`crate::CentroidUpdate`] and [`crate::Convergence`] respectively.
#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("dataset contains no samples")]
    EmptyDataset,

    #[error("at least one cluster is required")]
    NoClusters,

    #[error("sample {index} has a non-finite coordinate")]
    NonFiniteSample { index: usize },

    #[error("initial centroid {index} has a non-finite coordinate")]
    NonFiniteCentroid { index: usize },

    #[error("expected {expected} initial centroids, got {actual}")]
    CentroidCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} cluster assignments, got {actual}")]
    AssignmentLengthMismatch { expected: usize, actual: usize },

    #[error("sample {index} is assigned to cluster {cluster}, but only {k} clusters exist")]
    InvalidAssignment { index: usize, cluster: usize, k: usize },

    #[error("grid dimensions {width}x{height} are empty or too large")]
    InvalidGrid { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;
