//! Centroid-based clustering of points.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! This crate runs a fixed number of passes rather than iterating to
//! convergence, so a given starting centroid set always yields the same
//! partition after the same amount of work.
//!
//! ## Pieces
//!
//! - [`euclidean_distance`]: the only metric.
//! - [`initialize_centroids`]: `k` distinct points chosen uniformly at random.
//! - [`build_clusters`]: the assignment/update loop.
//! - [`Kmeans`]: builder that ties seeding and clustering together.
//!
//! ## Usage
//!
//! ```rust
//! use quakemap::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod init;
mod kmeans;
mod traits;
mod util;

pub use init::initialize_centroids;
pub use kmeans::{
    build_clusters, build_clusters_with_centroids, Kmeans, KmeansFit, DEFAULT_K, DEFAULT_PASSES,
};
pub use traits::Clustering;
pub use util::euclidean_distance;
