//! K-means with a fixed number of Lloyd passes.
//!
//! Each pass has two phases:
//!
//! 1. **Assign**: every point goes to the group of its nearest centroid.
//!    Ties go to the lowest centroid index.
//! 2. **Update**: every non-empty group's centroid becomes the per-dimension
//!    mean of its members. An empty group keeps its previous centroid.
//!
//! There is no convergence test. `passes` passes always run, and the partition
//! from the last one is returned. Groups are rebuilt from scratch each pass;
//! only the centroid set carries over.
//!
//! # Example
//!
//! ```rust
//! use quakemap::cluster::build_clusters;
//! use quakemap::Catalog;
//!
//! let catalog = Catalog::from_points(vec![
//!     vec![0.0, 0.0],
//!     vec![0.5, 0.0],
//!     vec![10.0, 10.0],
//! ]);
//! let centroids = vec![vec![0.0, 0.0], vec![10.0, 10.0]];
//! let partition = build_clusters(2, centroids, &catalog, 3).unwrap();
//! assert_eq!(partition.groups(), &[vec![1, 2], vec![3]]);
//! ```

use super::init::{check_cluster_count, initialize_centroids};
use super::traits::Clustering;
use super::util::{ensure_dim, nearest_centroid};
use crate::catalog::{Catalog, Partition};
use crate::error::{Error, Result};
use rand::prelude::*;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of clusters.
pub const DEFAULT_K: usize = 6;

/// Default number of assignment/update passes.
pub const DEFAULT_PASSES: usize = 7;

/// Outcome of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Partition produced by the final pass.
    pub partition: Partition,
    /// Centroid set after the final update phase.
    pub centroids: Vec<Vec<f64>>,
    /// Number of passes that ran.
    pub passes: usize,
}

/// Run `passes` k-means passes from `initial_centroids` and return the final
/// partition.
///
/// Deterministic for fixed inputs. See [`build_clusters_with_centroids`] to
/// also get the final centroid set.
pub fn build_clusters(
    k: usize,
    initial_centroids: Vec<Vec<f64>>,
    catalog: &Catalog,
    passes: usize,
) -> Result<Partition> {
    build_clusters_with_centroids(k, initial_centroids, catalog, passes).map(|fit| fit.partition)
}

/// Like [`build_clusters`], but also returns the centroid set left by the last
/// update phase.
pub fn build_clusters_with_centroids(
    k: usize,
    initial_centroids: Vec<Vec<f64>>,
    catalog: &Catalog,
    passes: usize,
) -> Result<KmeansFit> {
    let dim = validate(k, &initial_centroids, catalog, passes)?;

    let mut centroids = initial_centroids;
    let mut partition = Partition::with_groups(k);

    for pass in 0..passes {
        let labels = assign(catalog, &centroids);

        let mut next = Partition::with_groups(k);
        for (idx, &label) in labels.iter().enumerate() {
            next.assign(label, idx + 1);
        }

        centroids = update(&next, catalog, &centroids, dim);
        debug!(pass, sizes = ?next.sizes(), "k-means pass complete");
        partition = next;
    }

    info!(k, passes, points = catalog.len(), sizes = ?partition.sizes(), "k-means finished");

    Ok(KmeansFit {
        partition,
        centroids,
        passes,
    })
}

/// Checks everything that could fail so no pass starts on bad input.
/// Returns the shared dimensionality.
fn validate(
    k: usize,
    centroids: &[Vec<f64>],
    catalog: &Catalog,
    passes: usize,
) -> Result<usize> {
    check_cluster_count(k, catalog.len())?;
    let dim = catalog.dim().ok_or(Error::EmptyInput)?;

    if centroids.len() != k {
        return Err(Error::InvalidParameter {
            name: "centroids",
            message: "must hold exactly k points",
        });
    }
    if passes == 0 {
        return Err(Error::InvalidParameter {
            name: "passes",
            message: "must be at least 1",
        });
    }

    for (_, point) in catalog.iter() {
        ensure_dim(dim, point.len())?;
    }
    for centroid in centroids {
        ensure_dim(dim, centroid.len())?;
    }
    Ok(dim)
}

/// Phase A: nearest-centroid label for every point, in identifier order.
#[cfg(not(feature = "parallel"))]
fn assign(catalog: &Catalog, centroids: &[Vec<f64>]) -> Vec<usize> {
    catalog
        .points()
        .iter()
        .map(|p| nearest_centroid(p, centroids))
        .collect()
}

/// Phase A: nearest-centroid label for every point, in identifier order.
#[cfg(feature = "parallel")]
fn assign(catalog: &Catalog, centroids: &[Vec<f64>]) -> Vec<usize> {
    catalog
        .points()
        .par_iter()
        .map(|p| nearest_centroid(p, centroids))
        .collect()
}

/// Phase B: a fresh centroid set from the group means.
fn update(
    partition: &Partition,
    catalog: &Catalog,
    previous: &[Vec<f64>],
    dim: usize,
) -> Vec<Vec<f64>> {
    partition
        .groups()
        .iter()
        .zip(previous)
        .map(|(members, prev)| {
            if members.is_empty() {
                return prev.clone();
            }
            let mut sums = vec![0.0f64; dim];
            for point in members.iter().filter_map(|&id| catalog.get(id)) {
                for (s, v) in sums.iter_mut().zip(point) {
                    *s += v;
                }
            }
            let count = members.len() as f64;
            sums.iter_mut().for_each(|s| *s /= count);
            sums
        })
        .collect()
}

/// K-means configuration.
///
/// Defaults to `k = 6` and `passes = 7`.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Fixed number of passes.
    passes: usize,
    /// Random seed for centroid selection.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a k-means clusterer with `k` groups.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            passes: DEFAULT_PASSES,
            seed: None,
        }
    }

    /// Set the number of passes.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configured number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Configured number of passes.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Seed centroids from the configured random source, then cluster.
    pub fn fit(&self, catalog: &Catalog) -> Result<KmeansFit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(catalog, rng.as_mut())
    }

    /// Like [`Kmeans::fit`] with an explicit random source; the configured seed
    /// is ignored.
    pub fn fit_with_rng<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> Result<KmeansFit> {
        let centroids = initialize_centroids(self.k, catalog, rng)?;
        build_clusters_with_centroids(self.k, centroids, catalog, self.passes)
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let catalog = Catalog::from_points(data.to_vec());
        let fit = self.fit(&catalog)?;
        Ok(fit.partition.labels(catalog.len()))
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quake_catalog() -> Catalog {
        Catalog::from_points(vec![
            vec![-90.9718, 13.7174],
            vec![-66.9686, -24.146],
            vec![149.6847, 45.0761],
            vec![161.3147, -10.4057],
            vec![179.4232, 52.1764],
            vec![102.1165, -4.1281],
            vec![128.5781, 2.3103],
            vec![132.036, 32.8717],
            vec![-27.479, -56.0782],
        ])
    }

    fn quake_centroids() -> Vec<Vec<f64>> {
        vec![
            vec![149.6847, 45.0761],
            vec![102.1165, -4.1281],
            vec![-66.9686, -24.146],
            vec![161.3147, -10.4057],
            vec![-27.479, -56.0782],
            vec![128.5781, 2.3103],
        ]
    }

    #[test]
    fn test_build_clusters_quake_scenario() {
        let partition = build_clusters(6, quake_centroids(), &quake_catalog(), 7).unwrap();
        assert_eq!(
            partition.into_groups(),
            vec![vec![3, 5, 8], vec![6], vec![1, 2], vec![4], vec![9], vec![7]]
        );
    }

    #[test]
    fn test_final_centroids_are_group_means() {
        let fit = build_clusters_with_centroids(6, quake_centroids(), &quake_catalog(), 7).unwrap();
        assert_eq!(fit.passes, 7);
        let c0 = &fit.centroids[0];
        let expected_lon = (149.6847 + 179.4232 + 132.036) / 3.0;
        let expected_lat = (45.0761 + 52.1764 + 32.8717) / 3.0;
        assert!((c0[0] - expected_lon).abs() < 1e-9);
        assert!((c0[1] - expected_lat).abs() < 1e-9);
        // Singleton group: centroid is the member itself.
        assert_eq!(fit.centroids[1], vec![102.1165, -4.1281]);
    }

    #[test]
    fn test_empty_group_keeps_its_centroid() {
        let catalog = Catalog::from_points(vec![vec![0.0, 0.0], vec![1.0, 0.0]]);
        // Second centroid is far from both points and never wins.
        let centroids = vec![vec![0.5, 0.0], vec![100.0, 100.0]];
        let fit = build_clusters_with_centroids(2, centroids, &catalog, 3).unwrap();
        assert_eq!(fit.partition.groups(), &[vec![1, 2], vec![]]);
        assert_eq!(fit.centroids[1], vec![100.0, 100.0]);
        assert_eq!(fit.centroids[0], vec![0.5, 0.0]);
    }

    #[test]
    fn test_tie_goes_to_lower_index() {
        // Point 1 sits exactly between both centroids.
        let catalog = Catalog::from_points(vec![vec![0.0], vec![1.0]]);
        let centroids = vec![vec![-1.0], vec![1.0]];
        let partition = build_clusters(2, centroids, &catalog, 1).unwrap();
        assert_eq!(partition.groups(), &[vec![1], vec![2]]);
    }

    #[test]
    fn test_centroid_count_must_match_k() {
        let catalog = quake_catalog();
        let err = build_clusters(5, quake_centroids(), &catalog, 7).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "centroids", .. }));
    }

    #[test]
    fn test_zero_passes_rejected() {
        let err = build_clusters(6, quake_centroids(), &quake_catalog(), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "passes", .. }));
    }

    #[test]
    fn test_point_dimension_mismatch() {
        let catalog = Catalog::from_points(vec![vec![0.0, 0.0], vec![1.0, 1.0, 1.0]]);
        let err = build_clusters(1, vec![vec![0.0, 0.0]], &catalog, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_centroid_dimension_mismatch() {
        let catalog = Catalog::from_points(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        let err = build_clusters(1, vec![vec![0.0]], &catalog, 1).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_empty_catalog_is_insufficient_data() {
        let empty = Catalog::default();

        let err = build_clusters(1, vec![vec![0.0]], &empty, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData {
                requested: 1,
                available: 0
            }
        ));
        let err = build_clusters(0, vec![], &empty, 1).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { requested: 0, .. }));

        for k in [0, 1] {
            let err = Kmeans::new(k).with_seed(1).fit(&empty).unwrap_err();
            assert!(
                matches!(err, Error::InsufficientData { available: 0, .. }),
                "k={k}: {err:?}"
            );
        }
    }

    #[test]
    fn test_kmeans_basic() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.1],
        ];

        let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();

        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_kmeans_deterministic_with_seed() {
        let catalog = quake_catalog();
        let a = Kmeans::default().with_seed(9).fit(&catalog).unwrap();
        let b = Kmeans::default().with_seed(9).fit(&catalog).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_kmeans_k_equals_n() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = Kmeans::new(3).with_seed(42).fit_predict(&data).unwrap();
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_kmeans_k_larger_than_n_error() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let result = Kmeans::new(5).fit_predict(&data);
        assert!(matches!(
            result,
            Err(Error::InsufficientData {
                requested: 5,
                available: 2
            })
        ));
    }

    #[test]
    fn test_kmeans_defaults() {
        let model = Kmeans::default();
        assert_eq!(model.k(), 6);
        assert_eq!(model.passes(), 7);
        assert_eq!(model.n_clusters(), 6);
    }
}
