//! Random centroid seeding.
//!
//! Centroids are copies of `k` distinct catalog points, drawn uniformly
//! without replacement. The random source is supplied by the caller so that
//! tests can pin it with a seeded [`StdRng`](rand::rngs::StdRng).

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Pick `k` distinct points from `catalog` to act as initial centroids.
///
/// Fails with [`Error::InsufficientData`] if `k` is zero or larger than the
/// number of points.
pub fn initialize_centroids<R: Rng + ?Sized>(
    k: usize,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>> {
    let n = catalog.len();
    check_cluster_count(k, n)?;

    let points = catalog.points();
    Ok(index::sample(rng, n, k)
        .into_iter()
        .map(|idx| points[idx].clone())
        .collect())
}

pub(crate) fn check_cluster_count(k: usize, n: usize) -> Result<()> {
    if k == 0 || k > n {
        return Err(Error::InsufficientData {
            requested: k,
            available: n,
        });
    }
    Ok(())
}
