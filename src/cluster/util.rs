use crate::error::{Error, Result};

/// Euclidean distance between two points of equal dimensionality.
///
/// Fails with [`Error::DimensionMismatch`] when the lengths differ. The result
/// is symmetric in its arguments and never negative.
///
/// ```rust
/// use quakemap::cluster::euclidean_distance;
///
/// let d = euclidean_distance(&[2.0, 6.0], &[3.0, 10.0]).unwrap();
/// assert!((d - 17f64.sqrt()).abs() < 1e-12);
/// ```
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    ensure_dim(a.len(), b.len())?;
    Ok(squared_euclidean(a, b).sqrt())
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[inline]
pub(crate) fn ensure_dim(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, found })
    }
}

/// Index of the centroid nearest to `point`.
///
/// Scans in index order and only replaces the running best on a strictly
/// smaller distance, so the lowest index wins ties. `centroids` must be
/// non-empty and dimension-checked by the caller.
pub(crate) fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = squared_euclidean(point, centroid).sqrt();
        if d < best_dist {
            best_dist = d;
            best = c;
        }
    }
    best
}
