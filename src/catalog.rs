//! Point storage shared by the clustering core and its collaborators.
//!
//! A [`Catalog`] maps dense identifiers `1..=N` to points. A [`Partition`]
//! groups those identifiers into `k` clusters.

/// Identifier of a point inside a [`Catalog`]. Always in `1..=catalog.len()`.
pub type PointId = usize;

/// Read-only coordinate lookup with dense identifiers starting at 1.
///
/// Identifiers follow insertion order, so the first point pushed is `1`, the
/// second `2`, and so on. There is no way to remove a point, which keeps the
/// identifier range gap-free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    points: Vec<Vec<f64>>,
}

impl Catalog {
    /// Build a catalog; `points[0]` receives identifier 1.
    pub fn from_points(points: Vec<Vec<f64>>) -> Self {
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the catalog holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point stored under `id`, if any.
    pub fn get(&self, id: PointId) -> Option<&[f64]> {
        id.checked_sub(1)
            .and_then(|idx| self.points.get(idx))
            .map(Vec::as_slice)
    }

    /// Dimensionality of the representative point (identifier 1).
    ///
    /// Returns `None` for an empty catalog.
    pub fn dim(&self) -> Option<usize> {
        self.points.first().map(Vec::len)
    }

    /// All identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> {
        1..=self.points.len()
    }

    /// `(id, point)` pairs in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[f64])> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, p)| (idx + 1, p.as_slice()))
    }

    /// Points in identifier order, without their identifiers.
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }
}

impl FromIterator<Vec<f64>> for Catalog {
    fn from_iter<I: IntoIterator<Item = Vec<f64>>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

/// Assignment of every catalog identifier to exactly one of `k` groups.
///
/// Group `i` belongs to centroid `i`. Identifiers inside a group are in the
/// order they were assigned, which for [`crate::cluster::build_clusters`] is
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    groups: Vec<Vec<PointId>>,
}

impl Partition {
    pub(crate) fn with_groups(k: usize) -> Self {
        Self {
            groups: vec![Vec::new(); k],
        }
    }

    pub(crate) fn assign(&mut self, group: usize, id: PointId) {
        self.groups[group].push(id);
    }

    /// Number of groups (`k`), including empty ones.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if the partition has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups, index-aligned with the centroid set.
    pub fn groups(&self) -> &[Vec<PointId>] {
        &self.groups
    }

    /// Members of group `index`.
    pub fn group(&self, index: usize) -> Option<&[PointId]> {
        self.groups.get(index).map(Vec::as_slice)
    }

    /// Member count per group.
    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    /// Index of the group holding `id`.
    pub fn group_of(&self, id: PointId) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(&id))
    }

    /// One label per identifier `1..=n`, in identifier order.
    ///
    /// Identifiers that are not in any group (only possible if `n` exceeds
    /// the catalog the partition was built from) are skipped.
    pub fn labels(&self, n: usize) -> Vec<usize> {
        let mut labels = vec![usize::MAX; n];
        for (g, members) in self.groups.iter().enumerate() {
            for &id in members {
                if let Some(slot) = id.checked_sub(1).and_then(|i| labels.get_mut(i)) {
                    *slot = g;
                }
            }
        }
        labels.retain(|&l| l != usize::MAX);
        labels
    }

    /// Consume the partition and return its groups.
    pub fn into_groups(self) -> Vec<Vec<PointId>> {
        self.groups
    }
}

impl From<Vec<Vec<PointId>>> for Partition {
    fn from(groups: Vec<Vec<PointId>>) -> Self {
        Self { groups }
    }
}
