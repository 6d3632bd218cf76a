//! Earthquake epicenter clustering.
//!
//! `quakemap` groups longitude/latitude points with fixed-pass k-means and
//! draws the groups on a world map.
//!
//! - [`cluster`]: distance, centroid seeding, and the k-means loop.
//! - [`Catalog`] / [`Partition`]: the points and the grouping of their ids.
//! - [`loader`]: reads a delimited earthquake listing into a [`Catalog`].
//! - [`render`]: draws a [`Partition`] as colored markers (SVG).
//!
//! ```rust
//! use quakemap::{Catalog, Kmeans};
//!
//! let catalog = Catalog::from_points(vec![
//!     vec![142.8, -6.2],
//!     vec![142.9, -6.1],
//!     vec![-70.1, -33.4],
//!     vec![-70.3, -33.0],
//! ]);
//! let fit = Kmeans::new(2).with_seed(1).fit(&catalog).unwrap();
//! assert_eq!(fit.partition.len(), 2);
//! assert_eq!(fit.partition.group_of(1), fit.partition.group_of(2));
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod cluster;
pub mod error;
pub mod loader;
pub mod render;

pub use catalog::{Catalog, Partition, PointId};
pub use cluster::{
    build_clusters, euclidean_distance, initialize_centroids, Clustering, Kmeans, KmeansFit,
};
pub use error::{Error, Result};
pub use loader::{read_catalog, Loader};
pub use render::{Palette, Projection, Renderer, SvgRenderer};
