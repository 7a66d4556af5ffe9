//! Density-based clustering of dense vectors.
//!
//! ## DBSCAN
//!
//! Density-based clustering that discovers clusters of arbitrary shape and
//! marks outliers as noise, without being told how many clusters to find.
//! A point is *core* when at least `min_samples` points (itself included) lie
//! strictly closer than `eps`; clusters grow outward from core points through
//! chains of overlapping neighborhoods.
//!
//! This implementation is exact: every pairwise distance is computed once into a
//! condensed [`DistanceIndex`] (upper triangle, no diagonal), and neighborhoods
//! are scanned from it on demand. No spatial tree is involved, so it suits
//! datasets up to a few tens of thousands of points.
//!
//! ## Pieces
//!
//! - [`DbscanParams`]: immutable `eps` / `min_samples` configuration.
//! - [`Metric`]: pluggable distance, [`Euclidean`] by default.
//! - [`DistanceIndex`]: the condensed table with O(1) pair lookup.
//! - [`Dbscan`]: the engine; [`Clustering::fit`] returns a [`ClusterResult`].
//!
//! ## Usage
//!
//! ```rust
//! use dbclust::cluster::{Clustering, Dbscan, Manhattan, NOISE};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//!     vec![50.0, 50.0],
//! ];
//!
//! let result = Dbscan::new(0.5, 2).unwrap().fit(&data).unwrap();
//! assert_eq!(result.labels(), &[0, 0, 1, 1, NOISE]);
//! assert_eq!(result.n_clusters(), 2);
//!
//! // Same parameters, different metric.
//! let labels = Dbscan::new(0.5, 2)
//!     .unwrap()
//!     .with_metric(Manhattan)
//!     .fit_predict(&data)
//!     .unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1, NOISE]);
//! ```

mod dbscan;
mod distance;
mod metric;
mod params;
mod result;
mod traits;
mod util;

pub use dbscan::{Dbscan, NOISE};
pub use distance::{condensed_offset, DistanceIndex};
pub use metric::{Euclidean, Manhattan, Metric};
pub use params::DbscanParams;
pub use result::{ClusterResult, PointKind};
pub use traits::Clustering;
