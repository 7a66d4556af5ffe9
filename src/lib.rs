//! Exact density-based clustering.
//!
//! `dbclust` implements DBSCAN over a condensed pairwise distance table.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`Dbscan`]: core-point detection, breadth-first cluster expansion, noise labeling
//! - [`DistanceIndex`]: all-pairs distances stored as an upper triangle with O(1) lookup
//! - [`Metric`]: pluggable distance functions (Euclidean by default)

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    condensed_offset, ClusterResult, Clustering, Dbscan, DbscanParams, DistanceIndex, Euclidean,
    Manhattan, Metric, PointKind, NOISE,
};
pub use error::{Error, InputError, Result};
