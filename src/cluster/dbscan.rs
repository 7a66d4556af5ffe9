//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN is a density-based clustering algorithm that groups points based on
//! neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Points strictly closer than ε are neighbors.
//! - **min_samples**: Neighborhood size, *including the point itself*, needed
//!   for a point to be "core".
//! - **Core point**: Has at least `min_samples` points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. Build a condensed [`DistanceIndex`] over all pairs.
//! 2. Classify every point as core or not. Each point is independent, so this
//!    runs in parallel.
//! 3. Walk core points in ascending index order. Each one not yet labeled seeds a
//!    new cluster, grown breadth-first: every unlabeled neighbor of a frontier
//!    core point joins the cluster, and joins the frontier if it is core too.
//! 4. Whatever was never reached is noise.
//!
//! A border point within ε of two clusters keeps the first label it receives.
//! Because seeds and neighborhoods are both visited in ascending order, the
//! outcome is fully deterministic.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) for the distance table and for the neighborhood scans.
//! - **Space**: O(n²) for the condensed table (half the square form), O(n) for labels.
//!
//! ## Limitations
//!
//! - Struggles with varying densities (consider OPTICS or HDBSCAN)
//! - ε is sensitive and dataset-dependent; a k-distance plot helps pick it
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use super::distance::DistanceIndex;
use super::metric::{Euclidean, Metric};
use super::params::DbscanParams;
use super::result::ClusterResult;
use super::traits::Clustering;
use super::util;
use crate::error::{Error, InputError, Result};

/// Label given to noise points.
pub const NOISE: i32 = -1;

// Internal label for points no expansion has reached yet.
const UNASSIGNED: i32 = -2;

/// DBSCAN clustering engine.
///
/// Holds only immutable configuration; each run allocates its own state, so one
/// engine can serve concurrent `fit` calls.
///
/// ```rust
/// use dbclust::cluster::{Clustering, Dbscan};
///
/// let data = vec![
///     vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0],
///     vec![6.0, 8.0], vec![7.0, 7.0], vec![8.0, 6.0],
///     vec![1.0, 8.0],
/// ];
/// let result = Dbscan::new(1.5, 3).unwrap().fit(&data).unwrap();
/// assert_eq!(result.labels(), &[0, 0, 0, 1, 1, 1, -1]);
/// assert_eq!(result.core_sample_indices(), &[1, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Dbscan<M = Euclidean> {
    params: DbscanParams,
    metric: M,
}

impl Dbscan<Euclidean> {
    /// Create a Euclidean DBSCAN engine.
    ///
    /// # Arguments
    ///
    /// * `eps` - Neighborhood radius; must be finite and positive.
    /// * `min_samples` - Neighborhood size (including the point) for a core point; at least 1.
    ///
    /// # Typical Values
    ///
    /// - `eps`: Often read off a k-distance plot (k = min_samples - 1).
    /// - `min_samples`: 2 * dimension is a common heuristic.
    pub fn new(eps: f32, min_samples: usize) -> Result<Self> {
        Self::from_params(DbscanParams::new(eps, min_samples))
    }

    /// Create a Euclidean DBSCAN engine from a parameter set.
    pub fn from_params(params: DbscanParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            metric: Euclidean,
        })
    }
}

impl Default for Dbscan<Euclidean> {
    fn default() -> Self {
        Self {
            params: DbscanParams::default(),
            metric: Euclidean,
        }
    }
}

impl<M: Metric> Dbscan<M> {
    /// Swap the distance metric, keeping the parameters.
    pub fn with_metric<N: Metric>(self, metric: N) -> Dbscan<N> {
        Dbscan {
            params: self.params,
            metric,
        }
    }

    /// The validated parameters.
    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    /// The distance metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Like [`Clustering::fit`], but gives up with [`Error::Cancelled`] once
    /// `cancel` is set.
    ///
    /// The flag is polled between condensed-table rows, between points during
    /// core classification, and between frontier pops during expansion.
    pub fn fit_with_cancel(&self, data: &[Vec<f32>], cancel: &AtomicBool) -> Result<ClusterResult> {
        let started = Instant::now();
        let index = DistanceIndex::build_with_cancel(data, &self.metric, Some(cancel))?;
        debug!(
            "built distance index over {} points ({} pairs) in {:?}",
            index.n_points(),
            index.as_condensed().len(),
            started.elapsed()
        );
        self.run(&index, data, Some(cancel))
    }

    /// Cluster using a distance table computed elsewhere.
    ///
    /// `data` supplies the feature vectors copied into
    /// [`components`](ClusterResult::components); it must have as many points as
    /// `index`. The engine's own metric is not consulted.
    pub fn fit_index(&self, index: &DistanceIndex, data: &[Vec<f32>]) -> Result<ClusterResult> {
        util::validate_points(data)?;
        if data.len() != index.n_points() {
            return Err(InputError::PointCountMismatch {
                index_points: index.n_points(),
                data_points: data.len(),
            }
            .into());
        }
        self.run(index, data, None)
    }

    fn run(
        &self,
        index: &DistanceIndex,
        data: &[Vec<f32>],
        cancel: Option<&AtomicBool>,
    ) -> Result<ClusterResult> {
        let is_core = self.classify_core(index, cancel)?;
        let core_sample_indices: Vec<usize> = is_core
            .iter()
            .enumerate()
            .filter_map(|(i, &core)| core.then_some(i))
            .collect();
        debug!(
            "{} of {} points are core (eps={}, min_samples={})",
            core_sample_indices.len(),
            index.n_points(),
            self.params.eps(),
            self.params.min_samples()
        );

        let (labels, n_clusters) = self.expand(index, &is_core, cancel)?;
        debug!(
            "expansion found {} clusters, {} noise points",
            n_clusters,
            labels.iter().filter(|&&l| l == NOISE).count()
        );

        let components = core_sample_indices
            .iter()
            .map(|&i| data[i].clone())
            .collect();
        Ok(ClusterResult::new(
            labels,
            core_sample_indices,
            components,
            n_clusters,
        ))
    }

    /// Mark each point core or not. Per-point results, no shared counters.
    fn classify_core(
        &self,
        index: &DistanceIndex,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<bool>> {
        let eps = self.params.eps();
        // min_samples counts the point itself; stop scanning once enough others are seen.
        let needed = self.params.min_samples() - 1;
        (0..index.n_points())
            .into_par_iter()
            .map(|i| {
                if util::is_cancelled(cancel) {
                    return Err(Error::Cancelled);
                }
                Ok(index.neighbors_of(i, eps).take(needed).count() == needed)
            })
            .collect()
    }

    /// Breadth-first growth from core seeds in ascending order.
    ///
    /// Returns final labels (noise already mapped to [`NOISE`]) and the cluster count.
    fn expand(
        &self,
        index: &DistanceIndex,
        is_core: &[bool],
        cancel: Option<&AtomicBool>,
    ) -> Result<(Vec<i32>, usize)> {
        let eps = self.params.eps();
        let mut labels = vec![UNASSIGNED; is_core.len()];
        let mut frontier = VecDeque::new();
        let mut cluster_id: i32 = 0;

        for seed in 0..is_core.len() {
            if !is_core[seed] || labels[seed] != UNASSIGNED {
                continue;
            }
            trace!("seeding cluster {} from core point {}", cluster_id, seed);
            labels[seed] = cluster_id;
            frontier.push_back(seed);

            while let Some(p) = frontier.pop_front() {
                if util::is_cancelled(cancel) {
                    return Err(Error::Cancelled);
                }
                for q in index.neighbors_of(p, eps) {
                    // First writer wins: a border point never changes cluster.
                    if labels[q] != UNASSIGNED {
                        continue;
                    }
                    labels[q] = cluster_id;
                    if is_core[q] {
                        frontier.push_back(q);
                    }
                }
            }
            cluster_id += 1;
        }

        for l in labels.iter_mut() {
            if *l == UNASSIGNED {
                *l = NOISE;
            }
        }
        Ok((labels, cluster_id as usize))
    }
}

impl<M: Metric> Clustering for Dbscan<M> {
    fn fit(&self, data: &[Vec<f32>]) -> Result<ClusterResult> {
        self.fit_with_cancel(data, &AtomicBool::new(false))
    }
}
