//! Output of a DBSCAN run.

use super::dbscan::NOISE;
use crate::error::InputError;

/// How a point was classified by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointKind {
    /// At least `min_samples` points (itself included) strictly within `eps`.
    Core,
    /// Not core, but strictly within `eps` of a core point.
    Border,
    /// Neither core nor border.
    Noise,
}

/// Final labels, core samples, and copies of the core feature vectors.
///
/// The only artifact that outlives a `fit` call; owns all of its data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawClusterResult")
)]
pub struct ClusterResult {
    /// One label per input point: a cluster id `>= 0`, or [`NOISE`].
    labels: Vec<i32>,
    /// Core point indices, strictly ascending.
    core_sample_indices: Vec<usize>,
    /// Feature vectors of the core points, same order as `core_sample_indices`.
    components: Vec<Vec<f32>>,
    /// Number of clusters found; ids are `0..n_clusters`.
    n_clusters: usize,
}

/// Unchecked wire form of [`ClusterResult`]; converted through [`ClusterResult::check`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawClusterResult {
    labels: Vec<i32>,
    core_sample_indices: Vec<usize>,
    components: Vec<Vec<f32>>,
    n_clusters: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawClusterResult> for ClusterResult {
    type Error = InputError;

    fn try_from(raw: RawClusterResult) -> Result<Self, Self::Error> {
        let result = Self {
            labels: raw.labels,
            core_sample_indices: raw.core_sample_indices,
            components: raw.components,
            n_clusters: raw.n_clusters,
        };
        result.check()?;
        Ok(result)
    }
}

impl ClusterResult {
    pub(crate) fn new(
        labels: Vec<i32>,
        core_sample_indices: Vec<usize>,
        components: Vec<Vec<f32>>,
        n_clusters: usize,
    ) -> Self {
        let result = Self {
            labels,
            core_sample_indices,
            components,
            n_clusters,
        };
        debug_assert_eq!(result.check(), Ok(()));
        result
    }

    /// Verify the invariants a run guarantees: labels in `-1..n_clusters`, core
    /// indices strictly ascending and in range, one component per core index.
    pub(crate) fn check(&self) -> Result<(), InputError> {
        let label_ok = |l: i32| l == NOISE || (l >= 0 && (l as usize) < self.n_clusters);
        if !self.labels.iter().all(|&l| label_ok(l)) {
            return Err(InputError::InconsistentResult {
                reason: "label outside -1..n_clusters",
            });
        }
        if !self.core_sample_indices.windows(2).all(|w| w[0] < w[1]) {
            return Err(InputError::InconsistentResult {
                reason: "core sample indices not strictly ascending",
            });
        }
        if self
            .core_sample_indices
            .last()
            .is_some_and(|&i| i >= self.labels.len())
        {
            return Err(InputError::InconsistentResult {
                reason: "core sample index out of range",
            });
        }
        if self.components.len() != self.core_sample_indices.len() {
            return Err(InputError::InconsistentResult {
                reason: "components do not match core sample indices",
            });
        }
        Ok(())
    }

    /// Cluster label per point; [`NOISE`] (`-1`) for noise.
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Consume the result, keeping only the labels.
    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }

    /// Indices of core points, ascending.
    pub fn core_sample_indices(&self) -> &[usize] {
        &self.core_sample_indices
    }

    /// Copies of the core points' feature vectors.
    pub fn components(&self) -> &[Vec<f32>] {
        &self.components
    }

    /// Number of clusters discovered.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of points labeled noise.
    pub fn n_noise(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }

    /// Whether `label` is the noise sentinel.
    pub fn is_noise(label: i32) -> bool {
        label == NOISE
    }

    /// Classification of point `i`, or `None` if `i` is out of range.
    pub fn point_kind(&self, i: usize) -> Option<PointKind> {
        let label = *self.labels.get(i)?;
        Some(if self.core_sample_indices.binary_search(&i).is_ok() {
            PointKind::Core
        } else if label == NOISE {
            PointKind::Noise
        } else {
            PointKind::Border
        })
    }

    /// Labels with noise as `None`.
    pub fn labels_with_noise(&self) -> Vec<Option<usize>> {
        self.labels
            .iter()
            .map(|&l| if l == NOISE { None } else { Some(l as usize) })
            .collect()
    }

    /// Number of points in each cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &l in &self.labels {
            if l != NOISE {
                sizes[l as usize] += 1;
            }
        }
        sizes
    }
}
