use super::result::ClusterResult;
use crate::error::Result;

/// Common interface for clustering algorithms that label every input point.
pub trait Clustering {
    /// Cluster `data`, returning labels, core samples, and core components.
    fn fit(&self, data: &[Vec<f32>]) -> Result<ClusterResult>;

    /// Cluster `data` and return only the per-point labels (`-1` for noise).
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<i32>> {
        Ok(self.fit(data)?.into_labels())
    }
}
