//! Immutable configuration for a DBSCAN run.

use crate::error::{Error, Result};

/// DBSCAN parameters.
///
/// Fixed once constructed; an engine built from these can be shared across
/// threads and run concurrently.
///
/// ```rust
/// use dbclust::cluster::DbscanParams;
///
/// let params = DbscanParams::new(1.5, 3);
/// assert!(params.validate().is_ok());
/// assert!(DbscanParams::new(0.0, 3).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DbscanParams {
    /// Neighborhood radius. Neighbors lie strictly closer than this.
    eps: f32,
    /// Minimum neighborhood size, counting the point itself, for a core point.
    min_samples: usize,
}

impl DbscanParams {
    /// Create a parameter set. Call [`validate`](Self::validate) before use.
    pub fn new(eps: f32, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    /// Neighborhood radius.
    pub fn eps(&self) -> f32 {
        self.eps
    }

    /// Minimum neighborhood size (including the point itself).
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Returns an error if `eps` is not finite and positive, or `min_samples < 1`.
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "eps",
                message: "must be finite and positive",
            });
        }
        if self.min_samples < 1 {
            return Err(Error::InvalidParameter {
                name: "min_samples",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}
