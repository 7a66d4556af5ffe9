//! Distance metrics used to fill a [`DistanceIndex`](super::DistanceIndex).
//!
//! A metric must be a pure function of its two arguments, symmetric, and return
//! `0.0` for identical vectors. Any `Fn(&[f32], &[f32]) -> f32 + Sync` closure
//! qualifies, so callers can plug in cosine distance, weighted norms, and so on.
//!
//! ```rust
//! use dbclust::cluster::{Euclidean, Metric};
//!
//! let d = Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
//! assert_eq!(d, 5.0);
//!
//! let chebyshev = |a: &[f32], b: &[f32]| {
//!     a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0f32, f32::max)
//! };
//! assert_eq!(chebyshev.distance(&[0.0, 0.0], &[3.0, 4.0]), 4.0);
//! ```

use super::util;

/// A pairwise distance function over feature vectors.
///
/// `Sync` is required because the distance table is filled from several threads.
pub trait Metric: Sync {
    /// Distance between `a` and `b` (same length). Must be finite and `>= 0`.
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Euclidean (L2) distance. The default metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        util::squared_euclidean(a, b).sqrt()
    }
}

/// Manhattan (L1) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Metric for Manhattan {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

impl<F> Metric for F
where
    F: Fn(&[f32], &[f32]) -> f32 + Sync,
{
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        self(a, b)
    }
}
