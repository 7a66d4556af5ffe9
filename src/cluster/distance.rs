//! Condensed pairwise distance table.
//!
//! A symmetric `n × n` distance matrix with a zero diagonal carries only
//! `n * (n - 1) / 2` independent values. [`DistanceIndex`] stores exactly those,
//! row by row over the smaller index:
//!
//! ```text
//!        j=0      j=1     j=2
//! i=1  [ d10 ]
//! i=2  [ d20 ]  [ d21 ]
//! i=3  [ d30 ]  [ d31 ]  [ d32 ]
//!
//! flat: d10 d20 d30 | d21 d31 | d32
//! ```
//!
//! The mapping from a pair to its slot is [`condensed_offset`]. It is the same
//! layout SciPy's `pdist` produces, so a table computed elsewhere can be handed in
//! through [`DistanceIndex::from_condensed`].

use std::sync::atomic::AtomicBool;

use rayon::prelude::*;

use super::metric::Metric;
use super::util;
use crate::error::{Error, InputError, Result};

/// Flat offset of the pair `(i, j)` in a condensed table over `n` points.
///
/// Symmetric in its arguments. With `i > j`:
///
/// ```text
/// offset(i, j) = n*j - j*(j+1)/2 + (i - j - 1)
/// ```
///
/// The caller guarantees `i != j` and `i, j < n`; [`DistanceIndex::distance`] is
/// the checked entry point.
///
/// # Panics
///
/// Debug builds panic when the preconditions are violated. Release builds do not
/// check them, and the returned offset is then meaningless (it may wrap or lie
/// past the end of the table).
///
/// ```rust
/// use dbclust::cluster::condensed_offset;
///
/// assert_eq!(condensed_offset(1, 0, 4), 0);
/// assert_eq!(condensed_offset(0, 3, 4), 2);
/// assert_eq!(condensed_offset(3, 2, 4), 5);
/// ```
#[inline]
pub fn condensed_offset(i: usize, j: usize, n: usize) -> usize {
    debug_assert!(i != j, "no diagonal elements in a condensed table");
    debug_assert!(i < n && j < n);
    let (i, j) = if i < j { (j, i) } else { (i, j) };
    n * j - j * (j + 1) / 2 + (i - j - 1)
}

#[inline]
fn condensed_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Exact all-pairs distances with O(1) lookup.
///
/// Built once per clustering run and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    n: usize,
    condensed: Vec<f32>,
}

impl DistanceIndex {
    /// Compute every pairwise distance of `data` under `metric`.
    ///
    /// Fails with [`InputError`] if there are fewer than two points, rows are
    /// empty or ragged, a coordinate is not finite, or the metric yields a
    /// negative or non-finite value.
    pub fn build<M: Metric + ?Sized>(data: &[Vec<f32>], metric: &M) -> Result<Self> {
        Self::build_with_cancel(data, metric, None)
    }

    pub(crate) fn build_with_cancel<M: Metric + ?Sized>(
        data: &[Vec<f32>],
        metric: &M,
        cancel: Option<&AtomicBool>,
    ) -> Result<Self> {
        util::validate_points(data)?;
        let n = data.len();
        let mut condensed = vec![0.0f32; condensed_len(n)];

        // Split the table into one disjoint slice per row so rows fill in parallel.
        let mut rows: Vec<(usize, &mut [f32])> = Vec::with_capacity(n - 1);
        let mut rest = condensed.as_mut_slice();
        for j in 0..n - 1 {
            let (row, tail) = std::mem::take(&mut rest).split_at_mut(n - j - 1);
            rows.push((j, row));
            rest = tail;
        }

        rows.into_par_iter().for_each(|(j, row)| {
            if util::is_cancelled(cancel) {
                return;
            }
            let a = &data[j];
            for (k, slot) in row.iter_mut().enumerate() {
                *slot = metric.distance(a, &data[j + 1 + k]);
            }
        });

        if util::is_cancelled(cancel) {
            return Err(Error::Cancelled);
        }

        check_values(n, &condensed)?;
        Ok(Self { n, condensed })
    }

    /// Wrap a condensed table computed elsewhere (e.g. by a linear-algebra library).
    ///
    /// `condensed` must use the [`condensed_offset`] layout and hold
    /// `n * (n - 1) / 2` finite, non-negative values.
    pub fn from_condensed(n: usize, condensed: Vec<f32>) -> Result<Self> {
        if n < 2 {
            return Err(InputError::TooFewPoints { n }.into());
        }
        let expected = condensed_len(n);
        if condensed.len() != expected {
            return Err(InputError::CondensedLength {
                expected,
                found: condensed.len(),
            }
            .into());
        }
        check_values(n, &condensed)?;
        Ok(Self { n, condensed })
    }

    /// Number of points covered by this index.
    pub fn n_points(&self) -> usize {
        self.n
    }

    /// The raw condensed table.
    pub fn as_condensed(&self) -> &[f32] {
        &self.condensed
    }

    /// Distance between points `i` and `j`.
    ///
    /// Fails on `i == j` (no self-distance is stored) or an out-of-range index.
    pub fn distance(&self, i: usize, j: usize) -> Result<f32> {
        util::check_index(i, self.n)?;
        util::check_index(j, self.n)?;
        if i == j {
            return Err(InputError::SelfDistance { index: i }.into());
        }
        Ok(self.distance_unchecked(i, j))
    }

    #[inline]
    pub(crate) fn distance_unchecked(&self, i: usize, j: usize) -> f32 {
        self.condensed[condensed_offset(i, j, self.n)]
    }

    /// Distances from point `i` to every other point, in ascending order of the
    /// other point's index (`i` itself skipped). Length `n - 1`.
    pub fn distances_from(&self, i: usize) -> Result<Vec<f32>> {
        util::check_index(i, self.n)?;
        Ok((0..self.n)
            .filter(|&j| j != i)
            .map(|j| self.distance_unchecked(i, j))
            .collect())
    }

    /// Indices `j != i` with `distance(i, j) < eps`, ascending.
    pub fn neighbors(&self, i: usize, eps: f32) -> Result<Vec<usize>> {
        util::check_index(i, self.n)?;
        Ok(self.neighbors_of(i, eps).collect())
    }

    #[inline]
    pub(crate) fn neighbors_of(&self, i: usize, eps: f32) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |&j| j != i && self.distance_unchecked(i, j) < eps)
    }
}

/// Reject the first negative or non-finite entry, reported by its point pair.
fn check_values(n: usize, condensed: &[f32]) -> Result<()> {
    let Some(pos) = condensed.iter().position(|d| !d.is_finite() || *d < 0.0) else {
        return Ok(());
    };
    // Walk rows to recover the pair; only runs on the error path.
    let mut start = 0;
    for j in 0..n - 1 {
        let len = n - j - 1;
        if pos < start + len {
            return Err(InputError::InvalidDistance {
                i: j,
                j: j + 1 + (pos - start),
                value: condensed[pos],
            }
            .into());
        }
        start += len;
    }
    unreachable!("offset {pos} lies inside a table of {} entries", condensed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::metric::Euclidean;
    use approx::assert_abs_diff_eq;

    fn four_points() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.0],
            vec![3.0, 4.0],
            vec![6.0, 8.0],
            vec![0.0, 1.0],
        ]
    }

    #[test]
    fn offset_is_a_bijection() {
        for n in 2..12 {
            let mut seen = vec![false; condensed_len(n)];
            for i in 0..n {
                for j in 0..i {
                    let off = condensed_offset(i, j, n);
                    assert!(!seen[off], "n={n} ({i},{j}) collides at {off}");
                    seen[off] = true;
                    assert_eq!(off, condensed_offset(j, i, n));
                }
            }
            assert!(seen.into_iter().all(|s| s));
        }
    }

    #[test]
    fn offset_matches_row_major_upper_triangle() {
        // Pairs listed as pdist emits them: (0,1), (0,2), (0,3), (1,2), (1,3), (2,3).
        let n = 4;
        let order = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        for (expected, (a, b)) in order.into_iter().enumerate() {
            assert_eq!(condensed_offset(a, b, n), expected);
        }
    }

    #[test]
    fn build_stores_half_the_square() {
        let idx = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        assert_eq!(idx.n_points(), 4);
        assert_eq!(idx.as_condensed().len(), 6);
        assert_abs_diff_eq!(idx.distance(0, 1).unwrap(), 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(idx.distance(2, 0).unwrap(), 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(idx.distance(3, 0).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let idx = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    assert_eq!(idx.distance(i, j).unwrap(), idx.distance(j, i).unwrap());
                }
            }
        }
    }

    #[test]
    fn self_distance_rejected() {
        let idx = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        assert_eq!(
            idx.distance(2, 2),
            Err(Error::InvalidInput(InputError::SelfDistance { index: 2 }))
        );
    }

    #[test]
    fn out_of_range_rejected() {
        let idx = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        assert_eq!(
            idx.distance(0, 4),
            Err(Error::InvalidInput(InputError::IndexOutOfBounds { index: 4, n: 4 }))
        );
        assert!(idx.distances_from(9).is_err());
        assert!(idx.neighbors(9, 1.0).is_err());
    }

    #[test]
    fn distances_from_skips_self() {
        let idx = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        let d = idx.distances_from(1).unwrap();
        assert_eq!(d.len(), 3);
        assert_abs_diff_eq!(d[0], 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(d[1], 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(d[2], 18.0f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn neighbors_use_strict_radius() {
        let idx = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        // Point 1 sits exactly 5.0 from points 0 and 2.
        assert_eq!(idx.neighbors(1, 5.0).unwrap(), vec![3]);
        assert_eq!(idx.neighbors(1, 5.01).unwrap(), vec![0, 2, 3]);
        assert_eq!(idx.neighbors(0, 1.5).unwrap(), vec![3]);
    }

    #[test]
    fn from_condensed_round_trips_build() {
        let built = DistanceIndex::build(&four_points(), &Euclidean).unwrap();
        let wrapped = DistanceIndex::from_condensed(4, built.as_condensed().to_vec()).unwrap();
        for i in 0..4 {
            assert_eq!(built.distances_from(i).unwrap(), wrapped.distances_from(i).unwrap());
        }
    }

    #[test]
    fn from_condensed_validates() {
        assert_eq!(
            DistanceIndex::from_condensed(1, vec![]).unwrap_err(),
            Error::InvalidInput(InputError::TooFewPoints { n: 1 })
        );
        assert_eq!(
            DistanceIndex::from_condensed(3, vec![1.0, 2.0]).unwrap_err(),
            Error::InvalidInput(InputError::CondensedLength {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            DistanceIndex::from_condensed(3, vec![1.0, 2.0, -0.5]).unwrap_err(),
            Error::InvalidInput(InputError::InvalidDistance { i: 1, j: 2, .. })
        ));
    }

    #[test]
    fn bad_metric_output_rejected() {
        let broken = |a: &[f32], b: &[f32]| a[0] - b[0];
        let data = vec![vec![0.0], vec![1.0], vec![2.0]];
        assert!(matches!(
            DistanceIndex::build(&data, &broken).unwrap_err(),
            Error::InvalidInput(InputError::InvalidDistance { i: 0, j: 1, .. })
        ));
    }

    #[test]
    fn build_observes_cancellation() {
        let flag = AtomicBool::new(true);
        assert_eq!(
            DistanceIndex::build_with_cancel(&four_points(), &Euclidean, Some(&flag)).unwrap_err(),
            Error::Cancelled
        );
    }
}
