use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{InputError, Result};

/// Check a dataset at the boundary and return its dimensionality.
///
/// Order of checks is fixed so the reported error is deterministic: point count,
/// then the first ragged row, then the first row holding a NaN or infinity.
pub(crate) fn validate_points(data: &[Vec<f32>]) -> Result<usize> {
    let n = data.len();
    if n < 2 {
        return Err(InputError::TooFewPoints { n }.into());
    }

    let d = data[0].len();
    if d == 0 {
        return Err(InputError::EmptyFeatures.into());
    }

    if let Some((index, row)) = data.iter().enumerate().find(|(_, row)| row.len() != d) {
        return Err(InputError::DimensionMismatch {
            index,
            expected: d,
            found: row.len(),
        }
        .into());
    }

    if let Some(index) = data
        .iter()
        .position(|row| row.iter().any(|x| !x.is_finite()))
    {
        return Err(InputError::NonFinite { index }.into());
    }

    Ok(d)
}

/// Check that `index` addresses one of `n` points.
#[inline]
pub(crate) fn check_index(index: usize, n: usize) -> Result<()> {
    if index >= n {
        return Err(InputError::IndexOutOfBounds { index, n }.into());
    }
    Ok(())
}

/// Whether the caller's cancellation flag, if any, has been raised.
#[inline]
pub(crate) fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|c| c.load(Ordering::Relaxed))
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn accepts_rectangular_finite_data() {
        let data = vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]];
        assert_eq!(validate_points(&data).unwrap(), 2);
    }

    #[test]
    fn rejects_single_point() {
        let data = vec![vec![0.0, 1.0]];
        assert!(matches!(
            validate_points(&data),
            Err(Error::InvalidInput(InputError::TooFewPoints { n: 1 }))
        ));
    }

    #[test]
    fn rejects_empty_features() {
        let data = vec![vec![], vec![]];
        assert!(matches!(
            validate_points(&data),
            Err(Error::InvalidInput(InputError::EmptyFeatures))
        ));
    }

    #[test]
    fn reports_first_ragged_row() {
        let data = vec![vec![0.0, 0.0], vec![1.0], vec![1.0, 2.0, 3.0]];
        assert!(matches!(
            validate_points(&data),
            Err(Error::InvalidInput(InputError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            }))
        ));
    }

    #[test]
    fn ragged_rows_reported_before_non_finite() {
        let data = vec![vec![f32::NAN, 0.0], vec![1.0]];
        assert!(matches!(
            validate_points(&data),
            Err(Error::InvalidInput(InputError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let data = vec![vec![0.0, 0.0], vec![1.0, f32::INFINITY], vec![f32::NAN, 0.0]];
        assert!(matches!(
            validate_points(&data),
            Err(Error::InvalidInput(InputError::NonFinite { index: 1 }))
        ));
    }

    #[test]
    fn cancellation_flag() {
        assert!(!is_cancelled(None));
        assert!(!is_cancelled(Some(&AtomicBool::new(false))));
        assert!(is_cancelled(Some(&AtomicBool::new(true))));
    }

    #[test]
    fn squared_euclidean_hand_computed() {
        assert_eq!(squared_euclidean(&[1.0, 3.0], &[2.0, 2.0]), 2.0);
        assert_eq!(squared_euclidean(&[0.0, 0.0, 0.0], &[1.0, 2.0, 2.0]), 9.0);
    }
}
