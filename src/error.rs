use thiserror::Error;

/// Errors returned by the clustering engine in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Input data (or a query against it) is unusable.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The caller raised the cancellation flag before the run finished.
    #[error("clustering run cancelled")]
    Cancelled,
}

/// Why a dataset, distance table, or index query was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Fewer than two points; no pairwise distance exists.
    #[error("need at least 2 points, got {n}")]
    TooFewPoints {
        /// Number of points supplied.
        n: usize,
    },

    /// Points have zero features.
    #[error("points have no features")]
    EmptyFeatures,

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch at point {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Index of the first offending point.
        index: usize,
        /// Expected dimensionality (that of point 0).
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate in point {index}")]
    NonFinite {
        /// Index of the first offending point.
        index: usize,
    },

    /// A distance from a point to itself was requested.
    #[error("self-distance requested for point {index}")]
    SelfDistance {
        /// The point index.
        index: usize,
    },

    /// A point index is not below the number of points.
    #[error("point index {index} out of bounds for {n} points")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of points in the index.
        n: usize,
    },

    /// A precomputed condensed table has the wrong length.
    #[error("condensed table length {found} does not match expected {expected}")]
    CondensedLength {
        /// `n * (n - 1) / 2`.
        expected: usize,
        /// Supplied length.
        found: usize,
    },

    /// A precomputed index covers a different number of points than the data.
    #[error("distance index covers {index_points} points but data has {data_points}")]
    PointCountMismatch {
        /// Points covered by the index.
        index_points: usize,
        /// Points in the dataset.
        data_points: usize,
    },

    /// A serialized result breaks the invariants of a clustering run.
    #[error("inconsistent cluster result: {reason}")]
    InconsistentResult {
        /// Which invariant failed.
        reason: &'static str,
    },

    /// A metric produced a negative or non-finite distance.
    #[error("invalid distance {value} between points {i} and {j}")]
    InvalidDistance {
        /// Smaller point index.
        i: usize,
        /// Larger point index.
        j: usize,
        /// Offending value.
        value: f32,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message() {
        let e = Error::InvalidParameter {
            name: "eps",
            message: "must be positive",
        };
        assert_eq!(e.to_string(), "invalid parameter eps: must be positive");
    }

    #[test]
    fn input_error_converts() {
        let e: Error = InputError::TooFewPoints { n: 1 }.into();
        assert_eq!(e.to_string(), "invalid input: need at least 2 points, got 1");
        assert!(matches!(
            e,
            Error::InvalidInput(InputError::TooFewPoints { n: 1 })
        ));
    }

    #[test]
    fn dimension_mismatch_message() {
        let e = InputError::DimensionMismatch {
            index: 3,
            expected: 2,
            found: 1,
        };
        assert_eq!(
            e.to_string(),
            "dimension mismatch at point 3: expected 2, found 1"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<Error>();
        assert_impl::<InputError>();
    }
}
