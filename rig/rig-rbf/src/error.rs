//! Error types for RBF interpolation.

use thiserror::Error;

/// Errors that can occur while building or evaluating an RBF network.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RbfError {
    /// A configuration value is out of range.
    #[error("invalid RBF configuration: {0}")]
    InvalidConfig(String),

    /// A sample disagrees with the first sample on a feature or output count.
    #[error("sample {sample} has {found} {field}, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending sample.
        sample: usize,
        /// Which list has the wrong length.
        field: &'static str,
        /// Length established by the first sample.
        expected: usize,
        /// Length found on the offending sample.
        found: usize,
    },

    /// A query does not match the layout the network was trained on.
    #[error("query has {found} {field}, network expects {expected}")]
    QueryMismatch {
        /// Which list has the wrong length.
        field: &'static str,
        /// Length the network was built with.
        expected: usize,
        /// Length found on the query.
        found: usize,
    },

    /// The input rest rotations do not match the rotation feature count.
    #[error("{found} input rest rotations given for {expected} rotation features")]
    RestMismatch {
        /// Rotation feature count of the samples.
        expected: usize,
        /// Number of rest rotations given.
        found: usize,
    },
}

/// Result type for RBF operations.
pub type RbfResult<T> = Result<T, RbfError>;
