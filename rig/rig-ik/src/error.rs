//! Error types for IK parameters.

use thiserror::Error;

/// Errors reported by IK parameter validation.
///
/// The solvers themselves never fail: degenerate geometry is clamped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IkError {
    /// A parameter is out of range.
    #[error("invalid IK parameters: {0}")]
    InvalidParams(String),
}

/// Result type for IK operations.
pub type IkResult<T> = Result<T, IkError>;
