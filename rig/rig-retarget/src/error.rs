//! Error types for retargeting.

use rig_ik::IkError;
use thiserror::Error;

use crate::BodyPart;

/// Errors that can occur while configuring or running a retarget.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RetargetError {
    /// A retarget parameter is out of range.
    #[error("invalid retarget parameters: {0}")]
    InvalidParams(String),

    /// Limb IK parameters are invalid.
    #[error("invalid IK parameters: {0}")]
    Ik(#[from] IkError),

    /// A transform in the pose snapshot contains NaN or infinite values.
    #[error("non-finite {kind} transform for {part:?}")]
    NonFinitePose {
        /// The offending body part.
        part: BodyPart,
        /// Which of the part's transforms: current, input rest or target rest.
        kind: &'static str,
    },
}

/// Result type for retarget operations.
pub type RetargetResult<T> = Result<T, RetargetError>;
