//! IK solver parameters.

use crate::{IkError, IkResult};

/// Parameters for [`solve_two_bone`](crate::solve_two_bone).
///
/// # Examples
///
/// ```
/// use rig_ik::IkParams;
///
/// let params = IkParams::default().with_twist(0.3);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IkParams {
    /// Minimum distance kept between the root and the target, and between the
    /// target and full extension. Default 0.001.
    pub epsilon: f64,
    /// Extra rotation in radians about the root-to-effector axis.
    pub twist: f64,
}

impl Default for IkParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            twist: 0.0,
        }
    }
}

impl IkParams {
    /// Sets the twist.
    #[must_use]
    pub const fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }

    /// Sets the epsilon.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`IkError::InvalidParams`] if epsilon is not positive and
    /// finite, or twist is not finite.
    pub fn validate(&self) -> IkResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(IkError::InvalidParams(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if !self.twist.is_finite() {
            return Err(IkError::InvalidParams(format!(
                "twist must be finite, got {}",
                self.twist
            )));
        }
        Ok(())
    }
}
