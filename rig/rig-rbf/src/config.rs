//! Network configuration.

use rig_types::TwistAxis;

use crate::{RbfError, RbfKernel, RbfResult};

/// How sample outputs combine at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Outputs are interpolated directly.
    #[default]
    Absolute,
    /// Outputs are interpolated as offsets from the neutral sample and added
    /// back on top of it.
    Relative,
}

/// Configuration shared by every solver in an [`RbfNetwork`](crate::RbfNetwork).
///
/// # Example
///
/// ```
/// use rig_rbf::{OutputMode, RbfConfig, RbfKernel};
///
/// let config = RbfConfig::default()
///     .with_kernel(RbfKernel::Gaussian)
///     .with_radius(0.5)
///     .with_output_mode(OutputMode::Relative);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RbfConfig {
    /// Kernel applied to every distance.
    pub kernel: RbfKernel,
    /// Global kernel radius. Default 1.0.
    pub radius: f64,
    /// Tikhonov regularization added to the normal equations. Default 0.0.
    pub regularization: f64,
    /// Absolute or relative outputs.
    pub output_mode: OutputMode,
    /// Axis used to split rotation features into swing and twist.
    pub twist_axis: TwistAxis,
    /// Relative singular-value cutoff for the pseudo-inverse.
    pub pinv_epsilon: f64,
}

impl Default for RbfConfig {
    fn default() -> Self {
        Self {
            kernel: RbfKernel::Linear,
            radius: 1.0,
            regularization: 0.0,
            output_mode: OutputMode::Absolute,
            twist_axis: TwistAxis::X,
            pinv_epsilon: f64::EPSILON,
        }
    }
}

impl RbfConfig {
    /// Sets the kernel.
    #[must_use]
    pub const fn with_kernel(mut self, kernel: RbfKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Sets the global radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the regularization.
    #[must_use]
    pub const fn with_regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }

    /// Sets the output mode.
    #[must_use]
    pub const fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Sets the twist axis.
    #[must_use]
    pub const fn with_twist_axis(mut self, twist_axis: TwistAxis) -> Self {
        self.twist_axis = twist_axis;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::InvalidConfig`] if the radius, regularization or
    /// pseudo-inverse epsilon is negative or not finite.
    pub fn validate(&self) -> RbfResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(RbfError::InvalidConfig(format!(
                "radius must be finite and non-negative, got {}",
                self.radius
            )));
        }
        if !self.regularization.is_finite() || self.regularization < 0.0 {
            return Err(RbfError::InvalidConfig(format!(
                "regularization must be finite and non-negative, got {}",
                self.regularization
            )));
        }
        if !self.pinv_epsilon.is_finite() || self.pinv_epsilon < 0.0 {
            return Err(RbfError::InvalidConfig(format!(
                "pinv_epsilon must be finite and non-negative, got {}",
                self.pinv_epsilon
            )));
        }
        Ok(())
    }
}
