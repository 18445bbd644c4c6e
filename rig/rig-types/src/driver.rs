//! Swing/twist re-weighting for helper joints.

use nalgebra::UnitQuaternion;

use crate::rotation::{TwistAxis, decompose_swing_twist};

/// Re-weights the swing and twist of a joint rotation independently.
///
/// The rotation is read relative to its rest pose, split about the twist
/// axis, and each part is scaled by its weight along the shortest arc from
/// the identity. A negative weight inverts that part.
///
/// # Examples
///
/// ```
/// use rig_types::{SwingTwistDriver, TwistAxis};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// // Half the forearm twist, none of the bend
/// let driver = SwingTwistDriver::new(TwistAxis::X)
///     .with_swing_weight(0.0)
///     .with_twist_weight(0.5);
///
/// let current = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.0);
/// let out = driver.apply(&current);
/// assert!((out.angle() - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwingTwistDriver {
    /// Axis the twist is measured about.
    pub twist_axis: TwistAxis,
    /// Fraction of the swing to keep.
    pub swing_weight: f64,
    /// Fraction of the twist to keep.
    pub twist_weight: f64,
}

impl Default for SwingTwistDriver {
    fn default() -> Self {
        Self::new(TwistAxis::X)
    }
}

impl SwingTwistDriver {
    /// Creates a driver that passes both parts through unchanged.
    #[must_use]
    pub const fn new(twist_axis: TwistAxis) -> Self {
        Self {
            twist_axis,
            swing_weight: 1.0,
            twist_weight: 1.0,
        }
    }

    /// Sets the swing weight.
    #[must_use]
    pub const fn with_swing_weight(mut self, weight: f64) -> Self {
        self.swing_weight = weight;
        self
    }

    /// Sets the twist weight.
    #[must_use]
    pub const fn with_twist_weight(mut self, weight: f64) -> Self {
        self.twist_weight = weight;
        self
    }

    /// Re-weights a rotation already expressed relative to its rest pose.
    #[must_use]
    pub fn apply(&self, local: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
        let parts = decompose_swing_twist(local, &self.twist_axis.unit());
        weighted(&parts.twist, self.twist_weight) * weighted(&parts.swing, self.swing_weight)
    }

    /// Reads `current` relative to `rest`, re-weights it, and places the
    /// result on top of `target_rest`.
    #[must_use]
    pub fn drive(
        &self,
        rest: &UnitQuaternion<f64>,
        current: &UnitQuaternion<f64>,
        target_rest: &UnitQuaternion<f64>,
    ) -> UnitQuaternion<f64> {
        target_rest * self.apply(&(rest.inverse() * current))
    }
}

/// Scales a rotation's angle by `|weight|`, inverting it for negative weights.
fn weighted(part: &UnitQuaternion<f64>, weight: f64) -> UnitQuaternion<f64> {
    // scaled_axis takes the shortest arc, so the sign of w never matters
    UnitQuaternion::from_scaled_axis(part.scaled_axis() * weight)
}
