//! Soft IK: ease the chain into full extension instead of snapping.
//!
//! As the target distance approaches the rest length, the effective distance
//! follows an exponential curve so the chain never locks straight. Stretch
//! blends from that eased distance back to the real one by lengthening the
//! bones instead.

use nalgebra::Vector3;

use crate::{IkError, IkResult};

const MIN_SOFTNESS: f64 = 1e-3;

/// Soft IK settings. A softness of zero disables easing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoftIk {
    /// Fraction of the rest length over which easing happens, in `[0, 1]`.
    pub softness: f64,
    /// Blend from eased distance (0) to bone stretching (1), in `[0, 1]`.
    pub stretch: f64,
}

/// Adjusted goal from [`SoftIk::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftIkResult {
    /// Target to hand to the two-bone solver.
    pub target: Vector3<f64>,
    /// Scale to apply to both bone lengths.
    pub scale: f64,
}

impl SoftIk {
    /// Creates soft IK settings.
    #[must_use]
    pub const fn new(softness: f64, stretch: f64) -> Self {
        Self { softness, stretch }
    }

    /// Whether the settings change anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.softness > 0.0 || self.stretch > 0.0
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`IkError::InvalidParams`] if either value is outside `[0, 1]`.
    pub fn validate(&self) -> IkResult<()> {
        for (name, value) in [("softness", self.softness), ("stretch", self.stretch)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(IkError::InvalidParams(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Adjusts `target` for a chain rooted at `root` with the given rest length.
    ///
    /// Returns the target unchanged with unit scale when the rest length or
    /// the root-to-target distance is zero.
    #[must_use]
    pub fn apply(
        &self,
        root: &Vector3<f64>,
        target: &Vector3<f64>,
        rest_length: f64,
    ) -> SoftIkResult {
        let unchanged = SoftIkResult {
            target: *target,
            scale: 1.0,
        };
        let offset = target - root;
        let distance = offset.norm();
        if rest_length <= f64::EPSILON || distance <= f64::EPSILON {
            return unchanged;
        }

        let x = distance / rest_length;
        let eased = soft_scale(x, self.softness);
        let stretch = self.stretch.clamp(0.0, 1.0);

        let effective = rest_length * lerp(eased, x, stretch);
        let scale = lerp(1.0, x / eased, stretch);

        SoftIkResult {
            target: root + offset * (effective / distance),
            scale,
        }
    }
}

/// Eased target distance as a fraction of the rest length.
///
/// Identity up to `1 - softness`, then approaches 1 exponentially.
fn soft_scale(x: f64, softness: f64) -> f64 {
    let s = softness.clamp(0.0, 1.0).max(MIN_SOFTNESS);
    let knee = 1.0 - s;
    if x > knee {
        knee + s * (1.0 - (-(x - knee) / s).exp())
    } else {
        x
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
