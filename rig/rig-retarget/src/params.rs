//! Retarget parameters and configuration.
//!
//! [`RetargetParams`] holds the global controls (stride and root-motion
//! scale, root-motion weights, forward axis) and one [`LimbParams`] per
//! IK limb.

use nalgebra::Vector3;
use rig_ik::{IkParams, SoftIk};

use crate::{BodyPart, Limb, RetargetError, RetargetResult};

/// Per-limb IK controls.
///
/// # Examples
///
/// ```
/// use rig_ik::SoftIk;
/// use rig_retarget::LimbParams;
///
/// let leg = LimbParams::world_space()
///     .with_twist(0.1)
///     .with_soft_ik(SoftIk::new(0.05, 0.0));
/// assert!(leg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LimbParams {
    /// Rotation in radians about the limb root-to-effector axis.
    pub twist: f64,
    /// Effector target space: 0 follows the limb root, 1 follows the input
    /// effector in world space.
    pub space_blend: f64,
    /// Soft IK easing and stretch.
    pub soft_ik: SoftIk,
}

impl LimbParams {
    /// Effector target relative to the limb root.
    #[must_use]
    pub const fn root_relative() -> Self {
        Self {
            twist: 0.0,
            space_blend: 0.0,
            soft_ik: SoftIk::new(0.0, 0.0),
        }
    }

    /// Effector target in world space, for planted feet.
    #[must_use]
    pub const fn world_space() -> Self {
        Self {
            twist: 0.0,
            space_blend: 1.0,
            soft_ik: SoftIk::new(0.0, 0.0),
        }
    }

    /// Sets the twist offset.
    #[must_use]
    pub const fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }

    /// Sets the space blend.
    #[must_use]
    pub const fn with_space_blend(mut self, space_blend: f64) -> Self {
        self.space_blend = space_blend;
        self
    }

    /// Sets the soft IK settings.
    #[must_use]
    pub const fn with_soft_ik(mut self, soft_ik: SoftIk) -> Self {
        self.soft_ik = soft_ik;
        self
    }

    /// Validates the limb controls.
    ///
    /// # Errors
    ///
    /// Returns an error if twist is not finite, space blend is outside
    /// `[0, 1]`, or the soft IK settings are invalid.
    pub fn validate(&self) -> RetargetResult<()> {
        if !self.twist.is_finite() {
            return Err(RetargetError::InvalidParams(format!(
                "limb twist must be finite, got {}",
                self.twist
            )));
        }
        if !(0.0..=1.0).contains(&self.space_blend) {
            return Err(RetargetError::InvalidParams(format!(
                "space blend must be in [0, 1], got {}",
                self.space_blend
            )));
        }
        self.soft_ik.validate()?;
        Ok(())
    }
}

/// Parameters for [`Retargeter`](crate::Retargeter).
///
/// # Examples
///
/// ```
/// use rig_retarget::{Limb, RetargetParams};
///
/// let params = RetargetParams::default()
///     .with_stride_scale(1.2)
///     .with_limb_twist(Limb::LeftLeg, 0.1);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.limb(Limb::LeftLeg).twist, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetargetParams {
    /// Horizontal root motion multiplier.
    pub stride_scale: f64,
    /// Additional horizontal root motion multiplier.
    pub root_motion_scale: f64,
    /// Parts whose forward direction and ground position define root motion,
    /// with their weights.
    pub root_motion_weights: Vec<(BodyPart, f64)>,
    /// Forward direction of the input skeleton at rest. Must not be vertical.
    pub forward_axis: Vector3<f64>,
    /// Left arm controls. Default root-relative.
    pub left_arm: LimbParams,
    /// Right arm controls. Default root-relative.
    pub right_arm: LimbParams,
    /// Left leg controls. Default world space.
    pub left_leg: LimbParams,
    /// Right leg controls. Default world space.
    pub right_leg: LimbParams,
    /// Two-bone solver settings shared by every limb.
    pub ik: IkParams,
}

impl Default for RetargetParams {
    fn default() -> Self {
        Self {
            stride_scale: 1.0,
            root_motion_scale: 1.0,
            root_motion_weights: vec![(BodyPart::Hips, 1.0), (BodyPart::Spine, 0.5)],
            forward_axis: Vector3::z(),
            left_arm: LimbParams::root_relative(),
            right_arm: LimbParams::root_relative(),
            left_leg: LimbParams::world_space(),
            right_leg: LimbParams::world_space(),
            ik: IkParams::default(),
        }
    }
}

impl RetargetParams {
    /// Sets the stride scale.
    #[must_use]
    pub const fn with_stride_scale(mut self, scale: f64) -> Self {
        self.stride_scale = scale;
        self
    }

    /// Sets the root motion scale.
    #[must_use]
    pub const fn with_root_motion_scale(mut self, scale: f64) -> Self {
        self.root_motion_scale = scale;
        self
    }

    /// Sets the root motion part weights.
    #[must_use]
    pub fn with_root_motion_weights(mut self, weights: Vec<(BodyPart, f64)>) -> Self {
        self.root_motion_weights = weights;
        self
    }

    /// Sets the rest forward axis.
    #[must_use]
    pub const fn with_forward_axis(mut self, axis: Vector3<f64>) -> Self {
        self.forward_axis = axis;
        self
    }

    /// Sets the shared IK settings.
    #[must_use]
    pub const fn with_ik(mut self, ik: IkParams) -> Self {
        self.ik = ik;
        self
    }

    /// Replaces the controls of one limb.
    #[must_use]
    pub fn with_limb(mut self, limb: Limb, params: LimbParams) -> Self {
        *self.limb_mut(limb) = params;
        self
    }

    /// Sets the twist offset of one limb.
    #[must_use]
    pub fn with_limb_twist(mut self, limb: Limb, twist: f64) -> Self {
        self.limb_mut(limb).twist = twist;
        self
    }

    /// Controls for `limb`.
    pub const fn limb(&self, limb: Limb) -> &LimbParams {
        match limb {
            Limb::LeftArm => &self.left_arm,
            Limb::RightArm => &self.right_arm,
            Limb::LeftLeg => &self.left_leg,
            Limb::RightLeg => &self.right_leg,
        }
    }

    /// Mutable controls for `limb`.
    pub fn limb_mut(&mut self, limb: Limb) -> &mut LimbParams {
        match limb {
            Limb::LeftArm => &mut self.left_arm,
            Limb::RightArm => &mut self.right_arm,
            Limb::LeftLeg => &mut self.left_leg,
            Limb::RightLeg => &mut self.right_leg,
        }
    }

    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::InvalidParams`] for negative or non-finite
    /// scales, negative or all-zero root motion weights, a vertical or zero
    /// forward axis, and invalid limb controls. Returns
    /// [`RetargetError::Ik`] for invalid IK settings.
    pub fn validate(&self) -> RetargetResult<()> {
        for (name, value) in [
            ("stride scale", self.stride_scale),
            ("root motion scale", self.root_motion_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RetargetError::InvalidParams(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }

        if let Some((part, weight)) = self
            .root_motion_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(RetargetError::InvalidParams(format!(
                "root motion weight for {part:?} must be non-negative and finite, got {weight}"
            )));
        }
        if self.root_motion_weights.iter().all(|(_, w)| *w <= 0.0) {
            return Err(RetargetError::InvalidParams(
                "at least one root motion weight must be positive".to_string(),
            ));
        }
        if self.root_motion_weights.iter().any(|(part, _)| *part == BodyPart::Root) {
            return Err(RetargetError::InvalidParams(
                "root motion cannot be weighted by the root itself".to_string(),
            ));
        }

        let ground = Vector3::new(self.forward_axis.x, 0.0, self.forward_axis.z);
        if !self.forward_axis.iter().all(|v| v.is_finite()) || ground.norm() < 1e-6 {
            return Err(RetargetError::InvalidParams(format!(
                "forward axis must have a horizontal component, got {:?}",
                self.forward_axis
            )));
        }

        for limb in Limb::ALL {
            self.limb(limb).validate()?;
        }
        self.ik.validate()?;
        Ok(())
    }
}
