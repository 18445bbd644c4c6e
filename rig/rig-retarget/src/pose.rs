//! Input skeleton snapshot.

use rig_types::Transform;

use crate::{BodyPart, RetargetError, RetargetResult};

/// The three world transforms the retargeter reads for one body part.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartPose {
    /// Animated world transform of the input skeleton.
    pub current: Transform,
    /// World transform of the input skeleton at rest.
    pub input_rest: Transform,
    /// World transform of the target skeleton at rest.
    pub target_rest: Transform,
}

impl PartPose {
    /// Creates a part pose.
    #[must_use]
    pub const fn new(current: Transform, input_rest: Transform, target_rest: Transform) -> Self {
        Self {
            current,
            input_rest,
            target_rest,
        }
    }

    /// A part at rest on both skeletons.
    #[must_use]
    pub const fn at_rest(input_rest: Transform, target_rest: Transform) -> Self {
        Self::new(input_rest, input_rest, target_rest)
    }

    /// World-space rotation taking the input rest pose to the current pose.
    #[must_use]
    pub fn delta_rotation(&self) -> nalgebra::UnitQuaternion<f64> {
        self.current.rotation * self.input_rest.rotation.inverse()
    }
}

/// Per-part transforms for one evaluation, indexed by [`BodyPart`].
///
/// Parts never set stay at identity.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use rig_retarget::{BodyPart, PartPose, PoseSnapshot};
/// use rig_types::Transform;
///
/// let mut pose = PoseSnapshot::new();
/// let hips = Transform::from_translation(Vector3::new(0.0, 1.0, 0.0));
/// pose.set(BodyPart::Hips, PartPose::at_rest(hips, hips));
/// assert_eq!(pose.get(BodyPart::Hips).current, hips);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSnapshot {
    parts: [PartPose; BodyPart::COUNT],
}

impl Default for PoseSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseSnapshot {
    /// Creates a snapshot with every part at identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: [PartPose::default(); BodyPart::COUNT],
        }
    }

    /// Builds a snapshot by calling `f` for every part.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(BodyPart) -> PartPose) -> Self {
        let mut snapshot = Self::new();
        for part in BodyPart::all() {
            snapshot.parts[part.index()] = f(part);
        }
        snapshot
    }

    /// Transforms for `part`.
    #[must_use]
    pub fn get(&self, part: BodyPart) -> &PartPose {
        &self.parts[part.index()]
    }

    /// Mutable transforms for `part`.
    pub fn get_mut(&mut self, part: BodyPart) -> &mut PartPose {
        &mut self.parts[part.index()]
    }

    /// Replaces the transforms for `part`.
    pub fn set(&mut self, part: BodyPart, pose: PartPose) {
        self.parts[part.index()] = pose;
    }

    /// Sets only the animated transform of `part`.
    pub fn set_current(&mut self, part: BodyPart, current: Transform) {
        self.parts[part.index()].current = current;
    }

    /// Checks every transform for NaN or infinite values.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::NonFinitePose`] naming the first bad part.
    pub fn validate(&self) -> RetargetResult<()> {
        for part in BodyPart::all() {
            let pose = self.get(part);
            for (kind, transform) in [
                ("current", &pose.current),
                ("input rest", &pose.input_rest),
                ("target rest", &pose.target_rest),
            ] {
                if !is_finite(transform) {
                    return Err(RetargetError::NonFinitePose { part, kind });
                }
            }
        }
        Ok(())
    }
}

fn is_finite(transform: &Transform) -> bool {
    transform.translation.iter().all(|v| v.is_finite())
        && transform.rotation.coords.iter().all(|v| v.is_finite())
        && transform.scale.is_finite()
}
