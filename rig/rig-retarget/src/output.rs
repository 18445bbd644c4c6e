//! Retarget results.

use nalgebra::Vector3;
use rig_types::Transform;

use crate::{BodyPart, RootMotion};

/// World transforms of the target skeleton for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetargetOutput {
    pub(crate) parts: [Transform; BodyPart::COUNT],
    /// Root motion used for this evaluation.
    pub root_motion: RootMotion,
}

impl RetargetOutput {
    pub(crate) fn new(root_motion: RootMotion) -> Self {
        Self {
            parts: [Transform::identity(); BodyPart::COUNT],
            root_motion,
        }
    }

    /// World transform of `part`.
    #[must_use]
    pub fn transform(&self, part: BodyPart) -> &Transform {
        &self.parts[part.index()]
    }

    /// World translation of `part`.
    #[must_use]
    pub fn translation(&self, part: BodyPart) -> Vector3<f64> {
        self.parts[part.index()].translation
    }

    /// World rotation of `part` as XYZ Euler angles in radians.
    #[must_use]
    pub fn euler_xyz(&self, part: BodyPart) -> Vector3<f64> {
        self.parts[part.index()].euler_xyz()
    }

    /// Every part with its world transform, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, &Transform)> {
        BodyPart::all().map(move |part| (part, &self.parts[part.index()]))
    }

    pub(crate) fn set(&mut self, part: BodyPart, transform: Transform) {
        self.parts[part.index()] = transform;
    }
}
