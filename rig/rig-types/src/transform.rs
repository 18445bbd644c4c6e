//! Joint transform type.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::rotation::euler_xyz;

/// A joint transform consisting of rotation, translation, and uniform scale.
///
/// The transformation is applied in the order: scale -> rotate -> translate.
///
/// # Example
///
/// ```
/// use rig_types::Transform;
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
/// use std::f64::consts::FRAC_PI_2;
///
/// let parent = Transform::new(
///     UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
///     Vector3::new(0.0, 1.0, 0.0),
/// );
/// let local = Transform::from_translation(Vector3::new(1.0, 0.0, 0.0));
///
/// // Child world transform
/// let world = parent.compose(&local);
/// let p = world.transform_point(&Point3::origin());
/// assert!((p - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Rotation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
    /// Translation vector.
    pub translation: Vector3<f64>,
    /// Uniform scale factor (default 1.0).
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform with the given rotation and translation and unit scale.
    #[must_use]
    pub const fn new(rotation: UnitQuaternion<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
            scale: 1.0,
        }
    }

    /// Creates a transform with rotation, translation, and scale.
    #[must_use]
    pub const fn with_scale(
        rotation: UnitQuaternion<f64>,
        translation: Vector3<f64>,
        scale: f64,
    ) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity(), Vector3::zeros())
    }

    /// Creates a transform with only translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self::new(UnitQuaternion::identity(), translation)
    }

    /// Creates a transform with only rotation.
    #[must_use]
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self::new(rotation, Vector3::zeros())
    }

    /// Position of the transform's origin.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        Point3::from(self.translation)
    }

    /// Transforms a 3D point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * (point.coords * self.scale) + self.translation)
    }

    /// Transforms a direction. Directions are scaled and rotated but not translated.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * (vector * self.scale)
    }

    /// Composes this transform with another (`self * other`).
    ///
    /// The result applies `other` first, then `self`. With `self` a parent's
    /// world transform and `other` a child's local transform, the result is
    /// the child's world transform.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * (other.translation * self.scale),
            scale: self.scale * other.scale,
        }
    }

    /// Computes the inverse of this transform.
    ///
    /// A zero scale is treated as unit scale.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_scale = if self.scale.abs() > f64::EPSILON {
            1.0 / self.scale
        } else {
            1.0
        };
        let inv_rotation = self.rotation.inverse();
        Self {
            rotation: inv_rotation,
            translation: inv_rotation * (-self.translation * inv_scale),
            scale: inv_scale,
        }
    }

    /// Expresses this transform in the space of `parent` (`parent⁻¹ * self`).
    #[must_use]
    pub fn relative_to(&self, parent: &Self) -> Self {
        parent.inverse().compose(self)
    }

    /// Returns a copy with the translation replaced.
    #[must_use]
    pub fn with_translation(mut self, translation: Vector3<f64>) -> Self {
        self.translation = translation;
        self
    }

    /// Returns a copy with the rotation replaced.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation as XYZ Euler angles in radians.
    #[must_use]
    pub fn euler_xyz(&self) -> Vector3<f64> {
        euler_xyz(&self.rotation)
    }
}
