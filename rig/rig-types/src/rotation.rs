//! Swing/twist decomposition and rotation distance.
//!
//! A rotation `q` splits into a *twist* about an axis and the remaining
//! *swing*, with `q = twist * swing`. The twist keeps only the component of
//! the quaternion's imaginary part along the axis.

use std::f64::consts::PI;

use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};

/// Below this norm the projected twist quaternion is treated as degenerate.
const TWIST_EPSILON: f64 = 1e-9;

/// Axis about which twist is measured.
///
/// # Examples
///
/// ```
/// use rig_types::TwistAxis;
/// use nalgebra::Vector3;
///
/// assert_eq!(TwistAxis::Y.unit().into_inner(), Vector3::y());
///
/// // Custom axes are normalized
/// let custom = TwistAxis::Custom(Vector3::new(0.0, 0.0, 3.0));
/// assert!((custom.unit().into_inner() - Vector3::z()).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwistAxis {
    /// Local X, the usual bone-aim axis.
    #[default]
    X,
    /// Local Y.
    Y,
    /// Local Z.
    Z,
    /// Arbitrary direction. A zero vector falls back to X.
    Custom(Vector3<f64>),
}

impl TwistAxis {
    /// Returns the axis as a unit vector.
    #[must_use]
    pub fn unit(&self) -> Unit<Vector3<f64>> {
        match self {
            Self::X => Vector3::x_axis(),
            Self::Y => Vector3::y_axis(),
            Self::Z => Vector3::z_axis(),
            Self::Custom(v) => Unit::try_new(*v, TWIST_EPSILON).unwrap_or_else(Vector3::x_axis),
        }
    }
}

/// Result of [`decompose_swing_twist`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingTwist {
    /// Rotation remaining after the twist is removed.
    pub swing: UnitQuaternion<f64>,
    /// Rotation about the decomposition axis.
    pub twist: UnitQuaternion<f64>,
}

impl SwingTwist {
    /// Recomposes the original rotation (`twist * swing`).
    #[must_use]
    pub fn recompose(&self) -> UnitQuaternion<f64> {
        self.twist * self.swing
    }
}

/// Splits `q` into swing and twist about `axis`.
///
/// When the twist projection vanishes (a half turn about an axis
/// perpendicular to `axis`) the twist is the identity and the swing is `q`.
#[must_use]
pub fn decompose_swing_twist(q: &UnitQuaternion<f64>, axis: &Unit<Vector3<f64>>) -> SwingTwist {
    let axis = axis.into_inner();
    let along = axis * q.imag().dot(&axis);
    let projected = Quaternion::new(q.scalar(), along.x, along.y, along.z);

    let twist = if projected.norm() < TWIST_EPSILON {
        UnitQuaternion::identity()
    } else {
        UnitQuaternion::new_normalize(projected)
    };

    SwingTwist {
        swing: twist.inverse() * q,
        twist,
    }
}

/// Angular distance between two rotations, normalized to `[0, 1]`.
///
/// Zero when the rotations are equal (including `q` and `-q`), one for a half
/// turn apart.
///
/// # Examples
///
/// ```
/// use rig_types::quaternion_distance;
/// use nalgebra::{UnitQuaternion, Vector3};
/// use std::f64::consts::PI;
///
/// let a = UnitQuaternion::identity();
/// let b = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI);
/// assert!((quaternion_distance(&a, &b) - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn quaternion_distance(q1: &UnitQuaternion<f64>, q2: &UnitQuaternion<f64>) -> f64 {
    let dot = q1.coords.dot(&q2.coords).clamp(-1.0, 1.0);
    (2.0 * dot * dot - 1.0).clamp(-1.0, 1.0).acos() / PI
}

/// Swing and twist distances between two rotations about `axis`.
///
/// Returns `(swing_distance, twist_distance)`, each in `[0, 1]`.
#[must_use]
pub fn swing_twist_distance(
    q1: &UnitQuaternion<f64>,
    q2: &UnitQuaternion<f64>,
    axis: &Unit<Vector3<f64>>,
) -> (f64, f64) {
    let a = decompose_swing_twist(q1, axis);
    let b = decompose_swing_twist(q2, axis);
    (
        quaternion_distance(&a.swing, &b.swing),
        quaternion_distance(&a.twist, &b.twist),
    )
}

/// XYZ Euler angles in radians; X is applied first.
#[must_use]
pub fn euler_xyz(q: &UnitQuaternion<f64>) -> Vector3<f64> {
    let (x, y, z) = q.euler_angles();
    Vector3::new(x, y, z)
}

/// Inverse of [`euler_xyz`].
#[must_use]
pub fn from_euler_xyz(angles: &Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(angles.x, angles.y, angles.z)
}
