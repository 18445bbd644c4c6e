//! Training samples for the RBF network.

use nalgebra::UnitQuaternion;

/// Which part of a rotation feature the solver compares.
///
/// Samples are grouped by this mode and each group is solved on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationDistance {
    /// Compare only the swing component.
    Swing,
    /// Compare only the twist component.
    Twist,
    /// Compare both.
    #[default]
    SwingTwist,
}

impl RotationDistance {
    /// All modes, in bucket order.
    pub const ALL: [Self; 3] = [Self::Swing, Self::Twist, Self::SwingTwist];

    /// Bucket index of this mode.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Swing => 0,
            Self::Twist => 1,
            Self::SwingTwist => 2,
        }
    }

    /// Zeroes the component this mode ignores.
    #[must_use]
    pub const fn mask(self, swing: f64, twist: f64) -> (f64, f64) {
        match self {
            Self::Swing => (swing, 0.0),
            Self::Twist => (0.0, twist),
            Self::SwingTwist => (swing, twist),
        }
    }
}

/// A single training pose: input features paired with the outputs wanted there.
///
/// # Examples
///
/// ```
/// use rig_rbf::{RotationDistance, Sample};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let bent = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.2);
/// let sample = Sample::new(vec![], vec![bent])
///     .with_outputs(vec![1.0])
///     .with_distance(RotationDistance::Swing);
/// assert_eq!(sample.rotations.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Scalar input features.
    pub values: Vec<f64>,
    /// Rotation input features.
    pub rotations: Vec<UnitQuaternion<f64>>,
    /// Scalar outputs at this pose.
    pub outputs: Vec<f64>,
    /// Rotation outputs at this pose.
    pub output_rotations: Vec<UnitQuaternion<f64>>,
    /// Rotation comparison mode; selects the solver bucket.
    pub distance: RotationDistance,
    /// Overrides the automatic per-sample rotation radius.
    pub radius: Option<f64>,
    /// Marks the rest pose used as the base in relative output mode.
    pub is_neutral: bool,
}

impl Sample {
    /// Creates a sample with the given input features and no outputs.
    #[must_use]
    pub const fn new(values: Vec<f64>, rotations: Vec<UnitQuaternion<f64>>) -> Self {
        Self {
            values,
            rotations,
            outputs: Vec::new(),
            output_rotations: Vec::new(),
            distance: RotationDistance::SwingTwist,
            radius: None,
            is_neutral: false,
        }
    }

    /// Creates a sample driven by scalar features only.
    #[must_use]
    pub const fn scalar(values: Vec<f64>) -> Self {
        Self::new(values, Vec::new())
    }

    /// Sets the scalar outputs.
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<f64>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Sets the rotation outputs.
    #[must_use]
    pub fn with_output_rotations(mut self, rotations: Vec<UnitQuaternion<f64>>) -> Self {
        self.output_rotations = rotations;
        self
    }

    /// Sets the rotation comparison mode.
    #[must_use]
    pub fn with_distance(mut self, distance: RotationDistance) -> Self {
        self.distance = distance;
        self
    }

    /// Overrides the per-sample rotation radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Marks this sample as the neutral pose.
    #[must_use]
    pub fn neutral(mut self) -> Self {
        self.is_neutral = true;
        self
    }
}
