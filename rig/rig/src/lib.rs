//! Character rig runtime solvers.
//!
//! This umbrella crate re-exports the rig-* crates: pose-space interpolation
//! with radial basis functions, analytic two-bone IK, and humanoid skeleton
//! retargeting built on both.
//!
//! # Quick Start
//!
//! ```
//! use rig::prelude::*;
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! // Drive an elbow twist offset from the shoulder pose
//! let raised = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.2);
//! let mut network = RbfNetwork::new(RbfConfig::default()).unwrap();
//! let rest = UnitQuaternion::identity();
//! network.add_sample(Sample::new(vec![], vec![rest]).with_outputs(vec![0.0]));
//! network.add_sample(Sample::new(vec![], vec![raised]).with_outputs(vec![0.5]));
//!
//! let twist = network.evaluate(&[], &[raised]).unwrap().values[0];
//! assert!((twist - 0.5).abs() < 1e-6);
//!
//! // Feed it to the retargeter
//! let params = RetargetParams::default().with_limb_twist(Limb::LeftArm, twist);
//! let mut retargeter = Retargeter::new(params).unwrap();
//! let output = retargeter.retarget(&PoseSnapshot::new()).unwrap();
//! let _hand = output.translation(BodyPart::Hand(Side::Left));
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `Transform`, swing/twist decomposition, rotation distance
//! - [`rbf`] - RBF kernels, regression and the pose interpolation network
//! - [`ik`] - Two-bone IK and soft IK
//! - [`retarget`] - Body part topology, root motion and the retarget pipeline
//!
//! # Feature Flags
//!
//! - `serde` - Serialize configuration and parameter types

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Transforms, swing/twist decomposition and rotation distance.
pub use rig_types as types;

/// Radial basis function pose interpolation.
pub use rig_rbf as rbf;

/// Two-bone inverse kinematics.
pub use rig_ik as ik;

/// Humanoid skeleton retargeting.
pub use rig_retarget as retarget;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for rig evaluation.
///
/// # Usage
///
/// ```
/// use rig::prelude::*;
/// ```
pub mod prelude {
    // Foundation
    pub use rig_types::{SwingTwistDriver, Transform, TwistAxis};

    // Interpolation
    pub use rig_rbf::{
        OutputMode, RbfConfig, RbfError, RbfKernel, RbfNetwork, RbfOutput, RotationDistance,
        Sample,
    };

    // IK
    pub use rig_ik::{IkParams, SoftIk, TwoBoneChain, solve_two_bone};

    // Retargeting
    pub use rig_retarget::{
        BodyPart, Limb, LimbParams, PartPose, PoseSnapshot, RetargetError, RetargetParams,
        Retargeter, Side,
    };
}
