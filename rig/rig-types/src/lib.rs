//! Transform and rotation primitives shared by the rig solvers.
//!
//! This crate holds the small amount of geometry every other rig crate needs:
//!
//! - [`Transform`]: rotation, translation and uniform scale with composition
//!   and inversion
//! - Swing/twist decomposition of a rotation about a [`TwistAxis`]
//! - A normalized quaternion distance in `[0, 1]`
//! - [`SwingTwistDriver`] for re-weighting the swing and twist of a joint
//! - XYZ Euler conversion for handing rotations to transform systems
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Conventions
//!
//! Rotations are column-vector quaternions: `a * b` applies `b` first.
//! World transforms compose as `parent.compose(&local)`.
//!
//! # Example
//!
//! ```
//! use rig_types::{TwistAxis, decompose_swing_twist, quaternion_distance};
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let q = UnitQuaternion::from_euler_angles(0.4, 0.3, 0.0);
//! let parts = decompose_swing_twist(&q, &TwistAxis::X.unit());
//!
//! // twist * swing recomposes the rotation
//! let recomposed = parts.recompose();
//! assert!(quaternion_distance(&recomposed, &q) < 1e-6);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
// Single-char names are standard in quaternion algebra
#![allow(clippy::many_single_char_names)]

mod driver;
mod rotation;
mod transform;

pub use driver::SwingTwistDriver;
pub use rotation::{
    SwingTwist, TwistAxis, decompose_swing_twist, euler_xyz, from_euler_xyz, quaternion_distance,
    swing_twist_distance,
};
pub use transform::Transform;
