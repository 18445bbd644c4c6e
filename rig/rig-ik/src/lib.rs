//! Analytic two-bone inverse kinematics.
//!
//! Solves shoulder-elbow-wrist and hip-knee-ankle style chains in closed form:
//! the law of cosines sets the interior angles, a rotation swings the chain
//! onto the target, and a pole position orients the bend plane.
//!
//! [`SoftIk`] pre-adjusts the target so the chain eases into full extension,
//! optionally trading the easing for bone stretch.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use rig_ik::{IkParams, SoftIk, TwoBoneChain, solve_two_bone};
//! use rig_types::Transform;
//!
//! let root = Transform::identity();
//! let mid = Transform::from_translation(Vector3::new(0.0, -1.0, 0.05));
//! let effector = Transform::from_translation(Vector3::new(0.0, -2.0, 0.0));
//!
//! let soft = SoftIk::new(0.1, 0.0).apply(&root.translation, &Vector3::new(0.0, -1.95, 0.0), 2.0);
//! let chain = TwoBoneChain::new(root, mid, effector, soft.target, Vector3::new(0.0, -1.0, 1.0))
//!     .with_stretch(soft.scale);
//!
//! let solved = solve_two_bone(&chain, &IkParams::default());
//! assert!(solved.mid.translation.z > 0.0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

mod error;
mod params;
mod soft;
mod two_bone;

pub use error::{IkError, IkResult};
pub use params::IkParams;
pub use soft::{SoftIk, SoftIkResult};
pub use two_bone::{TwoBoneChain, TwoBoneSolution, solve_two_bone};
