//! Humanoid skeleton retargeting.
//!
//! Drives a target skeleton from an animated input skeleton with different
//! proportions. Each evaluation reads a [`PoseSnapshot`] (current, input rest
//! and target rest world transforms per [`BodyPart`]) and produces world
//! transforms for every target part.
//!
//! # Pipeline
//!
//! 1. **Root motion**: weighted ground heading and position of the input,
//!    smoothed against the previous evaluation and scaled by stride
//! 2. **Hips**: input hips relative to root motion, scaled by hip height
//! 3. **Spine, head, clavicles**: parent position plus the input offset
//!    scaled by the rest bone length ratio
//! 4. **Limbs**: two-bone IK towards a target blended between root-relative
//!    and world space, with pole, twist and soft IK controls
//! 5. **Fingers**: rest offsets under the solved hand
//!
//! Rotations everywhere are the input's world-space rotation delta from rest
//! applied to the target rest rotation.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use rig_retarget::{BodyPart, PartPose, PoseSnapshot, RetargetParams, Retargeter};
//! use rig_types::Transform;
//!
//! let hips = Transform::from_translation(Vector3::new(0.0, 1.0, 0.0));
//! let small_hips = Transform::from_translation(Vector3::new(0.0, 0.5, 0.0));
//!
//! let mut pose = PoseSnapshot::new();
//! pose.set(BodyPart::Hips, PartPose::at_rest(hips, small_hips));
//!
//! let mut retargeter = Retargeter::new(RetargetParams::default()).unwrap();
//! let output = retargeter.retarget(&pose).unwrap();
//! assert!((output.translation(BodyPart::Hips).y - 0.5).abs() < 1e-12);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
// Body part indices are tiny; usize -> f64 is exact
#![allow(clippy::cast_precision_loss)]

mod body_part;
mod error;
mod output;
mod params;
mod pose;
mod retarget;
mod root_motion;

pub use body_part::{BodyPart, Finger, FingerJoint, Limb, Side};
pub use error::{RetargetError, RetargetResult};
pub use output::RetargetOutput;
pub use params::{LimbParams, RetargetParams};
pub use pose::{PartPose, PoseSnapshot};
pub use retarget::Retargeter;
pub use root_motion::RootMotion;
