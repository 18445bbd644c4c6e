//! The retarget pipeline.

use nalgebra::{UnitQuaternion, Vector3};
use rig_ik::{TwoBoneChain, solve_two_bone};
use rig_types::Transform;
use tracing::{debug, trace};

use crate::root_motion::ratio;
use crate::{
    BodyPart, Finger, FingerJoint, Limb, PartPose, PoseSnapshot, RetargetOutput, RetargetParams,
    RetargetResult, RootMotion, Side,
};

/// Drives a target skeleton from an input skeleton.
///
/// Evaluation is strictly top-down: root motion, hips, spine, head and
/// clavicles, IK limbs, then fingers. The only state kept between
/// evaluations is the previous root motion heading, used for smoothing.
///
/// # Examples
///
/// ```
/// use rig_retarget::{BodyPart, PoseSnapshot, RetargetParams, Retargeter};
///
/// let mut retargeter = Retargeter::new(RetargetParams::default()).unwrap();
/// let output = retargeter.retarget(&PoseSnapshot::new()).unwrap();
/// assert!(output.translation(BodyPart::Head).iter().all(|v| v.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct Retargeter {
    params: RetargetParams,
    previous_forward: Option<Vector3<f64>>,
}

impl Retargeter {
    /// Creates a retargeter.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails validation.
    pub fn new(params: RetargetParams) -> RetargetResult<Self> {
        params.validate()?;
        debug!(
            stride_scale = params.stride_scale,
            root_motion_scale = params.root_motion_scale,
            "retargeter created"
        );
        Ok(Self {
            params,
            previous_forward: None,
        })
    }

    /// Current parameters.
    pub const fn params(&self) -> &RetargetParams {
        &self.params
    }

    /// Replaces the parameters. Smoothing state is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails validation; the old parameters stay
    /// in effect.
    pub fn set_params(&mut self, params: RetargetParams) -> RetargetResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Forgets the previous heading, so the next evaluation is unsmoothed.
    pub fn reset(&mut self) {
        self.previous_forward = None;
    }

    /// Retargets one pose.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::NonFinitePose`](crate::RetargetError::NonFinitePose)
    /// if any input transform contains NaN or infinite values. The smoothing
    /// state is left untouched in that case.
    pub fn retarget(&mut self, pose: &PoseSnapshot) -> RetargetResult<RetargetOutput> {
        pose.validate()?;

        let root_motion = RootMotion::extract(pose, &self.params, self.previous_forward);
        self.previous_forward = Some(root_motion.raw_forward);

        let mut output = RetargetOutput::new(root_motion);
        output.set(BodyPart::Root, root_motion.scaled);
        output.set(BodyPart::Hips, hips(pose, &root_motion));

        for part in [
            BodyPart::Spine,
            BodyPart::Head,
            BodyPart::Clavicle(Side::Left),
            BodyPart::Clavicle(Side::Right),
        ] {
            let placed = relative_scale(pose, &output, part);
            output.set(part, placed);
        }

        for limb in Limb::ALL {
            self.solve_limb(pose, &mut output, limb);
        }

        for side in Side::BOTH {
            for finger in Finger::ALL {
                for joint in FingerJoint::ALL {
                    let part = BodyPart::Finger(side, finger, joint);
                    let placed = orient(pose, &output, part);
                    output.set(part, placed);
                }
            }
        }

        Ok(output)
    }

    fn solve_limb(&self, pose: &PoseSnapshot, output: &mut RetargetOutput, limb: Limb) {
        let controls = self.params.limb(limb);
        let root_motion = output.root_motion;
        let [root, mid, effector] = limb.parts();
        let parent = limb.parent();
        let (pp, rp, mp, ep) = (
            pose.get(parent),
            pose.get(root),
            pose.get(mid),
            pose.get(effector),
        );

        // Target rest chain hung under the solved parent.
        let root_fk = output
            .transform(parent)
            .compose(&rp.target_rest.relative_to(&pp.target_rest));
        let mid_fk = root_fk.compose(&mp.target_rest.relative_to(&rp.target_rest));
        let effector_fk = mid_fk.compose(&ep.target_rest.relative_to(&mp.target_rest));

        let target_length = chain_length(&rp.target_rest, &mp.target_rest, &ep.target_rest);
        let input_length = chain_length(&rp.input_rest, &mp.input_rest, &ep.input_rest);
        let length_ratio = ratio(target_length, input_length);

        let relative = root_fk.translation
            + (ep.current.translation - rp.current.translation) * length_ratio;

        let height_delta = ep.target_rest.translation.y
            - ep.input_rest.translation.y * root_motion.hip_scale;
        let world = root_motion.map_point(&ep.current.translation)
            + ep.delta_rotation() * Vector3::new(0.0, height_delta, 0.0);

        let mut target = relative.lerp(&world, controls.space_blend);
        let mut stretch = 1.0;
        if controls.soft_ik.is_active() {
            let soft = controls.soft_ik.apply(&root_fk.translation, &target, target_length);
            target = soft.target;
            stretch = soft.scale;
        }

        let bend = bend_direction(rp, mp, ep)
            .unwrap_or_else(|| self.params.forward_axis.normalize());
        let pole = root_fk.translation + rp.delta_rotation() * bend * target_length;

        let chain =
            TwoBoneChain::new(root_fk, mid_fk, effector_fk, target, pole).with_stretch(stretch);
        let solved = solve_two_bone(&chain, &self.params.ik.with_twist(controls.twist));
        trace!(?limb, reached = solved.reached, stretch, "limb solved");

        output.set(root, solved.root);
        output.set(mid, solved.mid);
        output.set(
            effector,
            solved.effector.with_rotation(retargeted_rotation(ep)),
        );
    }
}

/// Input rotation delta carried onto the target rest rotation.
fn retargeted_rotation(pose: &PartPose) -> UnitQuaternion<f64> {
    pose.delta_rotation() * pose.target_rest.rotation
}

/// Hips follow the input hips relative to root motion, scaled by the hip
/// height ratio and placed under the scaled root motion.
fn hips(pose: &PoseSnapshot, root_motion: &RootMotion) -> Transform {
    let hips = pose.get(BodyPart::Hips);
    Transform::new(
        retargeted_rotation(hips),
        root_motion.map_point(&hips.current.translation),
    )
}

/// Parent output position plus the input parent-to-child offset, scaled by
/// the rest bone length ratio.
fn relative_scale(pose: &PoseSnapshot, output: &RetargetOutput, part: BodyPart) -> Transform {
    let child = pose.get(part);
    let Some(parent_part) = part.parent() else {
        return Transform::new(retargeted_rotation(child), child.current.translation);
    };
    let parent = pose.get(parent_part);

    let target_length = (child.target_rest.translation - parent.target_rest.translation).norm();
    let input_length = (child.input_rest.translation - parent.input_rest.translation).norm();
    let offset = (child.current.translation - parent.current.translation)
        * ratio(target_length, input_length);

    Transform::new(
        retargeted_rotation(child),
        output.translation(parent_part) + offset,
    )
}

/// Position from the parent output through the target rest offset, rotation
/// retargeted by delta.
fn orient(pose: &PoseSnapshot, output: &RetargetOutput, part: BodyPart) -> Transform {
    let child = pose.get(part);
    let Some(parent_part) = part.parent() else {
        return Transform::new(retargeted_rotation(child), child.current.translation);
    };
    let local = child.target_rest.relative_to(&pose.get(parent_part).target_rest);
    output
        .transform(parent_part)
        .compose(&local)
        .with_rotation(retargeted_rotation(child))
}

fn chain_length(root: &Transform, mid: &Transform, effector: &Transform) -> f64 {
    (mid.translation - root.translation).norm() + (effector.translation - mid.translation).norm()
}

/// Direction from the target rest root-to-effector line towards the mid
/// joint, or `None` for a straight chain.
fn bend_direction(root: &PartPose, mid: &PartPose, effector: &PartPose) -> Option<Vector3<f64>> {
    let a = root.target_rest.translation;
    let b = mid.target_rest.translation;
    let c = effector.target_rest.translation;
    let ac = c - a;
    let along = ac.norm_squared();
    if along <= f64::EPSILON {
        return None;
    }
    let off_line = (b - a) - ac * ((b - a).dot(&ac) / along);
    off_line.try_normalize(1e-9)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{LimbParams, RetargetError};
    use approx::assert_relative_eq;
    use rig_ik::SoftIk;
    use std::f64::consts::FRAC_PI_2;

    fn mirror(side: Side, v: Vector3<f64>) -> Vector3<f64> {
        match side {
            Side::Left => v,
            Side::Right => Vector3::new(-v.x, v.y, v.z),
        }
    }

    /// T-pose humanoid, 1.7 units tall at unit scale.
    fn rest_position(part: BodyPart) -> Vector3<f64> {
        match part {
            BodyPart::Root => Vector3::zeros(),
            BodyPart::Hips => Vector3::new(0.0, 1.0, 0.0),
            BodyPart::Spine => Vector3::new(0.0, 1.4, 0.0),
            BodyPart::Head => Vector3::new(0.0, 1.7, 0.0),
            BodyPart::Clavicle(s) => mirror(s, Vector3::new(0.05, 1.5, 0.0)),
            BodyPart::Shoulder(s) => mirror(s, Vector3::new(0.2, 1.5, 0.0)),
            BodyPart::Elbow(s) => mirror(s, Vector3::new(0.5, 1.5, -0.05)),
            BodyPart::Hand(s) => mirror(s, Vector3::new(0.8, 1.5, 0.0)),
            BodyPart::Finger(s, finger, joint) => {
                let f = Finger::ALL.iter().position(|x| *x == finger).unwrap() as f64;
                let j = FingerJoint::ALL.iter().position(|x| *x == joint).unwrap() as f64;
                mirror(s, Vector3::new(0.85 + 0.03 * j, 1.5, -0.04 + 0.02 * f))
            }
            BodyPart::UpLeg(s) => mirror(s, Vector3::new(0.1, 1.0, 0.0)),
            BodyPart::LoLeg(s) => mirror(s, Vector3::new(0.1, 0.55, 0.05)),
            BodyPart::Foot(s) => mirror(s, Vector3::new(0.1, 0.1, 0.0)),
        }
    }

    /// Input at unit scale, target at `target_scale`, both at rest.
    fn rest_pose(target_scale: f64) -> PoseSnapshot {
        PoseSnapshot::from_fn(|part| {
            PartPose::at_rest(
                Transform::from_translation(rest_position(part)),
                Transform::from_translation(rest_position(part) * target_scale),
            )
        })
    }

    fn hips_only() -> RetargetParams {
        RetargetParams::default().with_root_motion_weights(vec![(BodyPart::Hips, 1.0)])
    }

    #[test]
    fn rest_pose_maps_to_target_rest() {
        let pose = rest_pose(0.5);
        let mut retargeter = Retargeter::new(RetargetParams::default()).unwrap();
        let output = retargeter.retarget(&pose).unwrap();

        for part in BodyPart::all() {
            assert_relative_eq!(
                output.translation(part),
                pose.get(part).target_rest.translation,
                epsilon = 1e-6
            );
            assert!(output.transform(part).rotation.angle() < 1e-6, "{part:?}");
        }
    }

    #[test]
    fn walking_forward_scales_stride() {
        let mut pose = rest_pose(0.5);
        for part in BodyPart::all() {
            let moved = pose.get(part).current.translation + Vector3::new(0.0, 0.0, 1.0);
            pose.set_current(part, Transform::from_translation(moved));
        }
        let params = RetargetParams::default().with_stride_scale(2.0);
        let output = Retargeter::new(params).unwrap().retarget(&pose).unwrap();

        assert_relative_eq!(
            output.translation(BodyPart::Root),
            Vector3::new(0.0, 0.0, 2.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            output.translation(BodyPart::Hips),
            Vector3::new(0.0, 0.5, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn planted_feet_stay_planted_in_crouch() {
        let mut pose = rest_pose(0.5);
        let lowered: Vec<BodyPart> = BodyPart::all()
            .filter(|p| !matches!(p, BodyPart::Root | BodyPart::LoLeg(_) | BodyPart::Foot(_)))
            .collect();
        for part in lowered {
            let moved = pose.get(part).current.translation - Vector3::new(0.0, 0.1, 0.0);
            pose.set_current(part, Transform::from_translation(moved));
        }
        let output = Retargeter::new(RetargetParams::default())
            .unwrap()
            .retarget(&pose)
            .unwrap();

        for side in Side::BOTH {
            assert_relative_eq!(
                output.translation(BodyPart::Foot(side)),
                rest_position(BodyPart::Foot(side)) * 0.5,
                epsilon = 1e-6
            );
            // Knee bends further forward than at rest
            assert!(output.translation(BodyPart::LoLeg(side)).z > 0.025);
        }
        assert_relative_eq!(output.translation(BodyPart::Hips).y, 0.45, epsilon = 1e-12);
    }

    #[test]
    fn limb_twist_moves_elbow_not_hand() {
        let pose = rest_pose(1.0);
        let base = Retargeter::new(RetargetParams::default())
            .unwrap()
            .retarget(&pose)
            .unwrap();
        let params = RetargetParams::default().with_limb_twist(Limb::LeftArm, FRAC_PI_2);
        let twisted = Retargeter::new(params)
            .unwrap()
            .retarget(&pose)
            .unwrap();

        let hand = BodyPart::Hand(Side::Left);
        let elbow = BodyPart::Elbow(Side::Left);
        assert_relative_eq!(twisted.translation(hand), base.translation(hand), epsilon = 1e-6);
        assert!((twisted.translation(elbow) - base.translation(elbow)).norm() > 0.01);
        // Right arm untouched
        let right = BodyPart::Elbow(Side::Right);
        assert_relative_eq!(twisted.translation(right), base.translation(right), epsilon = 1e-9);
    }

    #[test]
    fn root_relative_arm_follows_input_hand() {
        let mut pose = rest_pose(1.0);
        let hand = BodyPart::Hand(Side::Left);
        let reached = rest_position(hand) + Vector3::new(-0.1, 0.2, 0.1);
        pose.set_current(hand, Transform::from_translation(reached));

        let output = Retargeter::new(RetargetParams::default())
            .unwrap()
            .retarget(&pose)
            .unwrap();
        assert_relative_eq!(output.translation(hand), reached, epsilon = 1e-6);
    }

    #[test]
    fn effector_rotation_is_retargeted_delta() {
        let mut pose = rest_pose(1.0);
        let foot = BodyPart::Foot(Side::Right);
        let roll = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.3);
        let current = pose.get(foot).current.with_rotation(roll);
        pose.set_current(foot, current);

        let output = Retargeter::new(RetargetParams::default())
            .unwrap()
            .retarget(&pose)
            .unwrap();
        assert!(output.transform(foot).rotation.angle_to(&roll) < 1e-9);
    }

    #[test]
    fn heading_is_smoothed_until_reset() {
        let rest = rest_pose(1.0);
        let mut turned = rest.clone();
        let turn = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let hips = turned.get(BodyPart::Hips).current.with_rotation(turn);
        turned.set_current(BodyPart::Hips, hips);

        let mut retargeter = Retargeter::new(hips_only()).unwrap();
        retargeter.retarget(&rest).unwrap();
        let smoothed = retargeter.retarget(&turned).unwrap();
        assert_relative_eq!(
            smoothed.transform(BodyPart::Root).rotation.angle(),
            FRAC_PI_2 / 2.0,
            epsilon = 1e-9
        );

        retargeter.reset();
        let fresh = retargeter.retarget(&turned).unwrap();
        assert_relative_eq!(
            fresh.transform(BodyPart::Root).rotation.angle(),
            FRAC_PI_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn soft_ik_pulls_stretched_leg_in() {
        let mut pose = rest_pose(1.0);
        // Drop the foot well out of reach
        let foot = BodyPart::Foot(Side::Left);
        pose.set_current(foot, Transform::from_translation(Vector3::new(0.1, -0.5, 0.0)));

        let soft = RetargetParams::default().with_limb(
            Limb::LeftLeg,
            LimbParams::world_space().with_soft_ik(SoftIk::new(0.2, 0.0)),
        );
        let hard_out = Retargeter::new(RetargetParams::default())
            .unwrap()
            .retarget(&pose)
            .unwrap();
        let soft_out = Retargeter::new(soft).unwrap().retarget(&pose).unwrap();

        let hip = rest_position(BodyPart::UpLeg(Side::Left));
        let hard_reach = (hard_out.translation(foot) - hip).norm();
        let soft_reach = (soft_out.translation(foot) - hip).norm();
        assert!(soft_reach < hard_reach);
    }

    #[test]
    fn full_stretch_reaches_far_target() {
        let mut pose = rest_pose(1.0);
        let foot = BodyPart::Foot(Side::Left);
        let far = Vector3::new(0.1, -0.1, 0.0);
        pose.set_current(foot, Transform::from_translation(far));

        let params = RetargetParams::default().with_limb(
            Limb::LeftLeg,
            LimbParams::world_space().with_soft_ik(SoftIk::new(0.1, 1.0)),
        );
        let output = Retargeter::new(params).unwrap().retarget(&pose).unwrap();
        assert_relative_eq!(output.translation(foot), far, epsilon = 1e-6);
    }

    #[test]
    fn rejects_non_finite_pose_without_touching_state() {
        let mut pose = rest_pose(1.0);
        pose.set_current(
            BodyPart::Spine,
            Transform::from_translation(Vector3::new(f64::NAN, 0.0, 0.0)),
        );
        let mut retargeter = Retargeter::new(RetargetParams::default()).unwrap();
        let err = retargeter.retarget(&pose).unwrap_err();
        assert!(matches!(err, RetargetError::NonFinitePose { part: BodyPart::Spine, .. }));
        assert!(retargeter.previous_forward.is_none());
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert!(Retargeter::new(RetargetParams::default().with_stride_scale(-1.0)).is_err());

        let mut retargeter = Retargeter::new(RetargetParams::default()).unwrap();
        assert!(
            retargeter
                .set_params(RetargetParams::default().with_root_motion_scale(f64::NAN))
                .is_err()
        );
        assert_eq!(retargeter.params().root_motion_scale, 1.0);
    }

    #[test]
    fn bend_direction_points_at_mid() {
        let rest = rest_pose(1.0);
        let side = Side::Left;
        let d = bend_direction(
            rest.get(BodyPart::UpLeg(side)),
            rest.get(BodyPart::LoLeg(side)),
            rest.get(BodyPart::Foot(side)),
        )
        .unwrap();
        assert_relative_eq!(d, Vector3::z(), epsilon = 1e-9);
    }
}
