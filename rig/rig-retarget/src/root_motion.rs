//! Ground-plane root motion extracted from the input skeleton.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use rig_types::Transform;
use tracing::trace;

use crate::{BodyPart, PoseSnapshot, RetargetParams};

const GROUND_EPSILON: f64 = 1e-9;

/// Root motion of the input skeleton and its scaled counterpart for the
/// target skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMotion {
    /// Heading and ground position of the input skeleton.
    pub input: Transform,
    /// Heading and ground position scaled for the target skeleton.
    pub scaled: Transform,
    /// Target rest hip height over input rest hip height.
    pub hip_scale: f64,
    /// Unsmoothed heading of this evaluation, on the ground plane.
    pub raw_forward: Vector3<f64>,
}

impl RootMotion {
    /// Extracts root motion from `pose`.
    ///
    /// The heading is the weighted average of the weighted parts' forward
    /// directions on the ground plane, averaged with `previous_forward` when
    /// given. Position is the weighted average of the parts' positions
    /// dropped onto the ground.
    #[must_use]
    pub fn extract(
        pose: &PoseSnapshot,
        params: &RetargetParams,
        previous_forward: Option<Vector3<f64>>,
    ) -> Self {
        let rest_forward = ground(&params.forward_axis).unwrap_or_else(Vector3::z);

        let mut forward = Vector3::zeros();
        let mut position = Vector3::zeros();
        let mut total = 0.0;
        for &(part, weight) in &params.root_motion_weights {
            let part_pose = pose.get(part);
            if let Some(direction) = ground(&(part_pose.delta_rotation() * params.forward_axis)) {
                forward += direction * weight;
            }
            position += part_pose.current.translation * weight;
            total += weight;
        }

        let raw_forward = ground(&forward)
            .or(previous_forward)
            .unwrap_or(rest_forward);
        let smoothed = previous_forward
            .and_then(|previous| ground(&(raw_forward + previous)))
            .unwrap_or(raw_forward);

        if total > 0.0 {
            position /= total;
        }
        position.y = 0.0;

        let heading = yaw_between(&rest_forward, &smoothed);
        let input = Transform::new(heading, position);

        let hip_scale = hip_scale(pose);
        let horizontal = params.stride_scale * params.root_motion_scale;
        let scaled = Transform::new(
            heading,
            Vector3::new(
                position.x * horizontal,
                position.y * hip_scale,
                position.z * horizontal,
            ),
        );

        trace!(
            forward = ?smoothed,
            position = ?position,
            hip_scale,
            "root motion"
        );

        Self {
            input,
            scaled,
            hip_scale,
            raw_forward,
        }
    }

    /// Maps an input world position into the target's scaled root motion
    /// space: expressed relative to the input root motion, scaled by the hip
    /// ratio, and placed under the scaled root motion.
    #[must_use]
    pub fn map_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let local = self.input.inverse().transform_point(&Point3::from(*point));
        self.scaled
            .transform_point(&Point3::from(local.coords * self.hip_scale))
            .coords
    }
}

/// Target rest hip height over input rest hip height, 1 when either is
/// degenerate.
pub(crate) fn hip_scale(pose: &PoseSnapshot) -> f64 {
    let hips = pose.get(BodyPart::Hips);
    ratio(hips.target_rest.translation.y, hips.input_rest.translation.y)
}

/// `numerator / denominator`, or 1 when the quotient is not a usable scale.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() <= GROUND_EPSILON {
        return 1.0;
    }
    let value = numerator / denominator;
    if value.is_finite() { value } else { 1.0 }
}

fn ground(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    Vector3::new(v.x, 0.0, v.z).try_normalize(GROUND_EPSILON)
}

/// Rotation about +Y taking ground direction `from` onto `to`.
fn yaw_between(from: &Vector3<f64>, to: &Vector3<f64>) -> UnitQuaternion<f64> {
    let angle = from.cross(to).y.atan2(from.dot(to));
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::PartPose;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn pose_with_hips(current: Transform, input_height: f64, target_height: f64) -> PoseSnapshot {
        let mut pose = PoseSnapshot::new();
        pose.set(
            BodyPart::Hips,
            PartPose::new(
                current,
                Transform::from_translation(Vector3::new(0.0, input_height, 0.0)),
                Transform::from_translation(Vector3::new(0.0, target_height, 0.0)),
            ),
        );
        pose
    }

    fn hips_only() -> RetargetParams {
        RetargetParams::default().with_root_motion_weights(vec![(BodyPart::Hips, 1.0)])
    }

    #[test]
    fn follows_hip_heading_and_ground_position() {
        let turn = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let pose = pose_with_hips(Transform::new(turn, Vector3::new(2.0, 1.0, 3.0)), 1.0, 1.0);
        let motion = RootMotion::extract(&pose, &hips_only(), None);

        assert_relative_eq!(motion.input.translation, Vector3::new(2.0, 0.0, 3.0), epsilon = 1e-12);
        assert!(motion.input.rotation.angle_to(&turn) < 1e-9);
        assert_relative_eq!(motion.raw_forward, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn pitch_does_not_change_heading() {
        let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.4);
        let pose = pose_with_hips(Transform::from_rotation(pitch), 1.0, 1.0);
        let motion = RootMotion::extract(&pose, &hips_only(), None);
        assert!(motion.input.rotation.angle() < 1e-9);
    }

    #[test]
    fn smooths_with_previous_forward() {
        let pose = pose_with_hips(Transform::identity(), 1.0, 1.0);
        let motion = RootMotion::extract(&pose, &hips_only(), Some(Vector3::x()));

        // Halfway between +Z and +X
        assert_relative_eq!(motion.input.rotation.angle(), FRAC_PI_2 / 2.0, epsilon = 1e-9);
        assert_relative_eq!(motion.raw_forward, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn opposite_previous_forward_keeps_current() {
        let pose = pose_with_hips(Transform::identity(), 1.0, 1.0);
        let motion = RootMotion::extract(&pose, &hips_only(), Some(-Vector3::z()));
        assert!(motion.input.rotation.angle() < 1e-9);
    }

    #[test]
    fn scales_stride_and_height() {
        let pose = pose_with_hips(
            Transform::from_translation(Vector3::new(1.0, 1.0, 2.0)),
            1.0,
            0.5,
        );
        let params = hips_only().with_stride_scale(2.0).with_root_motion_scale(1.5);
        let motion = RootMotion::extract(&pose, &params, None);

        assert_eq!(motion.hip_scale, 0.5);
        assert_relative_eq!(
            motion.scaled.translation,
            Vector3::new(3.0, 0.0, 6.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn map_point_scales_relative_to_root() {
        let pose = pose_with_hips(
            Transform::from_translation(Vector3::new(1.0, 1.0, 0.0)),
            1.0,
            0.5,
        );
        let params = hips_only().with_stride_scale(2.0);
        let motion = RootMotion::extract(&pose, &params, None);

        // Input root at (1, 0, 0), scaled root at (2, 0, 0)
        let mapped = motion.map_point(&Vector3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(mapped, Vector3::new(2.0, 0.5, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_hip_height_gives_unit_scale() {
        let pose = pose_with_hips(Transform::identity(), 0.0, 1.0);
        assert_eq!(hip_scale(&pose), 1.0);
    }
}
