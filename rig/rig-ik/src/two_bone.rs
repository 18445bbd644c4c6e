//! Analytic two-bone solver.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use rig_types::Transform;
use tracing::trace;

use crate::IkParams;

const AXIS_EPSILON: f64 = 1e-9;

/// A root, mid and effector joint in world space, plus the goal.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use rig_ik::{IkParams, TwoBoneChain, solve_two_bone};
/// use rig_types::Transform;
///
/// let chain = TwoBoneChain::new(
///     Transform::identity(),
///     Transform::from_translation(Vector3::new(1.0, 0.0, 0.01)),
///     Transform::from_translation(Vector3::new(2.0, 0.0, 0.0)),
///     Vector3::new(1.2, 0.5, 0.0),
///     Vector3::new(0.5, 0.0, 1.0),
/// );
/// let solved = solve_two_bone(&chain, &IkParams::default());
/// assert!((solved.effector.translation - chain.target).norm() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneChain {
    /// Upper joint (shoulder, hip).
    pub root: Transform,
    /// Middle joint (elbow, knee).
    pub mid: Transform,
    /// End joint (wrist, ankle).
    pub effector: Transform,
    /// World position the effector should reach.
    pub target: Vector3<f64>,
    /// World position the middle joint should bend towards.
    pub pole: Vector3<f64>,
    /// Scale applied to both bone lengths before solving. Default 1.0.
    pub stretch: f64,
}

impl TwoBoneChain {
    /// Creates a chain with unit stretch.
    #[must_use]
    pub const fn new(
        root: Transform,
        mid: Transform,
        effector: Transform,
        target: Vector3<f64>,
        pole: Vector3<f64>,
    ) -> Self {
        Self {
            root,
            mid,
            effector,
            target,
            pole,
            stretch: 1.0,
        }
    }

    /// Sets the bone length scale.
    #[must_use]
    pub const fn with_stretch(mut self, stretch: f64) -> Self {
        self.stretch = stretch;
        self
    }

    /// Summed length of both bones, before stretch.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.mid.translation - self.root.translation).norm()
            + (self.effector.translation - self.mid.translation).norm()
    }
}

/// Solved world transforms for the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneSolution {
    /// Root joint; its translation is unchanged.
    pub root: Transform,
    /// Middle joint.
    pub mid: Transform,
    /// Effector, carried along by the chain. Callers typically override its
    /// rotation.
    pub effector: Transform,
    /// Whether the target was within reach without clamping.
    pub reached: bool,
}

/// Solves a two-bone chain so the effector lands on the target.
///
/// The bend plane is oriented towards the pole position, then the whole
/// chain is rotated by `params.twist` about the root-to-effector axis. A
/// target beyond reach is clamped to full extension minus `params.epsilon`;
/// a target on top of the root is pushed out to `params.epsilon`. The solver
/// never fails: degenerate configurations fall back to a stable bend axis.
#[must_use]
pub fn solve_two_bone(chain: &TwoBoneChain, params: &IkParams) -> TwoBoneSolution {
    let eps = params.epsilon;

    let local_mid = chain.mid.relative_to(&chain.root);
    let local_mid = local_mid.with_translation(local_mid.translation * chain.stretch);
    let local_eff = chain.effector.relative_to(&chain.mid);
    let local_eff = local_eff.with_translation(local_eff.translation * chain.stretch);

    let mid = chain.root.compose(&local_mid);
    let effector = mid.compose(&local_eff);

    let a = chain.root.translation;
    let b = mid.translation;
    let c = effector.translation;
    let t = chain.target;

    let lab = (b - a).norm();
    let lcb = (c - b).norm();
    let lat_raw = (t - a).norm();
    let lat = lat_raw.clamp(eps, (lab + lcb - eps).max(eps));
    let reached = (lat - lat_raw).abs() <= f64::EPSILON * lat_raw.max(1.0);
    if !reached {
        trace!(distance = lat_raw, clamped = lat, "two-bone target clamped");
    }

    // Current interior angles, and the angle between effector and target.
    let ac_ab_0 = angle_between(&(c - a), &(b - a));
    let ba_bc_0 = angle_between(&(a - b), &(c - b));
    let ac_at_0 = angle_between(&(c - a), &(t - a));

    // Desired interior angles by the law of cosines.
    let ac_ab_1 = cosine_rule(lcb * lcb - lab * lab - lat * lat, -2.0 * lab * lat);
    let ba_bc_1 = cosine_rule(lat * lat - lab * lab - lcb * lcb, -2.0 * lab * lcb);

    let ca = c - a;
    let axis0 = unit_or(ca.cross(&(b - a)))
        .or_else(|| unit_or(ca.cross(&(chain.pole - a))))
        .unwrap_or_else(|| perpendicular(&ca));
    let axis1 = unit_or(ca.cross(&(t - a))).unwrap_or(axis0);

    let r0 = UnitQuaternion::from_axis_angle(&axis0, ac_ab_1 - ac_ab_0);
    let r1 = UnitQuaternion::from_axis_angle(&axis0, ba_bc_1 - ba_bc_0);
    let r2 = UnitQuaternion::from_axis_angle(&axis1, ac_at_0);

    let root_delta = r2 * r0;
    let mid_delta = root_delta * r1;

    // Rotate the bend plane about the root-to-effector axis towards the pole.
    let ab = root_delta * (b - a);
    let ac = ab + mid_delta * (c - b);
    let aligned = match unit_or(ac) {
        Some(axis) => {
            let pole_rotation = pole_alignment(&axis, &ab, &(chain.pole - a));
            let twist = UnitQuaternion::from_axis_angle(&axis, params.twist);
            twist * pole_rotation
        }
        None => UnitQuaternion::identity(),
    };

    let root_rotation = aligned * root_delta * chain.root.rotation;
    let mid_rotation = aligned * mid_delta * mid.rotation;

    let root = chain.root.with_rotation(root_rotation);
    let mid = root.compose(&local_mid).with_rotation(mid_rotation);
    let effector = mid.compose(&local_eff);

    TwoBoneSolution {
        root,
        mid,
        effector,
        reached,
    }
}

/// Rotation about `axis` taking the bend plane spanned by `axis` and `bone`
/// onto the plane spanned by `axis` and `pole`.
fn pole_alignment(
    axis: &Unit<Vector3<f64>>,
    bone: &Vector3<f64>,
    pole: &Vector3<f64>,
) -> UnitQuaternion<f64> {
    let current = axis.cross(bone);
    let desired = axis.cross(pole);
    if current.norm() < AXIS_EPSILON || desired.norm() < AXIS_EPSILON {
        return UnitQuaternion::identity();
    }
    let angle = axis
        .dot(&current.cross(&desired))
        .atan2(current.dot(&desired));
    UnitQuaternion::from_axis_angle(axis, angle)
}

fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    match (unit_or(*u), unit_or(*v)) {
        (Some(u), Some(v)) => u.into_inner().dot(&v.into_inner()).clamp(-1.0, 1.0).acos(),
        _ => 0.0,
    }
}

fn cosine_rule(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() <= f64::EPSILON {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0).acos()
}

fn unit_or(v: Vector3<f64>) -> Option<Unit<Vector3<f64>>> {
    Unit::try_new(v, AXIS_EPSILON)
}

fn perpendicular(v: &Vector3<f64>) -> Unit<Vector3<f64>> {
    unit_or(v.cross(&Vector3::x()))
        .or_else(|| unit_or(v.cross(&Vector3::y())))
        .unwrap_or_else(Vector3::z_axis)
}
