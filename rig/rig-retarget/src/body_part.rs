//! Fixed humanoid topology.

/// Left or right side of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Left side.
    Left,
    /// Right side.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    const fn offset(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// A digit of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Finger {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Little finger.
    Pinky,
}

impl Finger {
    /// All fingers, thumb first.
    pub const ALL: [Self; 5] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    const fn offset(self) -> usize {
        match self {
            Self::Thumb => 0,
            Self::Index => 1,
            Self::Middle => 2,
            Self::Ring => 3,
            Self::Pinky => 4,
        }
    }
}

/// Joint within a finger, from the knuckle outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FingerJoint {
    /// Knuckle.
    Proximal,
    /// Middle joint.
    Intermediate,
    /// Tip joint.
    Distal,
}

impl FingerJoint {
    /// All joints, knuckle first.
    pub const ALL: [Self; 3] = [Self::Proximal, Self::Intermediate, Self::Distal];

    const fn offset(self) -> usize {
        match self {
            Self::Proximal => 0,
            Self::Intermediate => 1,
            Self::Distal => 2,
        }
    }
}

/// A retargeted body part.
///
/// Every part has a stable [`index`](Self::index) in `0..BodyPart::COUNT`
/// and, except for [`BodyPart::Root`], a [`parent`](Self::parent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyPart {
    /// Ground-level root motion.
    Root,
    /// Pelvis.
    Hips,
    /// Chest.
    Spine,
    /// Head.
    Head,
    /// Clavicle.
    Clavicle(Side),
    /// Upper arm.
    Shoulder(Side),
    /// Forearm.
    Elbow(Side),
    /// Wrist.
    Hand(Side),
    /// Finger joint.
    Finger(Side, Finger, FingerJoint),
    /// Thigh.
    UpLeg(Side),
    /// Shin.
    LoLeg(Side),
    /// Ankle.
    Foot(Side),
}

const TORSO: usize = 4;
const PER_SIDE: usize = 22;
const FINGER_BASE: usize = 7;

impl BodyPart {
    /// Number of body parts.
    pub const COUNT: usize = TORSO + 2 * PER_SIDE;

    /// Dense index in `0..COUNT`.
    pub const fn index(self) -> usize {
        let (side, local) = match self {
            Self::Root => return 0,
            Self::Hips => return 1,
            Self::Spine => return 2,
            Self::Head => return 3,
            Self::Clavicle(side) => (side, 0),
            Self::Shoulder(side) => (side, 1),
            Self::Elbow(side) => (side, 2),
            Self::Hand(side) => (side, 3),
            Self::UpLeg(side) => (side, 4),
            Self::LoLeg(side) => (side, 5),
            Self::Foot(side) => (side, 6),
            Self::Finger(side, finger, joint) => {
                (side, FINGER_BASE + finger.offset() * 3 + joint.offset())
            }
        };
        TORSO + side.offset() * PER_SIDE + local
    }

    /// Parent part, `None` for [`BodyPart::Root`].
    pub const fn parent(self) -> Option<Self> {
        Some(match self {
            Self::Root => return None,
            Self::Hips => Self::Root,
            Self::Spine | Self::UpLeg(_) => Self::Hips,
            Self::Head | Self::Clavicle(_) => Self::Spine,
            Self::Shoulder(side) => Self::Clavicle(side),
            Self::Elbow(side) => Self::Shoulder(side),
            Self::Hand(side) => Self::Elbow(side),
            Self::Finger(side, _, FingerJoint::Proximal) => Self::Hand(side),
            Self::Finger(side, finger, FingerJoint::Intermediate) => {
                Self::Finger(side, finger, FingerJoint::Proximal)
            }
            Self::Finger(side, finger, FingerJoint::Distal) => {
                Self::Finger(side, finger, FingerJoint::Intermediate)
            }
            Self::LoLeg(side) => Self::UpLeg(side),
            Self::Foot(side) => Self::LoLeg(side),
        })
    }

    /// All parts in evaluation order: every parent precedes its children.
    pub fn all() -> impl Iterator<Item = Self> {
        let torso = [Self::Root, Self::Hips, Self::Spine, Self::Head];
        torso.into_iter().chain(Side::BOTH.into_iter().flat_map(|side| {
            [
                Self::Clavicle(side),
                Self::Shoulder(side),
                Self::Elbow(side),
                Self::Hand(side),
                Self::UpLeg(side),
                Self::LoLeg(side),
                Self::Foot(side),
            ]
            .into_iter()
            .chain(Finger::ALL.into_iter().flat_map(move |finger| {
                FingerJoint::ALL
                    .into_iter()
                    .map(move |joint| Self::Finger(side, finger, joint))
            }))
        }))
    }
}

/// A two-bone limb driven by IK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Limb {
    /// Left shoulder, elbow and hand.
    LeftArm,
    /// Right shoulder, elbow and hand.
    RightArm,
    /// Left thigh, shin and foot.
    LeftLeg,
    /// Right thigh, shin and foot.
    RightLeg,
}

impl Limb {
    /// Arms first, then legs.
    pub const ALL: [Self; 4] = [Self::LeftArm, Self::RightArm, Self::LeftLeg, Self::RightLeg];

    /// Which side the limb is on.
    pub const fn side(self) -> Side {
        match self {
            Self::LeftArm | Self::LeftLeg => Side::Left,
            Self::RightArm | Self::RightLeg => Side::Right,
        }
    }

    /// Whether this is an arm.
    pub const fn is_arm(self) -> bool {
        matches!(self, Self::LeftArm | Self::RightArm)
    }

    /// Part the limb root hangs from: the clavicle for arms, the hips for legs.
    pub const fn parent(self) -> BodyPart {
        if self.is_arm() {
            BodyPart::Clavicle(self.side())
        } else {
            BodyPart::Hips
        }
    }

    /// Root, mid and effector parts.
    pub const fn parts(self) -> [BodyPart; 3] {
        let side = self.side();
        if self.is_arm() {
            [BodyPart::Shoulder(side), BodyPart::Elbow(side), BodyPart::Hand(side)]
        } else {
            [BodyPart::UpLeg(side), BodyPart::LoLeg(side), BodyPart::Foot(side)]
        }
    }
}
