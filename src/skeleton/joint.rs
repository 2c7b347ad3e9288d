//! Joint hierarchy of the carpenter.
//!
//! The figure is a tree of local transforms rooted at the body origin (top centre of the
//! torso). Three chains hang off the root:
//!
//! - root → hips → front/back leg (hip → knee → ankle), plus the belt and its tools
//! - root → shoulders → support arm, free arm, carried plank
//! - root → neck → head

/// Identifier of a joint in the skeleton.
/// Ordered for topological traversal (parents before children).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[repr(u8)]
pub enum JointId {
    Root = 0,

    Hips = 1,
    FrontHip = 2,
    FrontKnee = 3,
    FrontAnkle = 4,
    BackHip = 5,
    BackKnee = 6,
    BackAnkle = 7,

    Belt = 8,
    Hammer = 9,
    Wrench = 10,
    TapeMeasure = 11,

    Shoulders = 12,
    SupportShoulder = 13,
    SupportHand = 14,
    FreeShoulder = 15,
    FreeHand = 16,
    Plank = 17,

    Neck = 18,
    Head = 19,
}

impl JointId {
    pub const COUNT: usize = 20;

    /// All joints, parents before children.
    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Root,
        JointId::Hips,
        JointId::FrontHip,
        JointId::FrontKnee,
        JointId::FrontAnkle,
        JointId::BackHip,
        JointId::BackKnee,
        JointId::BackAnkle,
        JointId::Belt,
        JointId::Hammer,
        JointId::Wrench,
        JointId::TapeMeasure,
        JointId::Shoulders,
        JointId::SupportShoulder,
        JointId::SupportHand,
        JointId::FreeShoulder,
        JointId::FreeHand,
        JointId::Plank,
        JointId::Neck,
        JointId::Head,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn parent(self) -> Option<JointId> {
        use JointId::*;
        match self {
            Root => None,
            Hips | Belt | Shoulders | Neck => Some(Root),
            FrontHip | BackHip => Some(Hips),
            FrontKnee => Some(FrontHip),
            FrontAnkle => Some(FrontKnee),
            BackKnee => Some(BackHip),
            BackAnkle => Some(BackKnee),
            Hammer | Wrench | TapeMeasure => Some(Belt),
            SupportShoulder | FreeShoulder | Plank => Some(Shoulders),
            SupportHand => Some(SupportShoulder),
            FreeHand => Some(FreeShoulder),
            Head => Some(Neck),
        }
    }

    pub const fn name(self) -> &'static str {
        use JointId::*;
        match self {
            Root => "root",
            Hips => "hips",
            FrontHip => "front_hip",
            FrontKnee => "front_knee",
            FrontAnkle => "front_ankle",
            BackHip => "back_hip",
            BackKnee => "back_knee",
            BackAnkle => "back_ankle",
            Belt => "belt",
            Hammer => "hammer",
            Wrench => "wrench",
            TapeMeasure => "tape_measure",
            Shoulders => "shoulders",
            SupportShoulder => "support_shoulder",
            SupportHand => "support_hand",
            FreeShoulder => "free_shoulder",
            FreeHand => "free_hand",
            Plank => "plank",
            Neck => "neck",
            Head => "head",
        }
    }

    /// Number of ancestors between this joint and the root.
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut cur = self.parent();
        while let Some(p) = cur {
            depth += 1;
            cur = p.parent();
        }
        depth
    }
}

/// Which leg a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum LegSide {
    Front,
    Back,
}

impl LegSide {
    pub const fn hip(self) -> JointId {
        match self {
            LegSide::Front => JointId::FrontHip,
            LegSide::Back => JointId::BackHip,
        }
    }

    pub const fn knee(self) -> JointId {
        match self {
            LegSide::Front => JointId::FrontKnee,
            LegSide::Back => JointId::BackKnee,
        }
    }

    pub const fn ankle(self) -> JointId {
        match self {
            LegSide::Front => JointId::FrontAnkle,
            LegSide::Back => JointId::BackAnkle,
        }
    }

    /// Stride value feeding this leg: the back leg runs at -0.9× the front.
    pub fn drive(self, stride: f64) -> f64 {
        match self {
            LegSide::Front => stride,
            LegSide::Back => -stride * 0.9,
        }
    }

    /// Sign applied to the hip and knee bend.
    pub const fn bend_sign(self) -> f64 {
        match self {
            LegSide::Front => 1.0,
            LegSide::Back => -1.0,
        }
    }

    /// Horizontal hip offset in torso widths.
    pub const fn hip_offset(self) -> f64 {
        match self {
            LegSide::Front => 0.2,
            LegSide::Back => -0.2,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/skeleton/joint.rs"]
mod tests;
