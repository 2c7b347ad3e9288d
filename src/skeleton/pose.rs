use std::f64::consts::PI;

use crate::animation::gait::Gait;
use crate::foundation::core::{Affine, Point, Transform2D, Viewport};
use crate::scene::layout::HORIZON_FRAC;
use crate::skeleton::joint::{JointId, LegSide};

/// Extra elbow bend (radians per unit stride) of the arm steadying the plank.
pub const SUPPORT_ELBOW_JITTER: f64 = 0.04;

/// Peak belt-tool rotation (radians) for hammer, wrench and tape measure.
pub const HAMMER_JITTER: f64 = 0.115;
pub const WRENCH_JITTER: f64 = 0.0575;
pub const TAPE_JITTER: f64 = 0.02875;

/// Body measurements derived from the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Proportions {
    pub view_width: f64,
    pub view_height: f64,
    pub horizon_y: f64,
    pub torso_width: f64,
    pub torso_height: f64,
    pub leg_length: f64,
    pub head_radius: f64,
}

impl Proportions {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let torso_width = w * 0.12;
        Self {
            view_width: w,
            view_height: h,
            horizon_y: h * HORIZON_FRAC,
            torso_width,
            torso_height: h * 0.3,
            leg_length: h * 0.25,
            head_radius: torso_width * 0.45,
        }
    }

    pub fn upper_leg(&self) -> f64 {
        self.leg_length * 0.55
    }

    pub fn lower_leg(&self) -> f64 {
        self.leg_length * 0.45
    }

    pub fn leg_width(&self) -> f64 {
        self.torso_width * 0.28
    }

    /// Length of the arm that steadies the plank.
    pub fn support_arm(&self) -> f64 {
        self.torso_height * 0.78
    }

    /// Upper segment of the swinging arm.
    pub fn free_upper_arm(&self) -> f64 {
        self.torso_height * 0.75 * 0.6
    }
}

/// Local and composed world transform of one joint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointPose {
    pub local: Transform2D,
    pub world: Affine,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            local: Transform2D::default(),
            world: Affine::IDENTITY,
        }
    }
}

/// Fully evaluated skeleton for one instant.
///
/// World transforms are in logical pixels; the compositor adds the density scale on top.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    gait: Gait,
    proportions: Proportions,
    joints: [JointPose; JointId::COUNT],
}

impl Pose {
    #[tracing::instrument(level = "trace", skip(viewport))]
    pub fn evaluate(elapsed: f64, viewport: &Viewport) -> Self {
        Self::from_parts(Gait::at(elapsed), Proportions::for_viewport(viewport))
    }

    /// Forward kinematics over [`JointId::ALL`].
    pub fn from_parts(gait: Gait, proportions: Proportions) -> Self {
        let mut joints = [JointPose::default(); JointId::COUNT];
        for id in JointId::ALL {
            let local = local_transform(id, &gait, &proportions);
            let parent_world = id
                .parent()
                .map(|p| joints[p.index()].world)
                .unwrap_or(Affine::IDENTITY);
            joints[id.index()] = JointPose {
                local,
                world: parent_world * local.to_affine(),
            };
        }
        Self {
            gait,
            proportions,
            joints,
        }
    }

    pub fn gait(&self) -> &Gait {
        &self.gait
    }

    pub fn proportions(&self) -> &Proportions {
        &self.proportions
    }

    pub fn joint(&self, id: JointId) -> &JointPose {
        &self.joints[id.index()]
    }

    pub fn local(&self, id: JointId) -> Transform2D {
        self.joints[id.index()].local
    }

    pub fn world(&self, id: JointId) -> Affine {
        self.joints[id.index()].world
    }

    /// World position of the joint's own origin.
    pub fn origin(&self, id: JointId) -> Point {
        self.world(id) * Point::ORIGIN
    }

    /// Map a point in the joint's local space to world space.
    pub fn to_world(&self, id: JointId, local: Point) -> Point {
        self.world(id) * local
    }

    /// Endpoints of every drawn leg segment: hip→knee, knee→ankle, ankle→toe.
    pub fn leg_segments(&self, side: LegSide) -> [(Point, Point); 3] {
        let toe = Point::new(0.0, self.proportions.leg_width() * 0.35);
        [
            (self.origin(side.hip()), self.origin(side.knee())),
            (self.origin(side.knee()), self.origin(side.ankle())),
            (self.origin(side.ankle()), self.to_world(side.ankle(), toe)),
        ]
    }
}

fn local_transform(id: JointId, gait: &Gait, p: &Proportions) -> Transform2D {
    let (tw, th) = (p.torso_width, p.torso_height);
    let stride = gait.stride;
    let jostle = gait.tool_jostle();
    let swing = gait.free_arm_swing();

    match id {
        JointId::Root => {
            let sway = gait.sway() * tw * 0.08;
            let bob = gait.bob() * p.view_height * 0.008;
            let base_x = p.view_width * 0.5 + gait.drift() * p.view_width * 0.03;
            let base_y = p.horizon_y - p.leg_length - th + bob;
            Transform2D::translate(base_x + sway, base_y)
        }
        JointId::Hips => Transform2D::translate(0.0, p.leg_length * 0.04),
        JointId::FrontHip => hip(LegSide::Front, stride, p),
        JointId::BackHip => hip(LegSide::Back, stride, p),
        JointId::FrontKnee => knee(LegSide::Front, stride, p),
        JointId::BackKnee => knee(LegSide::Back, stride, p),
        JointId::FrontAnkle => ankle(LegSide::Front, stride, p),
        JointId::BackAnkle => ankle(LegSide::Back, stride, p),

        JointId::Belt => Transform2D::translate(0.0, th * 0.55),
        JointId::Hammer => {
            let angle = -PI / 14.0 + jostle * HAMMER_JITTER;
            Transform2D::translate_rotate(-tw * 0.45, th * 0.08, angle)
        }
        JointId::Wrench => {
            Transform2D::translate_rotate(tw * 0.35, th * 0.04, PI / 10.0 + jostle * WRENCH_JITTER)
        }
        JointId::TapeMeasure => {
            Transform2D::translate_rotate(-tw * 0.1, th * 0.02, jostle * TAPE_JITTER)
        }

        JointId::Shoulders => Transform2D::default(),
        JointId::SupportShoulder => {
            let lift = gait.support_lift() * tw * 0.05;
            Transform2D::translate_rotate(tw * 0.48, th * 0.08 - lift, -PI / 4.0)
        }
        JointId::SupportHand => Transform2D::translate_rotate(
            0.0,
            p.support_arm(),
            PI / 6.0 + stride * SUPPORT_ELBOW_JITTER,
        ),
        JointId::FreeShoulder => {
            Transform2D::translate_rotate(-tw * 0.45, th * 0.1, PI / 12.0 + swing)
        }
        JointId::FreeHand => {
            Transform2D::translate_rotate(0.0, p.free_upper_arm(), PI / 8.0 + swing * 0.4)
        }
        JointId::Plank => Transform2D::translate_rotate(tw * 0.3, -th * 0.35, -PI / 12.0),

        JointId::Neck => {
            Transform2D::translate_rotate(0.0, -p.head_radius * 0.3, gait.head_tilt())
        }
        JointId::Head => Transform2D::translate(0.0, -p.head_radius * 1.1),
    }
}

fn hip(side: LegSide, stride: f64, p: &Proportions) -> Transform2D {
    let drive = side.drive(stride);
    Transform2D::translate_rotate(
        p.torso_width * side.hip_offset(),
        0.0,
        (PI / 12.0) * drive * side.bend_sign(),
    )
}

fn knee(side: LegSide, stride: f64, p: &Proportions) -> Transform2D {
    let drive = side.drive(stride);
    Transform2D::translate_rotate(
        0.0,
        p.upper_leg(),
        (-PI / 10.0) * drive * side.bend_sign(),
    )
}

fn ankle(side: LegSide, stride: f64, p: &Proportions) -> Transform2D {
    let drive = side.drive(stride);
    Transform2D::translate_rotate(0.0, p.lower_leg(), (-PI / 48.0) * drive)
}

#[cfg(test)]
#[path = "../../tests/unit/skeleton/pose.rs"]
mod tests;
