//! Dressing over the skeleton: every shape is drawn in the local space of the joint it hangs
//! from, so the figure follows whatever [`Pose`] it is given.

use std::f64::consts::PI;

use crate::foundation::core::{BezPath, Point};
use crate::scene::display::{Painter, Part};
use crate::scene::layout::*;
use crate::scene::primitives::{self, Gradient, rounded_rect};
use crate::skeleton::joint::{JointId, LegSide};
use crate::skeleton::pose::{Pose, Proportions};

/// Paint the whole carpenter, back to front.
#[tracing::instrument(level = "trace", skip_all)]
pub fn paint_figure(painter: &mut Painter, pose: &Pose) {
    paint_shadow(painter, pose);
    paint_leg(painter, pose, LegSide::Front);
    paint_leg(painter, pose, LegSide::Back);
    paint_torso(painter, pose);
    paint_belt(painter, pose);
    paint_tools(painter, pose);
    paint_support_arm(painter, pose);
    paint_free_arm(painter, pose);
    paint_plank(painter, pose);
    paint_head(painter, pose);
}

/// Draw in the world frame of `joint`.
fn at(painter: &mut Painter, pose: &Pose, joint: JointId, f: impl FnOnce(&mut Painter, &Proportions)) {
    let p = *pose.proportions();
    painter.with_transform(pose.world(joint), |painter| f(painter, &p));
}

fn paint_shadow(painter: &mut Painter, pose: &Pose) {
    let bob = pose.gait().bob() * pose.proportions().view_height * 0.008;
    at(painter, pose, JointId::Root, |painter, p| {
        let tw = p.torso_width;
        let center = Point::new(0.0, p.torso_height + p.leg_length - bob * 0.5);
        painter.fill(
            Part::Shadow,
            primitives::ellipse(center, tw * 0.85, tw * 0.35),
            SHADOW,
        );
    });
}

fn paint_leg(painter: &mut Painter, pose: &Pose, side: LegSide) {
    let (upper_color, lower_color) = match side {
        LegSide::Front => (TROUSERS_FRONT_UPPER, TROUSERS_FRONT_LOWER),
        LegSide::Back => (TROUSERS_BACK_UPPER, TROUSERS_BACK_LOWER),
    };

    at(painter, pose, side.hip(), |painter, p| {
        let lw = p.leg_width();
        painter.fill(
            Part::UpperLeg,
            rounded_rect(-lw / 2.0, 0.0, lw, p.upper_leg(), lw * 0.3),
            upper_color,
        );
    });
    at(painter, pose, side.knee(), |painter, p| {
        let lw = p.leg_width();
        painter.fill(
            Part::LowerLeg,
            rounded_rect(-lw / 2.0, 0.0, lw, p.lower_leg(), lw * 0.25),
            lower_color,
        );
    });
    at(painter, pose, side.ankle(), |painter, p| {
        let lw = p.leg_width();
        painter.fill(
            Part::Boot,
            rounded_rect(-lw * 0.7, 0.0, lw * 1.4, lw * 0.35, lw * 0.2),
            BOOT,
        );
    });
}

fn paint_torso(painter: &mut Painter, pose: &Pose) {
    at(painter, pose, JointId::Root, |painter, p| {
        let (tw, th) = (p.torso_width, p.torso_height);
        let chest = th * 0.55;
        painter.fill(
            Part::Chest,
            rounded_rect(-tw / 2.0, 0.0, tw, chest, tw * 0.22),
            SHIRT,
        );
        painter.fill(
            Part::Apron,
            rounded_rect(-tw * 0.55, chest - th * 0.08, tw * 1.1, th * 0.45, tw * 0.25),
            APRON,
        );
    });
}

fn paint_belt(painter: &mut Painter, pose: &Pose) {
    at(painter, pose, JointId::Belt, |painter, p| {
        let tw = p.torso_width;
        let bh = p.torso_height * 0.12;
        painter.fill(
            Part::Belt,
            rounded_rect(-tw * 0.6, 0.0, tw * 1.2, bh, bh * 0.45),
            BELT,
        );
        painter.fill(
            Part::Buckle,
            rounded_rect(-tw * 0.2, bh * 0.18, tw * 0.4, bh * 0.64, bh * 0.3),
            BUCKLE,
        );
    });
}

fn paint_tools(painter: &mut Painter, pose: &Pose) {
    at(painter, pose, JointId::Hammer, |painter, p| {
        let (tw, th) = (p.torso_width, p.torso_height);
        painter.fill(
            Part::HammerHandle,
            rounded_rect(-tw * 0.05, 0.0, tw * 0.1, th * 0.22, tw * 0.04),
            HAMMER_HANDLE,
        );
        painter.fill(
            Part::HammerHead,
            rounded_rect(-tw * 0.16, th * 0.07, tw * 0.32, th * 0.07, tw * 0.04),
            HAMMER_HEAD,
        );
    });

    at(painter, pose, JointId::Wrench, |painter, p| {
        let (tw, th) = (p.torso_width, p.torso_height);
        painter.fill(
            Part::Wrench,
            rounded_rect(-tw * 0.04, 0.0, tw * 0.08, th * 0.2, tw * 0.04),
            WRENCH,
        );
        let jaw = primitives::arc(Point::new(0.0, th * 0.03), tw * 0.08, PI * 0.2, PI * 1.6);
        painter.fill(Part::WrenchJaw, primitives::stroke(&jaw, tw * 0.04), WRENCH);
    });

    at(painter, pose, JointId::TapeMeasure, |painter, p| {
        let (tw, th) = (p.torso_width, p.torso_height);
        painter.fill(
            Part::TapeCase,
            rounded_rect(-tw * 0.17, th * 0.05, tw * 0.22, th * 0.12, tw * 0.06),
            TAPE_CASE,
        );
        painter.fill(
            Part::TapeWindow,
            rounded_rect(-tw * 0.09, th * 0.09, tw * 0.1, th * 0.04, tw * 0.02),
            TAPE_WINDOW,
        );
    });
}

fn paint_support_arm(painter: &mut Painter, pose: &Pose) {
    let arm_width = pose.proportions().torso_width * 0.22;
    at(painter, pose, JointId::SupportShoulder, |painter, p| {
        painter.fill(
            Part::Sleeve,
            rounded_rect(-arm_width / 2.0, 0.0, arm_width, p.support_arm(), arm_width * 0.45),
            SHIRT,
        );
    });
    at(painter, pose, JointId::SupportHand, |painter, _| {
        painter.fill(
            Part::Hand,
            rounded_rect(-arm_width * 0.6, 0.0, arm_width * 1.2, arm_width * 0.55, arm_width * 0.3),
            SKIN,
        );
    });
}

fn paint_free_arm(painter: &mut Painter, pose: &Pose) {
    let arm_width = pose.proportions().torso_width * 0.2;
    at(painter, pose, JointId::FreeShoulder, |painter, p| {
        painter.fill(
            Part::Sleeve,
            rounded_rect(-arm_width / 2.0, 0.0, arm_width, p.free_upper_arm(), arm_width * 0.4),
            SHIRT,
        );
    });
    at(painter, pose, JointId::FreeHand, |painter, _| {
        painter.fill(
            Part::Hand,
            rounded_rect(
                -arm_width * 0.65,
                0.0,
                arm_width * 1.3,
                arm_width * 0.55,
                arm_width * 0.3,
            ),
            SKIN,
        );
        painter.fill(
            Part::FoldingRule,
            rounded_rect(
                -arm_width * 0.35,
                arm_width * 0.2,
                arm_width * 0.7,
                arm_width * 0.18,
                arm_width * 0.1,
            ),
            FOLDING_RULE,
        );
    });
}

/// Length and thickness of the carried plank.
pub fn plank_size(p: &Proportions) -> (f64, f64) {
    (p.torso_width * 4.5, p.torso_width * 0.3)
}

fn paint_plank(painter: &mut Painter, pose: &Pose) {
    at(painter, pose, JointId::Plank, |painter, p| {
        let (length, thickness) = plank_size(p);
        let grain = Gradient::linear(Point::ZERO, Point::new(length, thickness), &PLANK_STOPS);
        painter.fill(
            Part::Plank,
            rounded_rect(0.0, -thickness / 2.0, length, thickness, thickness * 0.25),
            grain,
        );
        for i in 0..PLANK_GRAIN_MARKS {
            painter.fill(
                Part::PlankGrain,
                primitives::rect(
                    length * (i as f64 * 0.2 + 0.1),
                    -thickness * 0.45,
                    thickness * 0.1,
                    thickness * 0.9,
                ),
                PLANK_GRAIN,
            );
        }
    });
}

fn mouth(hr: f64) -> BezPath {
    let mut m = BezPath::new();
    m.move_to((-hr * 0.6, hr * 0.2));
    m.quad_to((0.0, hr * 0.55), (hr * 0.5, hr * 0.1));
    m
}

fn paint_head(painter: &mut Painter, pose: &Pose) {
    at(painter, pose, JointId::Neck, |painter, p| {
        let hr = p.head_radius;
        painter.fill(
            Part::Neck,
            rounded_rect(-hr * 0.2, 0.0, hr * 0.4, hr * 0.6, hr * 0.2),
            SKIN,
        );
    });

    at(painter, pose, JointId::Head, |painter, p| {
        let hr = p.head_radius;
        painter.fill(Part::Face, primitives::circle(Point::ZERO, hr), FACE);

        let (eye_x, eye_y) = (hr * 0.35, -hr * 0.1);
        painter.fill(
            Part::Eye,
            primitives::circle(Point::new(eye_x, eye_y), hr * 0.08),
            FEATURES,
        );
        painter.fill(
            Part::Eye,
            primitives::circle(Point::new(-eye_x * 0.8, eye_y), hr * 0.075),
            FEATURES,
        );
        painter.fill(Part::Mouth, primitives::stroke(&mouth(hr), hr * 0.08), FEATURES);

        painter.fill(
            Part::HelmetDome,
            primitives::arc_segment(Point::new(0.0, -hr * 0.2), hr * 1.05, PI, PI),
            HELMET,
        );
        painter.fill(
            Part::HelmetBrim,
            primitives::rect(-hr * 1.05, -hr * 0.2, hr * 2.1, hr * 0.45),
            HELMET,
        );
        painter.fill(
            Part::HelmetHighlight,
            primitives::rect(-hr * 0.9, -hr * 0.1, hr * 1.8, hr * 0.18),
            HELMET_HIGHLIGHT,
        );
    });
}

#[cfg(test)]
#[path = "../../tests/unit/scene/figure.rs"]
mod tests;
