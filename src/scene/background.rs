//! Sky, sun, clouds, ground, timber stack and dust.
//!
//! Everything here is drawn in logical pixels of the full viewport and depends only on the
//! elapsed time and the viewport size.

use std::f64::consts::TAU;

use crate::foundation::core::{Point, Viewport};
use crate::scene::display::{Painter, Part};
use crate::scene::layout::*;
use crate::scene::primitives::{self, Gradient};

#[tracing::instrument(level = "trace", skip(painter, viewport))]
pub fn paint_background(painter: &mut Painter, viewport: &Viewport, elapsed: f64) {
    paint_sky(painter, viewport, elapsed);
    paint_ground(painter, viewport, elapsed);
    paint_dust(painter, viewport, elapsed);
}

pub fn paint_sky(painter: &mut Painter, viewport: &Viewport, elapsed: f64) {
    let (w, h) = (viewport.width, viewport.height);

    let sky = Gradient::linear(
        Point::ZERO,
        Point::new(0.0, h),
        &[(0.0, SKY_TOP), (SKY_MID_STOP, SKY_MID), (1.0, SKY_HORIZON)],
    );
    painter.fill(Part::Sky, primitives::rect(0.0, 0.0, w, h), sky);

    let sun = sun_center(viewport, elapsed);
    let radius = w * SUN_RADIUS_FRAC;
    let glow = Gradient::radial(
        sun,
        radius * SUN_CORE_FRAC,
        radius,
        &[(0.0, SUN_GLOW), (1.0, SUN_GLOW.with_alpha(0.0))],
    );
    painter.fill(Part::Sun, primitives::circle(sun, radius), glow);

    let drift = CLOUD_DRIFT.sample(elapsed) * w;
    let base_y = h * CLOUD_BASE_Y_FRAC;
    for cloud in CLOUDS {
        let anchor = Point::new(w * cloud.x_frac + drift * cloud.drift_mul, base_y * cloud.y_mul);
        painter.fill(Part::Cloud, cloud_path(anchor, w * cloud.size_frac), CLOUD_FILL);
    }
}

/// Centre of the sun glow in logical pixels.
pub fn sun_center(viewport: &Viewport, elapsed: f64) -> Point {
    Point::new(
        SUN_X.sample(elapsed) * viewport.width,
        SUN_Y.sample(elapsed) * viewport.height,
    )
}

/// Three overlapping puffs merged into one fill.
pub fn cloud_path(anchor: Point, size: f64) -> kurbo::BezPath {
    primitives::union(CLOUD_PUFFS.iter().map(|&(dx, dy, rx, ry)| {
        primitives::ellipse(
            Point::new(anchor.x + dx * size, anchor.y + dy * size),
            rx * size,
            ry * size,
        )
    }))
}

pub fn paint_ground(painter: &mut Painter, viewport: &Viewport, elapsed: f64) {
    let (w, h) = (viewport.width, viewport.height);
    let horizon = h * HORIZON_FRAC;

    let ground = Gradient::linear(Point::new(0.0, horizon), Point::new(0.0, h), &GROUND_STOPS);
    painter.fill(
        Part::Ground,
        primitives::rect(0.0, horizon, w, h - horizon),
        ground,
    );

    let sway = FURROW_SWAY.sample(elapsed) * w;
    let line_width = h * FURROW_WIDTH_FRAC;
    let spacing = (FURROW_COUNT - 1) as f64;
    for i in 0..FURROW_COUNT {
        let fi = i as f64;
        let x = fi / spacing * w;
        let top = Point::new(x + sway * (0.2 - fi * 0.03), horizon);
        let bottom = Point::new(x + sway * (0.4 - fi * 0.04), h);
        let outline = primitives::stroke(&primitives::line(top, bottom), line_width);
        painter.fill(Part::Furrow, outline, FURROW_COLOR);
    }

    paint_timber_stack(painter, viewport);
}

fn paint_timber_stack(painter: &mut Painter, viewport: &Viewport) {
    let (w, h) = (viewport.width, viewport.height);
    let stack_w = w * TIMBER_WIDTH_FRAC;
    let stack_h = h * TIMBER_HEIGHT_FRAC;
    let x = w * TIMBER_X_FRAC;
    let y = h * HORIZON_FRAC - stack_h * TIMBER_SINK;

    painter.fill(
        Part::TimberStack,
        primitives::rounded_rect(x, y, stack_w, stack_h, stack_h * 0.1),
        TIMBER_BASE,
    );

    let plank_h = stack_h / TIMBER_PLANKS as f64;
    for i in 0..TIMBER_PLANKS {
        let shift = stack_w * TIMBER_STAGGER * (i % 2) as f64;
        painter.fill(
            Part::TimberPlank,
            primitives::rounded_rect(
                x - shift,
                y + i as f64 * plank_h,
                stack_w,
                plank_h * 0.9,
                plank_h * 0.2,
            ),
            TIMBER_PLANK,
        );
    }
}

/// Centre and radius of dust particle `i`.
pub fn dust_particle(i: usize, viewport: &Viewport, elapsed: f64) -> (Point, f64) {
    let (w, h) = (viewport.width, viewport.height);
    let phase = i as f64 / DUST_COUNT as f64 * TAU;
    let radius = h * 0.003 + (i % 3) as f64 * h * 0.0015;
    let x = w * (0.3 + (i % 6) as f64 * 0.1) + DUST_WANDER.with_phase(phase).sample(elapsed) * w;
    let y = h * HORIZON_FRAC
        - DUST_BOUNCE.with_phase(phase * 0.8).sample(elapsed) * h
        - (i % 4) as f64 * h * 0.01;
    (Point::new(x, y), radius)
}

pub fn paint_dust(painter: &mut Painter, viewport: &Viewport, elapsed: f64) {
    for i in 0..DUST_COUNT {
        let (center, radius) = dust_particle(i, viewport, elapsed);
        painter.fill(Part::Dust, primitives::circle(center, radius), DUST_COLOR);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
