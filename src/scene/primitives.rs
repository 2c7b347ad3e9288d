//! Shape and paint helpers shared by every layer.
//!
//! All helpers are total: non-finite or negative sizes collapse to zero and corner radii are
//! clamped, so a bad input can only ever produce an empty shape, never a panic mid-frame.

use kurbo::Shape as _;

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Rect, Vec2};

/// Flattening tolerance (logical pixels) for curves converted to paths.
pub const TOLERANCE: f64 = 0.05;

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

fn extent(v: f64) -> f64 {
    finite_or_zero(v).max(0.0)
}

/// Largest usable corner radius for a `w × h` box.
pub fn clamp_corner_radius(w: f64, h: f64, radius: f64) -> f64 {
    extent(radius).min(extent(w) / 2.0).min(extent(h) / 2.0)
}

/// Rectangle with quadratic corners of `radius`, clamped to half the smaller side.
pub fn rounded_rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> BezPath {
    let (x, y) = (finite_or_zero(x), finite_or_zero(y));
    let (w, h) = (extent(w), extent(h));
    let r = clamp_corner_radius(w, h, radius);

    let mut p = BezPath::new();
    p.move_to((x + r, y));
    p.line_to((x + w - r, y));
    p.quad_to((x + w, y), (x + w, y + r));
    p.line_to((x + w, y + h - r));
    p.quad_to((x + w, y + h), (x + w - r, y + h));
    p.line_to((x + r, y + h));
    p.quad_to((x, y + h), (x, y + h - r));
    p.line_to((x, y + r));
    p.quad_to((x, y), (x + r, y));
    p.close_path();
    p
}

/// Plain axis-aligned rectangle.
pub fn rect(x: f64, y: f64, w: f64, h: f64) -> BezPath {
    let (x, y) = (finite_or_zero(x), finite_or_zero(y));
    Rect::new(x, y, x + extent(w), y + extent(h)).to_path(TOLERANCE)
}

pub fn ellipse(center: Point, rx: f64, ry: f64) -> BezPath {
    kurbo::Ellipse::new(center, Vec2::new(extent(rx), extent(ry)), 0.0).to_path(TOLERANCE)
}

pub fn circle(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, extent(radius)).to_path(TOLERANCE)
}

/// Circular arc from `start` sweeping `sweep` radians (positive turns toward +y), left open.
pub fn arc(center: Point, radius: f64, start: f64, sweep: f64) -> BezPath {
    kurbo::Arc {
        center,
        radii: Vec2::new(extent(radius), extent(radius)),
        start_angle: finite_or_zero(start),
        sweep_angle: finite_or_zero(sweep),
        x_rotation: 0.0,
    }
    .to_path(TOLERANCE)
}

/// Arc closed along its chord, for filled domes.
pub fn arc_segment(center: Point, radius: f64, start: f64, sweep: f64) -> BezPath {
    let mut p = arc(center, radius, start, sweep);
    p.close_path();
    p
}

pub fn line(a: Point, b: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(b);
    p
}

/// Outline of `path` stroked at `width` with butt caps and miter joins, ready to be filled.
pub fn stroke(path: &BezPath, width: f64) -> BezPath {
    let width = extent(width);
    if width == 0.0 {
        return BezPath::new();
    }
    let style = kurbo::Stroke::new(width)
        .with_caps(kurbo::Cap::Butt)
        .with_join(kurbo::Join::Miter);
    kurbo::stroke(path.iter(), &style, &kurbo::StrokeOpts::default(), TOLERANCE)
}

/// Concatenate subpaths into one fill.
pub fn union(paths: impl IntoIterator<Item = BezPath>) -> BezPath {
    let mut out = BezPath::new();
    for p in paths {
        out.extend(p.iter());
    }
    out
}

/// Color stop at `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum GradientShape {
    Linear {
        start: Point,
        end: Point,
    },
    /// Concentric radial gradient between two radii.
    Radial {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn linear(start: Point, end: Point, stops: &[(f64, Color)]) -> Self {
        Self {
            shape: GradientShape::Linear { start, end },
            stops: make_stops(stops),
        }
    }

    pub fn radial(center: Point, inner_radius: f64, outer_radius: f64, stops: &[(f64, Color)]) -> Self {
        Self {
            shape: GradientShape::Radial {
                center,
                inner_radius: extent(inner_radius),
                outer_radius: extent(outer_radius),
            },
            stops: make_stops(stops),
        }
    }

    /// Gradient parameter at `p`, clamped to `[0, 1]` (pad extend).
    pub fn param_at(&self, p: Point) -> f64 {
        let t = match self.shape {
            GradientShape::Linear { start, end } => {
                let d = end - start;
                let len2 = d.hypot2();
                if len2 <= f64::EPSILON {
                    0.0
                } else {
                    (p - start).dot(d) / len2
                }
            }
            GradientShape::Radial {
                center,
                inner_radius,
                outer_radius,
            } => {
                let dist = p.distance(center);
                let span = outer_radius - inner_radius;
                if span <= f64::EPSILON {
                    if dist <= inner_radius { 0.0 } else { 1.0 }
                } else {
                    (dist - inner_radius) / span
                }
            }
        };
        if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }
    }

    pub fn color_at(&self, p: Point) -> Color {
        sample_stops(&self.stops, self.param_at(p))
    }
}

fn make_stops(stops: &[(f64, Color)]) -> Vec<GradientStop> {
    let mut out: Vec<GradientStop> = stops
        .iter()
        .map(|&(offset, color)| GradientStop {
            offset: finite_or_zero(offset).clamp(0.0, 1.0),
            color,
        })
        .collect();
    out.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    out
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f64::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// Fill style of a draw operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Paint {
    Solid(Color),
    Gradient(Gradient),
}

impl Paint {
    pub fn kind(&self) -> &'static str {
        match self {
            Paint::Solid(_) => "solid",
            Paint::Gradient(Gradient {
                shape: GradientShape::Linear { .. },
                ..
            }) => "linear",
            Paint::Gradient(Gradient {
                shape: GradientShape::Radial { .. },
                ..
            }) => "radial",
        }
    }

    /// Solid color, or the first stop of a gradient.
    pub fn leading_color(&self) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Gradient(g) => g.stops.first().map(|s| s.color).unwrap_or(Color::TRANSPARENT),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<Gradient> for Paint {
    fn from(g: Gradient) -> Self {
        Paint::Gradient(g)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/primitives.rs"]
mod tests;
