use kurbo::{PathEl, Shape as _};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Rect, Viewport};
use crate::foundation::math::{Fingerprint, FingerprintHasher};
use crate::scene::primitives::{GradientShape, Paint};

/// Which element of the scene a draw operation paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Part {
    Sky,
    Sun,
    Cloud,
    Ground,
    Furrow,
    TimberStack,
    TimberPlank,
    Dust,

    Shadow,
    UpperLeg,
    LowerLeg,
    Boot,
    Chest,
    Apron,
    Belt,
    Buckle,
    HammerHandle,
    HammerHead,
    Wrench,
    WrenchJaw,
    TapeCase,
    TapeWindow,
    Sleeve,
    Hand,
    FoldingRule,
    Plank,
    PlankGrain,
    Neck,
    Face,
    Eye,
    Mouth,
    HelmetDome,
    HelmetBrim,
    HelmetHighlight,
}

/// Paint order bucket; every background op precedes every figure op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum Layer {
    Background,
    Figure,
}

impl Part {
    pub fn layer(self) -> Layer {
        if self < Part::Shadow {
            Layer::Background
        } else {
            Layer::Figure
        }
    }
}

/// One filled shape. `path` is in the local space of `transform`, which maps to device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub part: Part,
    pub path: BezPath,
    pub transform: Affine,
    pub paint: Paint,
}

impl Fill {
    /// Bounding box of the shape in device pixels.
    pub fn device_bounds(&self) -> Rect {
        let mut p = self.path.clone();
        p.apply_affine(self.transform);
        p.bounding_box()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Wipe `rect` (local to `transform`) to the backend's clear color.
    Clear { rect: Rect, transform: Affine },
    Fill(Fill),
}

impl DrawOp {
    pub fn as_fill(&self) -> Option<&Fill> {
        match self {
            DrawOp::Fill(f) => Some(f),
            DrawOp::Clear { .. } => None,
        }
    }
}

/// Serializable digest of one op, for diagnostics and JSON dumps.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OpSummary {
    pub part: Option<Part>,
    pub bounds: [f64; 4],
    pub paint: &'static str,
    pub color: Color,
}

/// Everything needed to paint one frame, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub viewport: Viewport,
    pub elapsed: f64,
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn fills(&self) -> impl Iterator<Item = &Fill> {
        self.ops.iter().filter_map(DrawOp::as_fill)
    }

    pub fn parts(&self, part: Part) -> impl Iterator<Item = &Fill> {
        self.fills().filter(move |f| f.part == part)
    }

    pub fn count(&self, part: Part) -> usize {
        self.parts(part).count()
    }

    pub fn first(&self, part: Part) -> Option<&Fill> {
        self.parts(part).next()
    }

    pub fn summary(&self) -> Vec<OpSummary> {
        self.ops
            .iter()
            .map(|op| match op {
                DrawOp::Clear { rect, transform } => {
                    let r = transform.transform_rect_bbox(*rect);
                    OpSummary {
                        part: None,
                        bounds: [r.x0, r.y0, r.x1, r.y1],
                        paint: "clear",
                        color: Color::TRANSPARENT,
                    }
                }
                DrawOp::Fill(f) => {
                    let r = f.device_bounds();
                    OpSummary {
                        part: Some(f.part),
                        bounds: [r.x0, r.y0, r.x1, r.y1],
                        paint: f.paint.kind(),
                        color: f.paint.leading_color(),
                    }
                }
            })
            .collect()
    }

    /// Stable digest of every op; equal lists hash equal across runs and platforms.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut h = FingerprintHasher::new();
        h.write_f64(self.viewport.width);
        h.write_f64(self.viewport.height);
        h.write_f64(self.viewport.density);
        h.write_f64(self.elapsed);
        h.write_u32(self.ops.len() as u32);
        for op in &self.ops {
            match op {
                DrawOp::Clear { rect, transform } => {
                    h.write_u8(0);
                    for v in [rect.x0, rect.y0, rect.x1, rect.y1] {
                        h.write_f64(v);
                    }
                    hash_affine(&mut h, *transform);
                }
                DrawOp::Fill(f) => {
                    h.write_u8(1);
                    h.write_u8(f.part as u8);
                    hash_affine(&mut h, f.transform);
                    hash_path(&mut h, &f.path);
                    hash_paint(&mut h, &f.paint);
                }
            }
        }
        h.finish()
    }
}

fn hash_affine(h: &mut FingerprintHasher, a: Affine) {
    for v in a.as_coeffs() {
        h.write_f64(v);
    }
}

fn hash_path(h: &mut FingerprintHasher, path: &BezPath) {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                h.write_u8(b'M');
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            PathEl::LineTo(p) => {
                h.write_u8(b'L');
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            PathEl::QuadTo(a, b) => {
                h.write_u8(b'Q');
                for p in [a, b] {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
            }
            PathEl::CurveTo(a, b, c) => {
                h.write_u8(b'C');
                for p in [a, b, c] {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
            }
            PathEl::ClosePath => h.write_u8(b'Z'),
        }
    }
}

fn hash_paint(h: &mut FingerprintHasher, paint: &Paint) {
    let write_color = |h: &mut FingerprintHasher, c: Color| h.write_bytes(&[c.r, c.g, c.b, c.a]);
    match paint {
        Paint::Solid(c) => {
            h.write_u8(0);
            write_color(h, *c);
        }
        Paint::Gradient(g) => {
            match g.shape {
                GradientShape::Linear { start, end } => {
                    h.write_u8(1);
                    for v in [start.x, start.y, end.x, end.y] {
                        h.write_f64(v);
                    }
                }
                GradientShape::Radial {
                    center,
                    inner_radius,
                    outer_radius,
                } => {
                    h.write_u8(2);
                    for v in [center.x, center.y, inner_radius, outer_radius] {
                        h.write_f64(v);
                    }
                }
            }
            for stop in &g.stops {
                h.write_f64(stop.offset);
                write_color(h, stop.color);
            }
        }
    }
}

/// Records fills against an explicit transform stack.
///
/// `save`/`restore` bracket local coordinate changes the same way nested drawing scopes would;
/// the recorded transform of each fill is the product of everything pushed above it.
#[derive(Debug)]
pub struct Painter {
    current: Affine,
    stack: Vec<Affine>,
    ops: Vec<DrawOp>,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter {
    pub fn new() -> Self {
        Self {
            current: Affine::IDENTITY,
            stack: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Drop any transform state left over; recorded ops are kept.
    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.stack.clear();
    }

    pub fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// Pop the last saved transform. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Affine {
        self.current
    }

    pub fn set_transform(&mut self, t: Affine) {
        self.current = t;
    }

    /// Post-multiply: `t` applies in the current local space.
    pub fn concat(&mut self, t: Affine) {
        self.current *= t;
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.concat(Affine::translate((x, y)));
    }

    pub fn rotate(&mut self, rad: f64) {
        self.concat(Affine::rotate(rad));
    }

    /// Run `f` with `t` concatenated, restoring afterwards.
    pub fn with_transform<R>(&mut self, t: Affine, f: impl FnOnce(&mut Self) -> R) -> R {
        self.save();
        self.concat(t);
        let out = f(self);
        self.restore();
        out
    }

    pub fn clear(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear {
            rect,
            transform: self.current,
        });
    }

    pub fn fill(&mut self, part: Part, path: BezPath, paint: impl Into<Paint>) {
        self.ops.push(DrawOp::Fill(Fill {
            part,
            path,
            transform: self.current,
            paint: paint.into(),
        }));
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn finish(self) -> Vec<DrawOp> {
        self.ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/display.rs"]
mod tests;
