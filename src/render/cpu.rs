use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::scene::display::{DisplayList, DrawOp, Fill};
use crate::scene::primitives::{Gradient, GradientShape, Paint};

/// Largest edge (in pixels) of a baked gradient image.
const MAX_GRADIENT_EDGE: f64 = u16::MAX as f64;

/// Baked gradients kept between frames; the cache is dropped wholesale once it grows past this.
pub const GRADIENT_CACHE_CAPACITY: usize = 64;

/// CPU raster backend powered by `vello_cpu`.
///
/// Keeps one surface and reallocates it only when the physical canvas size changes. Baked
/// gradient images are cached by gradient, local box and pixel size.
pub struct CpuBackend {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    shape: [u64; 5],
    stops: Vec<(u64, [u8; 4])>,
    bbox: [u64; 4],
    w: u32,
    h: u32,
}

impl GradientKey {
    fn new(gradient: &Gradient, bbox: Rect, w: u32, h: u32) -> Self {
        let shape = match gradient.shape {
            GradientShape::Linear { start, end } => {
                [0, start.x.to_bits(), start.y.to_bits(), end.x.to_bits(), end.y.to_bits()]
            }
            GradientShape::Radial {
                center,
                inner_radius,
                outer_radius,
            } => [
                1,
                center.x.to_bits(),
                center.y.to_bits(),
                inner_radius.to_bits(),
                outer_radius.to_bits(),
            ],
        };
        Self {
            shape,
            stops: gradient
                .stops
                .iter()
                .map(|s| (s.offset.to_bits(), [s.color.r, s.color.g, s.color.b, s.color.a]))
                .collect(),
            bbox: [bbox.x0, bbox.y0, bbox.x1, bbox.y1].map(f64::to_bits),
            w,
            h,
        }
    }
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
            gradient_cache: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Physical size of the current surface, if one has been allocated.
    pub fn surface_size(&self) -> Option<Canvas> {
        self.surface.as_ref().map(|s| Canvas {
            width: u32::from(s.width),
            height: u32::from(s.height),
        })
    }

    /// Number of baked gradient images currently cached.
    pub fn gradient_cache_len(&self) -> usize {
        self.gradient_cache.len()
    }

    fn ensure_surface(&mut self, canvas: Canvas) -> SceneResult<()> {
        if canvas.is_empty() {
            return Err(SceneError::surface_unavailable(format!(
                "canvas {}x{} has no pixels",
                canvas.width, canvas.height
            )));
        }
        let width_u16: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SceneError::surface_unavailable("surface width exceeds u16"))?;
        let height_u16: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SceneError::surface_unavailable("surface height exceeds u16"))?;

        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width == width_u16 && s.height == height_u16);
        if !reuse {
            tracing::debug!(width = width_u16, height = height_u16, "allocating cpu surface");
            self.surface = Some(CpuSurface {
                width: width_u16,
                height: height_u16,
                pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            });
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip_all, fields(ops = list.ops.len()))]
    fn render_display_list(&mut self, list: &DisplayList) -> SceneResult<FrameRGBA> {
        let canvas = list.viewport.canvas();
        self.ensure_surface(canvas)?;
        let clear = self.settings.clear_rgba;

        let mut surface = self
            .surface
            .take()
            .ok_or_else(|| SceneError::render("cpu surface missing after allocation"))?;
        clear_pixmap(&mut surface.pixmap, [0, 0, 0, 0]);

        if self.gradient_cache.len() > GRADIENT_CACHE_CAPACITY {
            tracing::trace!(entries = self.gradient_cache.len(), "dropping gradient cache");
            self.gradient_cache.clear();
        }
        let cache = &mut self.gradient_cache;
        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        let drawn = list
            .ops
            .iter()
            .try_for_each(|op| draw_op(&mut ctx, cache, op, clear));
        if drawn.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut surface.pixmap);
        }
        let frame_data = surface.pixmap.data_as_u8_slice().to_vec();
        self.surface = Some(surface);
        drawn?;

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: frame_data,
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    cache: &mut HashMap<GradientKey, vello_cpu::Image>,
    op: &DrawOp,
    clear: Option<[u8; 4]>,
) -> SceneResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Clear { rect, transform } => {
            // The surface starts transparent; only a visible clear color needs painting.
            if let Some([r, g, b, a]) = clear.filter(|c| c[3] > 0) {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            Ok(())
        }
        DrawOp::Fill(fill) => draw_fill(ctx, cache, fill),
    }
}

fn draw_fill(
    ctx: &mut vello_cpu::RenderContext,
    cache: &mut HashMap<GradientKey, vello_cpu::Image>,
    fill: &Fill,
) -> SceneResult<()> {
    if fill.path.elements().is_empty() {
        return Ok(());
    }
    ctx.set_transform(affine_to_cpu(fill.transform));
    match &fill.paint {
        Paint::Solid(c) => {
            if c.a == 0 {
                return Ok(());
            }
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        }
        Paint::Gradient(g) => {
            let Some((image, paint_transform)) = gradient_paint(cache, g, &fill.path, fill.transform)?
            else {
                return Ok(());
            };
            ctx.set_paint(image);
            ctx.set_paint_transform(affine_to_cpu(paint_transform));
        }
    }
    ctx.fill_path(&bezpath_to_cpu(&fill.path));
    Ok(())
}

/// Bake `gradient` into an image covering the path's local bounding box at device resolution.
///
/// Returns the image and the paint transform that places it over the box, or `None` when the
/// shape covers no area.
fn gradient_paint(
    cache: &mut HashMap<GradientKey, vello_cpu::Image>,
    gradient: &Gradient,
    path: &BezPath,
    transform: Affine,
) -> SceneResult<Option<(vello_cpu::Image, Affine)>> {
    let bbox = path.bounding_box();
    let scale = transform.determinant().abs().sqrt();
    if !(bbox.is_finite() && bbox.area() > 0.0 && scale.is_finite() && scale > 0.0) {
        return Ok(None);
    }

    let w = (bbox.width() * scale).ceil().clamp(1.0, MAX_GRADIENT_EDGE) as u32;
    let h = (bbox.height() * scale).ceil().clamp(1.0, MAX_GRADIENT_EDGE) as u32;
    let step_x = bbox.width() / f64::from(w);
    let step_y = bbox.height() / f64::from(h);
    let placement = Affine::translate(bbox.origin().to_vec2())
        * Affine::scale_non_uniform(step_x, step_y);

    let key = GradientKey::new(gradient, bbox, w, h);
    if let Some(image) = cache.get(&key).cloned() {
        return Ok(Some((image, placement)));
    }

    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    for (y, row) in bytes.chunks_exact_mut(w as usize * 4).enumerate() {
        let ly = bbox.y0 + (y as f64 + 0.5) * step_y;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let lx = bbox.x0 + (x as f64 + 0.5) * step_x;
            let c = gradient.color_at(Point::new(lx, ly)).to_premul();
            px.copy_from_slice(&c.to_array());
        }
    }

    let image = rgba_premul_to_image(&bytes, w, h)?;
    cache.insert(key, image.clone());
    Ok(Some((image, placement)))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(bytes_premul: &[u8], width: u32, height: u32) -> SceneResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SceneError::render("gradient image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SceneError::render("gradient image height exceeds u16"))?;
    if bytes_premul.len() != width as usize * height as usize * 4 {
        return Err(SceneError::render("gradient image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in bytes_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
