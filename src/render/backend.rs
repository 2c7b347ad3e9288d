use crate::foundation::core::Canvas;
use crate::foundation::error::SceneResult;
use crate::foundation::math::{Fingerprint, FingerprintHasher};
use crate::scene::display::DisplayList;

/// A rendered frame as RGBA8 pixels.
///
/// Backends produce **premultiplied** alpha; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut h = FingerprintHasher::new();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_u8(u8::from(self.premultiplied));
        h.write_bytes(&self.data);
        h.finish()
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(bytes: &mut [u8]) {
    for px in bytes.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// A renderer that rasterizes a [`DisplayList`] into a [`FrameRGBA`].
///
/// Most callers go through [`crate::render_frame`], which also handles the not-yet-measured
/// viewport case.
pub trait RenderBackend {
    fn render_display_list(&mut self, list: &DisplayList) -> SceneResult<FrameRGBA>;

    /// Settings needed to construct equivalent worker backends for parallel rendering.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

impl<T: RenderBackend + ?Sized> RenderBackend for Box<T> {
    fn render_display_list(&mut self, list: &DisplayList) -> SceneResult<FrameRGBA> {
        (**self).render_display_list(list)
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        (**self).worker_render_settings()
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// Straight-alpha RGBA8 painted under the frame by its clear op. `None` clears to transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SceneResult<Box<dyn RenderBackend + Send>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
