use std::time::Duration;

use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Fixed width:height ratio of the drawing surface.
pub const ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Logical drawing-surface size plus the pixel-density factor.
///
/// Geometry is specified in logical pixels; the density maps it onto physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub density: f64, // >= 1
}

impl Viewport {
    /// Validate an explicit size. Density below 1 (or non-finite) falls back to 1.
    pub fn new(width: f64, height: f64, density: f64) -> SceneResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SceneError::validation(format!(
                "viewport width must be finite and > 0, got {width}"
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(SceneError::validation(format!(
                "viewport height must be finite and > 0, got {height}"
            )));
        }
        Ok(Self {
            width,
            height,
            density: normalize_density(density),
        })
    }

    /// Build a viewport whose height is derived from `width` with the fixed 16:9 aspect.
    pub fn from_width(width: f64, density: f64) -> SceneResult<Self> {
        Self::new(width, width / ASPECT_RATIO, density)
    }

    /// True when the size is usable for painting. Public fields can be set to anything, so the
    /// compositor checks this instead of trusting construction.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite()
            && self.width > 0.0
            && self.height.is_finite()
            && self.height > 0.0
            && self.density.is_finite()
            && self.density > 0.0
    }

    /// Full logical-pixel rectangle.
    pub fn logical_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Physical pixel size of the backing surface.
    pub fn canvas(&self) -> Canvas {
        fn to_px(v: f64) -> u32 {
            v.round().clamp(0.0, f64::from(u32::MAX)) as u32
        }

        Canvas {
            width: to_px(self.width * self.density),
            height: to_px(self.height * self.density),
        }
    }

    /// Logical to physical pixel mapping.
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.density)
    }
}

pub(crate) fn normalize_density(density: f64) -> f64 {
    if density.is_finite() && density >= 1.0 {
        density
    } else {
        1.0
    }
}

/// Physical pixel dimensions of a render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Monotonic clock reading handed to frame callbacks.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Timestamp(pub Duration);

impl Timestamp {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub fn from_secs_f64(secs: f64) -> Self {
        Self(Duration::from_secs_f64(clamp_elapsed(secs)))
    }

    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Seconds since `baseline`; zero when this reading is earlier.
    pub fn secs_since(self, baseline: Timestamp) -> f64 {
        self.0.saturating_sub(baseline.0).as_secs_f64()
    }
}

/// Elapsed times must be finite and non-negative; anything else is treated as zero.
pub fn clamp_elapsed(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Local joint transform: translation then rotation about the translated origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_rad: f64,
}

impl Transform2D {
    pub fn translate(x: f64, y: f64) -> Self {
        Self::translate_rotate(x, y, 0.0)
    }

    pub fn translate_rotate(x: f64, y: f64, rotation_rad: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            rotation_rad,
        }
    }

    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::rotate(self.rotation_rad)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
