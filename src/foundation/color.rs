use crate::foundation::core::Rgba8Premul;

/// Straight-alpha RGBA8 color.
///
/// Scene palettes are `const`, so constructors are `const fn`; see [`Color::hex`] and
/// [`Color::rgba`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Color with a fractional alpha in `[0, 1]`, clamped.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: unit_to_u8(alpha),
        }
    }

    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// Interpolate in premultiplied space, returning straight alpha.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let pa = premul_f(self);
        let pb = premul_f(other);
        let mix = |i: usize| pa[i] + (pb[i] - pa[i]) * t;
        let a = mix(3);
        if a <= 0.0 {
            return Self::TRANSPARENT;
        }
        Self {
            r: to_u8(mix(0) / a),
            g: to_u8(mix(1) / a),
            b: to_u8(mix(2) / a),
            a: to_u8(a),
        }
    }
}

const fn unit_to_u8(x: f64) -> u8 {
    let x = if x.is_nan() {
        0.0
    } else if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    };
    (x * 255.0 + 0.5) as u8
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn premul_f(c: Color) -> [f64; 4] {
    let a = f64::from(c.a) / 255.0;
    [
        f64::from(c.r) / 255.0 * a,
        f64::from(c.g) / 255.0 * a,
        f64::from(c.b) / 255.0 * a,
        a,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
