//! Static layout and palette of the scene.
//!
//! Fractions are relative to the logical viewport (`w`, `h`) unless a comment names another
//! unit. None of these are runtime-configurable.

use crate::animation::oscillator::Oscillator;
use crate::foundation::color::Color;

// --- Sky ---

/// Horizon line as a fraction of viewport height.
pub const HORIZON_FRAC: f64 = 0.72;

pub const SKY_TOP: Color = Color::hex(0x9ed8ff);
pub const SKY_MID: Color = Color::hex(0xcbe9ff);
pub const SKY_HORIZON: Color = Color::hex(0xf6f3ec);
pub const SKY_MID_STOP: f64 = 0.45;

pub const SUN_GLOW: Color = Color::hex(0xfff7c9);
/// Outer glow radius in units of `w`.
pub const SUN_RADIUS_FRAC: f64 = 0.06;
/// Opaque core radius in units of the outer radius.
pub const SUN_CORE_FRAC: f64 = 0.2;
/// Sun centre x in units of `w`.
pub const SUN_X: Oscillator = Oscillator::sine(0.05, 0.25).with_offset(0.78);
/// Sun centre y in units of `h`.
pub const SUN_Y: Oscillator = Oscillator::cosine(0.02, 0.3).with_offset(0.2);

pub const CLOUD_FILL: Color = Color::rgba(255, 255, 255, 0.8);
/// Shared cloud drift in units of `w`.
pub const CLOUD_DRIFT: Oscillator = Oscillator::sine(0.02, 0.15);
pub const CLOUD_BASE_Y_FRAC: f64 = 0.22;

/// One cloud: anchor x (units of `w`), drift multiplier, y multiplier of the cloud base line,
/// and size (units of `w`).
#[derive(Clone, Copy, Debug)]
pub struct CloudSpec {
    pub x_frac: f64,
    pub drift_mul: f64,
    pub y_mul: f64,
    pub size_frac: f64,
}

pub const CLOUDS: [CloudSpec; 3] = [
    CloudSpec {
        x_frac: 0.15,
        drift_mul: 1.0,
        y_mul: 1.0,
        size_frac: 0.12,
    },
    CloudSpec {
        x_frac: 0.45,
        drift_mul: -0.6,
        y_mul: 1.2,
        size_frac: 0.18,
    },
    CloudSpec {
        x_frac: 0.72,
        drift_mul: 0.9,
        y_mul: 0.9,
        size_frac: 0.14,
    },
];

/// Puff ellipses as `(dx, dy, rx, ry)` in units of the cloud size, largest first.
pub const CLOUD_PUFFS: [(f64, f64, f64, f64); 3] = [
    (0.0, 0.0, 0.45, 0.26),
    (-0.35, 0.1, 0.35, 0.2),
    (0.3, 0.05, 0.4, 0.23),
];

// --- Ground ---

pub const GROUND_STOPS: [(f64, Color); 3] = [
    (0.0, Color::hex(0xd1b48c)),
    (0.5, Color::hex(0xb89467)),
    (1.0, Color::hex(0x8c6b40)),
];

pub const FURROW_COUNT: usize = 6;
pub const FURROW_COLOR: Color = Color::rgba(255, 255, 255, 0.12);
/// Line width in units of `h`.
pub const FURROW_WIDTH_FRAC: f64 = 0.002;
/// Furrow sway in units of `w`.
pub const FURROW_SWAY: Oscillator = Oscillator::sine(0.01, 0.8);

pub const TIMBER_X_FRAC: f64 = 0.12;
pub const TIMBER_WIDTH_FRAC: f64 = 0.18;
pub const TIMBER_HEIGHT_FRAC: f64 = 0.12;
/// How far the stack sinks below the horizon, in units of its own height.
pub const TIMBER_SINK: f64 = 0.3;
pub const TIMBER_PLANKS: usize = 5;
/// Odd planks shift left by this much of the stack width.
pub const TIMBER_STAGGER: f64 = 0.07;
pub const TIMBER_BASE: Color = Color::hex(0xd7a871);
pub const TIMBER_PLANK: Color = Color::hex(0xc48b58);

// --- Dust ---

pub const DUST_COUNT: usize = 24;
pub const DUST_COLOR: Color = Color::rgba(255, 255, 255, 0.55);
/// Horizontal wander in units of `w`.
pub const DUST_WANDER: Oscillator = Oscillator::sine(0.02, 1.4);
/// Vertical bounce in units of `h`; the per-particle phase is scaled by 0.8.
pub const DUST_BOUNCE: Oscillator = Oscillator::abs_sine(0.05, 0.9);

// --- Figure palette ---

pub const SHADOW: Color = Color::rgba(50, 40, 30, 0.25);
pub const TROUSERS_FRONT_UPPER: Color = Color::hex(0x304b63);
pub const TROUSERS_FRONT_LOWER: Color = Color::hex(0x2a4055);
pub const TROUSERS_BACK_UPPER: Color = Color::hex(0x223648);
pub const TROUSERS_BACK_LOWER: Color = Color::hex(0x1f2e3f);
pub const BOOT: Color = Color::hex(0x5a4332);
pub const SHIRT: Color = Color::hex(0x4a7d9a);
pub const APRON: Color = Color::hex(0xc99356);
pub const BELT: Color = Color::hex(0x2f2a25);
pub const BUCKLE: Color = Color::hex(0xc0a77e);
pub const HAMMER_HANDLE: Color = Color::hex(0x5f4532);
pub const HAMMER_HEAD: Color = Color::hex(0xd5d5d8);
pub const WRENCH: Color = Color::hex(0xd4d4d8);
pub const TAPE_CASE: Color = Color::hex(0xffd761);
pub const TAPE_WINDOW: Color = Color::hex(0x33312c);
pub const SKIN: Color = Color::hex(0xf1c9a1);
pub const FACE: Color = Color::hex(0xf4cfad);
pub const FEATURES: Color = Color::hex(0x382315);
pub const HELMET: Color = Color::hex(0xdfa24c);
pub const HELMET_HIGHLIGHT: Color = Color::hex(0xf4c77a);
pub const FOLDING_RULE: Color = Color::hex(0xffeaa0);
pub const PLANK_STOPS: [(f64, Color); 3] = [
    (0.0, Color::hex(0xe0b178)),
    (0.5, Color::hex(0xc8924f)),
    (1.0, Color::hex(0xb6783b)),
];
pub const PLANK_GRAIN: Color = Color::rgba(110, 76, 45, 0.35);
pub const PLANK_GRAIN_MARKS: usize = 4;
