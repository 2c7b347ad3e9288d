use std::f64::consts::PI;

use crate::foundation::core::clamp_elapsed;

/// Gait phase advances at this many radians per second of elapsed time.
pub const GAIT_ANGULAR_SPEED: f64 = 2.2;

/// Walk-cycle signals for one instant.
///
/// Everything here depends on elapsed time alone, never on the viewport, so the same time
/// always yields the same pose regardless of resizes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Gait {
    /// Elapsed seconds (clamped to be finite and non-negative).
    pub elapsed: f64,
    /// Gait phase `ω = elapsed × 2.2`.
    pub phase: f64,
    /// Primary stride signal `sin(ω)`.
    pub stride: f64,
}

impl Gait {
    pub fn at(elapsed: f64) -> Self {
        let elapsed = clamp_elapsed(elapsed);
        let phase = elapsed * GAIT_ANGULAR_SPEED;
        Self {
            elapsed,
            phase,
            stride: phase.sin(),
        }
    }

    /// Half-frequency side-to-side sway in `[-1, 1]`.
    pub fn sway(&self) -> f64 {
        (self.phase * 0.5).sin()
    }

    /// Double-frequency vertical bob in `[-1, 1]`.
    pub fn bob(&self) -> f64 {
        (self.phase * 2.0).cos()
    }

    /// Slow horizontal wander of the whole figure, independent of the walk cycle.
    pub fn drift(&self) -> f64 {
        (self.elapsed * 0.35).sin()
    }

    /// Head tilt in radians, driven at 0.8× the stride value.
    pub fn head_tilt(&self) -> f64 {
        (self.stride * 0.8).sin() * 0.12
    }

    /// Free-arm swing in radians, driven at 1.3× the stride value.
    pub fn free_arm_swing(&self) -> f64 {
        (self.stride * 1.3).sin() * PI * 0.08
    }

    /// Shoulder lift factor for the arm steadying the plank.
    pub fn support_lift(&self) -> f64 {
        self.stride.cos()
    }

    /// Belt tool jostle factor.
    pub fn tool_jostle(&self) -> f64 {
        self.stride.sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/gait.rs"]
mod tests;
