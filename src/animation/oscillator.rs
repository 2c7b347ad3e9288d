/// Waveform of an [`Oscillator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Wave {
    Sine,
    Cosine,
    /// `|sin|`, a bounce that never goes negative.
    AbsSine,
}

/// Closed-form periodic signal `offset + amp * wave(freq * t + phase)`.
///
/// `freq` is an angular speed in radians per second. Sampling is a pure function of `t`, so
/// replaying a time always yields the same value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Oscillator {
    pub wave: Wave,
    pub amp: f64,
    pub freq: f64,
    pub phase: f64,
    pub offset: f64,
}

impl Oscillator {
    pub const fn sine(amp: f64, freq: f64) -> Self {
        Self {
            wave: Wave::Sine,
            amp,
            freq,
            phase: 0.0,
            offset: 0.0,
        }
    }

    pub const fn cosine(amp: f64, freq: f64) -> Self {
        Self {
            wave: Wave::Cosine,
            ..Self::sine(amp, freq)
        }
    }

    pub const fn abs_sine(amp: f64, freq: f64) -> Self {
        Self {
            wave: Wave::AbsSine,
            ..Self::sine(amp, freq)
        }
    }

    pub const fn with_phase(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    pub fn sample(&self, t: f64) -> f64 {
        let x = self.freq * t + self.phase;
        let w = match self.wave {
            Wave::Sine => x.sin(),
            Wave::Cosine => x.cos(),
            Wave::AbsSine => x.sin().abs(),
        };
        self.offset + self.amp * w
    }

    /// Inclusive value range over all `t`.
    pub fn bounds(&self) -> (f64, f64) {
        let a = self.amp.abs();
        match self.wave {
            Wave::Sine | Wave::Cosine => (self.offset - a, self.offset + a),
            Wave::AbsSine if self.amp >= 0.0 => (self.offset, self.offset + a),
            Wave::AbsSine => (self.offset - a, self.offset),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/oscillator.rs"]
mod tests;
