use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::foundation::core::Timestamp;
use crate::foundation::error::{SceneError, SceneResult};

/// Callback invoked once per clock tick with the tick's timestamp.
pub type FrameCallback = Box<dyn FnMut(Timestamp) + Send>;

/// Source of frame ticks.
///
/// A scheduled callback repeats on every tick until its [`CancellationToken`] is cancelled.
/// Timestamps handed to callbacks never decrease.
pub trait FrameClock {
    fn now(&self) -> Timestamp;
    fn schedule(&mut self, callback: FrameCallback) -> CancellationToken;
}

/// Shared flag that stops a scheduled callback from running again.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct CallbackSet {
    entries: Vec<(CancellationToken, FrameCallback)>,
}

impl CallbackSet {
    fn push(&mut self, callback: FrameCallback) -> CancellationToken {
        let token = CancellationToken::new();
        self.entries.push((token.clone(), callback));
        token
    }

    /// Invoke every live callback; returns how many ran.
    fn fire(&mut self, now: Timestamp) -> usize {
        self.entries.retain(|(token, _)| !token.is_cancelled());
        let mut ran = 0;
        for (token, callback) in &mut self.entries {
            // A callback earlier in this tick may have cancelled a later one.
            if token.is_cancelled() {
                continue;
            }
            callback(now);
            ran += 1;
        }
        ran
    }

    fn live(&self) -> usize {
        self.entries
            .iter()
            .filter(|(token, _)| !token.is_cancelled())
            .count()
    }
}

fn interval_from_fps(fps: f64) -> SceneResult<Duration> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(SceneError::validation(format!(
            "fps must be finite and > 0, got {fps}"
        )));
    }
    Ok(Duration::from_secs_f64(1.0 / fps))
}

/// Deterministic clock advanced by hand. Used by tests and offline sequence rendering.
pub struct SteppedClock {
    now: Timestamp,
    interval: Duration,
    callbacks: CallbackSet,
}

impl SteppedClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            now: Timestamp::ZERO,
            interval,
            callbacks: CallbackSet::default(),
        }
    }

    pub fn from_fps(fps: f64) -> SceneResult<Self> {
        Ok(Self::new(interval_from_fps(fps)?))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tick at the current time without advancing it.
    pub fn fire(&mut self) -> usize {
        self.callbacks.fire(self.now)
    }

    /// Advance by one interval, then tick.
    pub fn advance(&mut self) -> usize {
        self.advance_by(self.interval)
    }

    pub fn advance_by(&mut self, step: Duration) -> usize {
        self.now = Timestamp(self.now.0.saturating_add(step));
        self.fire()
    }

    /// Jump to `t` (never backwards), then tick.
    pub fn set(&mut self, t: Timestamp) -> usize {
        self.now = self.now.max(t);
        self.fire()
    }

    /// Number of callbacks that have not been cancelled.
    pub fn pending(&self) -> usize {
        self.callbacks.live()
    }
}

impl FrameClock for SteppedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn schedule(&mut self, callback: FrameCallback) -> CancellationToken {
        self.callbacks.push(callback)
    }
}

/// Wall-clock driven ticks at a fixed interval on the calling thread.
///
/// A late tick is not made up for: the next callback just sees a larger timestamp.
pub struct IntervalClock {
    start: Instant,
    interval: Duration,
    callbacks: CallbackSet,
}

impl IntervalClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            start: Instant::now(),
            interval,
            callbacks: CallbackSet::default(),
        }
    }

    pub fn from_fps(fps: f64) -> SceneResult<Self> {
        Ok(Self::new(interval_from_fps(fps)?))
    }

    /// Tick repeatedly until `duration` has passed or every callback is cancelled.
    /// Returns the number of ticks.
    pub fn run_for(&mut self, duration: Duration) -> usize {
        let deadline = Instant::now() + duration;
        let mut ticks = 0;
        loop {
            let tick_start = Instant::now();
            if self.callbacks.fire(self.now()) == 0 {
                break;
            }
            ticks += 1;
            if tick_start >= deadline {
                break;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            let wait = self.interval.saturating_sub(tick_start.elapsed());
            if wait > remaining {
                break;
            }
            std::thread::sleep(wait);
        }
        tracing::debug!(ticks, "interval clock stopped");
        ticks
    }

    pub fn pending(&self) -> usize {
        self.callbacks.live()
    }
}

impl FrameClock for IntervalClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.start.elapsed())
    }

    fn schedule(&mut self, callback: FrameCallback) -> CancellationToken {
        self.callbacks.push(callback)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/source.rs"]
mod tests;
