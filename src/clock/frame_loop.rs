use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::source::{CancellationToken, FrameClock};
use crate::clock::viewport::ViewportReader;
use crate::encode::sink::{FrameSink, FrameStamp, SinkConfig};
use crate::foundation::core::{Timestamp, Viewport};
use crate::foundation::error::SceneResult;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::pipeline::render_frame;

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// A frame was drawn and handed to the sink.
    Rendered { index: u64, elapsed: f64 },
    /// No viewport has been measured yet.
    Skipped { elapsed: f64 },
    /// Rendering or the sink failed; the error was logged and nothing was pushed.
    Failed { elapsed: f64 },
    /// The loop was torn down.
    Closed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoopStats {
    pub rendered: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Drives one render per clock tick.
///
/// The first tick fixes the elapsed-time baseline, whether or not it draws. Viewport changes
/// never touch the baseline, so the gait phase at a given time is the same at any size.
pub struct FrameLoop<B, S> {
    backend: B,
    sink: S,
    viewport: ViewportReader,
    baseline: Option<Timestamp>,
    last_elapsed: f64,
    last_viewport: Option<Viewport>,
    next_index: u64,
    stats: LoopStats,
    sink_begun: bool,
    closed: bool,
}

impl<B, S> FrameLoop<B, S>
where
    B: RenderBackend,
    S: FrameSink,
{
    pub fn new(backend: B, sink: S, viewport: ViewportReader) -> Self {
        Self {
            backend,
            sink,
            viewport,
            baseline: None,
            last_elapsed: 0.0,
            last_viewport: None,
            next_index: 0,
            stats: LoopStats::default(),
            sink_begun: false,
            closed: false,
        }
    }

    pub fn baseline(&self) -> Option<Timestamp> {
        self.baseline
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (B, S) {
        (self.backend, self.sink)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        if self.closed {
            return TickOutcome::Closed;
        }
        let baseline = *self.baseline.get_or_insert(now);
        let elapsed = now.secs_since(baseline).max(self.last_elapsed);
        self.last_elapsed = elapsed;

        let viewport = self.viewport.get();
        if viewport != self.last_viewport {
            if let Some(v) = viewport {
                tracing::debug!(width = v.width, height = v.height, density = v.density, "viewport changed");
            }
            self.last_viewport = viewport;
        }

        let frame = match render_frame(&mut self.backend, elapsed, viewport.as_ref()) {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                self.stats.skipped += 1;
                return TickOutcome::Skipped { elapsed };
            }
            Err(e) => {
                tracing::warn!(error = %e, elapsed, "frame render failed");
                self.stats.failed += 1;
                return TickOutcome::Failed { elapsed };
            }
        };

        let index = self.next_index;
        if let Err(e) = self.push(index, elapsed, viewport, &frame) {
            tracing::warn!(error = %e, index, "frame sink failed");
            self.stats.failed += 1;
            return TickOutcome::Failed { elapsed };
        }
        self.next_index += 1;
        self.stats.rendered += 1;
        tracing::trace!(index, elapsed, "frame pushed");
        TickOutcome::Rendered { index, elapsed }
    }

    fn push(
        &mut self,
        index: u64,
        elapsed: f64,
        viewport: Option<Viewport>,
        frame: &FrameRGBA,
    ) -> SceneResult<()> {
        if !self.sink_begun {
            self.sink.begin(SinkConfig {
                width: frame.width,
                height: frame.height,
                density: viewport.map_or(1.0, |v| v.density),
            })?;
            self.sink_begun = true;
        }
        self.sink.push_frame(FrameStamp { index, elapsed }, frame)
    }

    /// Stop drawing and finish the sink. Idempotent.
    pub fn close(&mut self) -> SceneResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.sink_begun {
            self.sink.end()?;
        }
        tracing::debug!(
            rendered = self.stats.rendered,
            skipped = self.stats.skipped,
            failed = self.stats.failed,
            "frame loop closed"
        );
        Ok(())
    }
}

impl<B, S> FrameLoop<B, S>
where
    B: RenderBackend + Send + 'static,
    S: FrameSink + 'static,
{
    /// Schedule the loop on `clock`; it ticks on every clock tick until torn down.
    pub fn attach(self, clock: &mut dyn FrameClock) -> LoopHandle<B, S> {
        let inner = Arc::new(Mutex::new(self));
        let shared = Arc::clone(&inner);
        // A closed loop ignores ticks, so a callback still queued after teardown is inert.
        let token = clock.schedule(Box::new(move |now| {
            lock_loop(&shared).tick(now);
        }));
        LoopHandle { inner, token }
    }
}

fn lock_loop<B, S>(inner: &Mutex<FrameLoop<B, S>>) -> MutexGuard<'_, FrameLoop<B, S>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owner-side handle of an attached [`FrameLoop`].
pub struct LoopHandle<B, S> {
    inner: Arc<Mutex<FrameLoop<B, S>>>,
    token: CancellationToken,
}

impl<B, S> LoopHandle<B, S>
where
    B: RenderBackend,
    S: FrameSink,
{
    pub fn with_loop<R>(&self, f: impl FnOnce(&mut FrameLoop<B, S>) -> R) -> R {
        f(&mut lock_loop(&self.inner))
    }

    pub fn stats(&self) -> LoopStats {
        lock_loop(&self.inner).stats()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel the scheduled callback and close the loop. No frame is drawn afterwards.
    pub fn teardown(&self) -> SceneResult<LoopStats> {
        self.token.cancel();
        let mut lp = lock_loop(&self.inner);
        lp.close()?;
        Ok(lp.stats())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/frame_loop.rs"]
mod tests;
