use rayon::prelude::*;

use crate::foundation::core::Viewport;
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::scene::compositor::compose_frame;

/// Compose and rasterize a single frame.
///
/// This is the render entry point driven by the frame loop. A missing or undrawable viewport is
/// the transient "not measured yet" state: nothing is painted and `Ok(None)` is returned.
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
#[tracing::instrument(level = "debug", skip(backend, viewport))]
pub fn render_frame(
    backend: &mut dyn RenderBackend,
    elapsed: f64,
    viewport: Option<&Viewport>,
) -> SceneResult<Option<FrameRGBA>> {
    let Some(list) = viewport.and_then(|v| compose_frame(elapsed, v)) else {
        tracing::debug!("no drawable viewport; frame skipped");
        return Ok(None);
    };
    backend.render_display_list(&list).map(Some)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Render one frame per entry of `times` (seconds since the first frame), in order.
///
/// Every frame is a pure function of its time, so the parallel path renders chunks on worker
/// backends and returns exactly what the serial path would.
pub fn render_frames(
    times: &[f64],
    viewport: &Viewport,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> SceneResult<Vec<FrameRGBA>> {
    if times.is_empty() {
        return Err(SceneError::validation("render times must be non-empty"));
    }
    if !viewport.is_drawable() {
        return Err(SceneError::validation(format!(
            "viewport {}x{} @{} is not drawable",
            viewport.width, viewport.height, viewport.density
        )));
    }

    if !threading.parallel {
        let mut out = Vec::with_capacity(times.len());
        for &t in times {
            let frame = render_frame(backend, t, Some(viewport))?
                .ok_or_else(|| SceneError::render("frame skipped for a drawable viewport"))?;
            out.push(frame);
        }
        return Ok(out);
    }

    let worker_settings = backend.worker_render_settings().ok_or_else(|| {
        SceneError::render("parallel render requires backend worker settings support (CpuBackend)")
    })?;
    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = threading.chunk_size.max(1);

    let mut out = Vec::with_capacity(times.len());
    for chunk in times.chunks(chunk_size) {
        let rendered = pool.install(|| {
            chunk
                .par_iter()
                .map_init(
                    || CpuBackend::new(worker_settings.clone()),
                    |worker, &t| -> SceneResult<FrameRGBA> {
                        render_frame(worker, t, Some(viewport))?.ok_or_else(|| {
                            SceneError::render("frame skipped for a drawable viewport")
                        })
                    },
                )
                .collect::<Vec<_>>()
        });
        for item in rendered {
            out.push(item?);
        }
    }
    tracing::debug!(frames = out.len(), "parallel render finished");
    Ok(out)
}

/// Evenly spaced frame times `i / fps` for `i` in `0..count`.
pub fn frame_times(fps: f64, count: usize) -> SceneResult<Vec<f64>> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(SceneError::validation(format!("fps must be finite and > 0, got {fps}")));
    }
    Ok((0..count).map(|i| i as f64 / fps).collect())
}

fn build_thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SceneError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SceneError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
