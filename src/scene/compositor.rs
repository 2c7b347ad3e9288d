use crate::foundation::core::{Viewport, clamp_elapsed};
use crate::scene::background::paint_background;
use crate::scene::display::{DisplayList, Painter};
use crate::scene::figure::paint_figure;
use crate::skeleton::pose::Pose;

/// Build the display list for one frame.
///
/// Returns `None` when the viewport cannot be painted (not yet measured, or degenerate); callers
/// treat that as "skip this tick". Negative or non-finite elapsed times are treated as zero.
#[tracing::instrument(level = "trace", skip(viewport))]
pub fn compose_frame(elapsed: f64, viewport: &Viewport) -> Option<DisplayList> {
    if !viewport.is_drawable() {
        tracing::debug!(?viewport, "viewport not drawable; skipping frame");
        return None;
    }
    let elapsed = clamp_elapsed(elapsed);
    let pose = Pose::evaluate(elapsed, viewport);

    // Fresh painter per frame: no transform state survives from the previous one.
    let mut painter = Painter::new();
    painter.set_transform(viewport.device_transform());
    painter.clear(viewport.logical_rect());

    paint_background(&mut painter, viewport, elapsed);
    paint_figure(&mut painter, &pose);

    let ops = painter.finish();
    tracing::trace!(ops = ops.len(), "composed frame");
    Some(DisplayList {
        viewport: *viewport,
        elapsed,
        ops,
    })
}

/// Same as [`compose_frame`], for callers that may not have a measurement yet.
pub fn compose_optional(elapsed: f64, viewport: Option<&Viewport>) -> Option<DisplayList> {
    viewport.and_then(|v| compose_frame(elapsed, v))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compositor.rs"]
mod tests;
