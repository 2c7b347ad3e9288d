use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::foundation::core::Viewport;
use crate::foundation::error::SceneResult;

#[derive(Debug, Default)]
struct Slot {
    viewport: Option<Viewport>,
    generation: u64,
}

/// Create the viewport cell. The writer belongs to the resize observer; readers go to the
/// frame loop and anything else that needs the current size.
pub fn viewport_channel() -> (ViewportWriter, ViewportReader) {
    let slot = Arc::new(Mutex::new(Slot::default()));
    (
        ViewportWriter {
            slot: Arc::clone(&slot),
        },
        ViewportReader { slot },
    )
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sole writer of the viewport cell. Last write wins.
#[derive(Debug)]
pub struct ViewportWriter {
    slot: Arc<Mutex<Slot>>,
}

impl ViewportWriter {
    pub fn publish(&self, viewport: Viewport) {
        let mut slot = lock(&self.slot);
        slot.viewport = Some(viewport);
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Handle a container measurement.
    ///
    /// `None` width means the container is not measurable yet and nothing is published. Height
    /// follows from the width at 16:9; a missing density is 1.
    pub fn observe(&self, width: Option<f64>, density: Option<f64>) -> SceneResult<Option<Viewport>> {
        let Some(width) = width else {
            tracing::debug!("container not measured; viewport unchanged");
            return Ok(None);
        };
        let viewport = Viewport::from_width(width, density.unwrap_or(1.0))?;
        self.publish(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            density = viewport.density,
            "viewport observed"
        );
        Ok(Some(viewport))
    }

    /// Return the cell to the "not measured" state.
    pub fn invalidate(&self) {
        let mut slot = lock(&self.slot);
        slot.viewport = None;
        slot.generation = slot.generation.wrapping_add(1);
    }
}

/// Read handle onto the viewport cell.
#[derive(Clone, Debug)]
pub struct ViewportReader {
    slot: Arc<Mutex<Slot>>,
}

impl ViewportReader {
    pub fn get(&self) -> Option<Viewport> {
        lock(&self.slot).viewport
    }

    /// Counter bumped on every write.
    pub fn generation(&self) -> u64 {
        lock(&self.slot).generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/viewport.rs"]
mod tests;
