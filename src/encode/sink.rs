use std::path::{Path, PathBuf};

use crate::foundation::error::{SceneError, SceneResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Width in pixels of the first frame.
    pub width: u32,
    /// Height in pixels of the first frame.
    pub height: u32,
    /// Pixel density the frames were rendered at.
    pub density: f64,
}

/// Position of a pushed frame in the stream.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FrameStamp {
    /// 0-based index among frames actually pushed (skipped ticks do not consume an index).
    pub index: u64,
    /// Seconds since the first frame.
    pub elapsed: f64,
}

/// Consumer of rendered frames in presentation order.
///
/// Ordering contract: `push_frame` is called with strictly increasing `index` and non-decreasing
/// `elapsed`. Frame sizes may change between pushes when the viewport is resized.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()>;
    fn push_frame(&mut self, stamp: FrameStamp, frame: &FrameRGBA) -> SceneResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SceneResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameStamp, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    pub fn frames(&self) -> &[(FrameStamp, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, stamp: FrameStamp, frame: &FrameRGBA) -> SceneResult<()> {
        self.frames.push((stamp, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every frame as `<prefix>_<index>.png` (straight alpha) into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_owned(),
            written: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}_{index:05}.png", self.prefix))
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SceneError::encode(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        tracing::debug!(dir = %self.dir.display(), width = cfg.width, height = cfg.height, "png sequence started");
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, stamp: FrameStamp, frame: &FrameRGBA) -> SceneResult<()> {
        let path = self.frame_path(stamp.index);
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        tracing::debug!(frames = self.written.len(), "png sequence finished");
        Ok(())
    }
}

/// Save one frame as a straight-alpha PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> SceneResult<()> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(SceneError::encode(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| SceneError::encode(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
