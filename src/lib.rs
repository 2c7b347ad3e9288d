//! A procedurally animated 2D scene: a carpenter in a hard hat walks in place across a
//! farmyard, carrying a plank on one shoulder.
//!
//! Every frame is a pure function of elapsed time and viewport:
//!
//! - [`compose_frame`] turns `(elapsed, viewport)` into a tagged [`DisplayList`]
//! - a [`RenderBackend`] rasterizes the list into a [`FrameRGBA`]
//! - the [`clock`] module drives repeated renders from an injected frame clock into a
//!   [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Time-based oscillators behind the walk cycle.
pub mod animation;
/// Frame clocks, the viewport cell, and the frame loop.
pub mod clock;
/// Frame sinks.
pub mod encode;
/// Rasterization backends and the frame render entry points.
pub mod render;
/// Background, figure dressing, and display-list composition.
pub mod scene;
/// Joint hierarchy and forward kinematics.
pub mod skeleton;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    ASPECT_RATIO, Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Timestamp, Transform2D, Vec2,
    Viewport, clamp_elapsed,
};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::math::Fingerprint;

pub use crate::clock::frame_loop::{FrameLoop, LoopHandle, LoopStats, TickOutcome};
pub use crate::clock::source::{
    CancellationToken, FrameCallback, FrameClock, IntervalClock, SteppedClock,
};
pub use crate::clock::viewport::{ViewportReader, ViewportWriter, viewport_channel};
pub use crate::encode::sink::{
    FrameSink, FrameStamp, InMemorySink, PngSequenceSink, SinkConfig, write_png,
};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{RenderThreading, frame_times, render_frame, render_frames};
pub use crate::scene::compositor::{compose_frame, compose_optional};
pub use crate::scene::display::{DisplayList, DrawOp, OpSummary, Part};
pub use crate::skeleton::pose::Pose;
