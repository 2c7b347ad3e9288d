//! Frame clocks and the frame loop they drive.
//!
//! The scene itself is a pure function of elapsed time and viewport. This module is the host
//! side: clocks decide *when* to render, the viewport cell carries size measurements from a
//! resize observer, and [`frame_loop::FrameLoop`] glues both to a backend and a sink.

/// The injected clock abstraction and its deterministic and real-time implementations.
pub mod source;

/// Single-writer viewport cell shared between a resize observer and the frame loop.
pub mod viewport;

/// Per-tick render driver with baseline tracking and teardown.
pub mod frame_loop;
