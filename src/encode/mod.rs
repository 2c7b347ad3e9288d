//! Frame sinks.
//!
//! Sinks consume rendered frames in presentation order, either from the frame loop or from a
//! batch render.

/// Generic frame sink trait and built-in sinks.
pub mod sink;
