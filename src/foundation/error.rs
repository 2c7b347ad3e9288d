/// Result alias used across the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Error taxonomy for the scene renderer.
///
/// Geometry problems are never reported here: malformed shape inputs are clamped at the
/// primitive level so a frame is never left half painted.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Caller supplied an invalid viewport, time, or option.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing surface could not be created or sized.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Rasterization failed for a specific frame.
    #[error("render error: {0}")]
    Render(String),

    /// A frame sink failed to store or encode a frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other failure, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::SurfaceUnavailable`].
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`SceneError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
