//! Error types for scene loading, configuration and output.

use thiserror::Error;

/// Errors that can occur before or around rendering.
///
/// Geometric degeneracies (parallel rays, escaped paths, depth exhaustion)
/// are not errors; they show up as misses and black samples.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both dimensions must be positive")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid max depth: at least one bounce is required")]
    InvalidMaxDepth,

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Failed to allocate accumulation buffer for {pixels} pixels")]
    Allocation {
        pixels: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("Frame has {actual} samples, buffer has {expected} pixels")]
    FrameSize { expected: usize, actual: usize },

    #[error("Scene has no planes")]
    EmptyScene,

    #[error("Invalid plane {index}: {reason}")]
    InvalidPlane { index: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    SceneParse(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
