//! Error types for the rendering pipeline.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Which list of a model an index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    Color,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Vertex => write!(f, "vertex"),
            IndexKind::Color => write!(f, "color"),
        }
    }
}

/// Errors produced while building scenes, rendering, or exporting frames.
#[derive(Error, Debug)]
pub enum Error {
    /// Framebuffer or viewport with a zero dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Viewport rectangle that does not fit inside its framebuffer.
    #[error("viewport {width}x{height} at ({x}, {y}) exceeds {fb_width}x{fb_height} framebuffer")]
    InvalidViewport {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        fb_width: u32,
        fb_height: u32,
    },

    /// Camera parameters that cannot describe a view volume.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    /// Primitive refers past the end of its model's vertex or color list.
    #[error("model '{model}': {kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        model: String,
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    /// Handle that does not name a model in this scene.
    #[error("unknown model handle {0}")]
    UnknownModel(usize),

    /// Handle that does not name a position in this scene.
    #[error("unknown position handle {0}")]
    UnknownPosition(usize),

    /// Pixel write outside the target viewport.
    #[error("pixel ({x}, {y}) outside {width}x{height} viewport")]
    PixelOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Malformed PPM input.
    #[error("PPM decode error: {0}")]
    PpmDecode(String),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
