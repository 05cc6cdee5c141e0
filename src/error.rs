//! Error types for icon generation

use thiserror::Error;

/// Result type alias for icon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while drawing or writing icons
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to draw into the pixel buffer
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Font descriptor or atlas could not be used
    #[error("Font unavailable: {0}")]
    FontError(String),

    /// PNG encoding or image decoding failed
    #[error("Image codec error: {0}")]
    EncodeError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::EncodeError(err.to_string())
    }
}
