//! Error types for pixform-transform

use pixform_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixform_core::Error),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A rectangle does not fit inside the target image
    #[error("region {w}x{h} at ({x}, {y}) exceeds {width}x{height} image")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },
}

impl TransformError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::Core(e) => e.kind(),
            TransformError::InvalidParameters(_) => ErrorKind::InvalidArgument,
            TransformError::RegionOutOfBounds { .. } => ErrorKind::OutOfBounds,
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
