//! Error types for pixform-color

use pixform_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixform_core::Error),

    /// Channel index outside the pixel
    #[error("channel {index} out of range for {channels}-channel image")]
    InvalidChannel { index: u32, channels: u32 },

    /// Operation needs more channels than the image has
    #[error("{operation} needs at least {required} channels, image has {actual}")]
    TooFewChannels {
        operation: &'static str,
        required: u32,
        actual: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl ColorError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ColorError::Core(e) => e.kind(),
            ColorError::InvalidChannel { .. }
            | ColorError::TooFewChannels { .. }
            | ColorError::InvalidParameters(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
