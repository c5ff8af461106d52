//! Error types for pixform-filter

use pixform_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixform_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Image smaller than the filter window
    #[error("image {width}x{height} is smaller than the {min}x{min} window")]
    ImageTooSmall { width: u32, height: u32, min: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl FilterError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Core(e) => e.kind(),
            FilterError::InvalidKernel(_)
            | FilterError::ImageTooSmall { .. }
            | FilterError::InvalidParameters(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
