//! Error types for pixform-analysis

use pixform_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during image analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixform_core::Error),

    /// Caller-provided histogram buffer is too small
    #[error("histogram needs {needed} bins, buffer holds {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Image smaller than the analysis window
    #[error("image {width}x{height} is smaller than the {min}x{min} window")]
    ImageTooSmall { width: u32, height: u32, min: u32 },
}

impl AnalysisError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Core(e) => e.kind(),
            AnalysisError::BufferTooSmall { .. } | AnalysisError::ImageTooSmall { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
