//! Error types for pixform-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every variant maps onto one of four categories exposed through
//! [`ErrorKind`], which the domain crates reuse for their own errors.

use crate::format::PixelFormat;
use thiserror::Error;

/// Broad failure category shared by every pixform crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: zero-sized or released image, bad index, bad parameter,
    /// mismatched images
    InvalidArgument,
    /// A rectangle does not fit inside its target
    OutOfBounds,
    /// A buffer could not be allocated, or its size overflows
    AllocationFailure,
    /// The operation has no defined behavior for the image's format
    UnsupportedFormat,
}

/// pixform-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Buffer size does not fit in `usize`
    #[error("image size overflows: {width}x{height} {format}")]
    SizeOverflow {
        width: u32,
        height: u32,
        format: PixelFormat,
    },

    /// Memory allocation failed
    #[error("memory allocation failed: {0} elements")]
    AllocationFailed(usize),

    /// The image buffer was released
    #[error("image has been released")]
    Released,

    /// Buffer element type does not match the format
    #[error("buffer of {actual} samples cannot back a {format} image")]
    BufferKindMismatch {
        format: PixelFormat,
        actual: &'static str,
    },

    /// Buffer length does not match dimensions and format
    #[error("buffer length mismatch: expected {expected} elements, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Pixel coordinate out of bounds
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Two images differ in size or format
    #[error("incompatible images: {0}x{1} {2} vs {3}x{4} {5}")]
    IncompatibleImages(u32, u32, PixelFormat, u32, u32, PixelFormat),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation not defined for this format
    #[error("unsupported format {format} for {operation}")]
    UnsupportedFormat {
        format: PixelFormat,
        operation: &'static str,
    },
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDimension { .. }
            | Error::Released
            | Error::BufferKindMismatch { .. }
            | Error::BufferLengthMismatch { .. }
            | Error::IndexOutOfBounds { .. }
            | Error::IncompatibleImages(..)
            | Error::InvalidParameter(_) => ErrorKind::InvalidArgument,
            Error::PixelOutOfBounds { .. } => ErrorKind::OutOfBounds,
            Error::SizeOverflow { .. } | Error::AllocationFailed(_) => ErrorKind::AllocationFailure,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
        }
    }
}

/// Result type alias for pixform-core operations
pub type Result<T> = std::result::Result<T, Error>;
