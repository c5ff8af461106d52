//! pixform-core - Format table and image container
//!
//! This crate provides the data model shared by every pixform crate:
//!
//! - [`PixelFormat`] / [`FormatInfo`] - The format table (channels, element
//!   width, numeric range, capabilities)
//! - [`Sample`] - Element types (`u8`, `u16`, `f32`) with rounding and
//!   clamping conversions
//! - [`PixelBuffer`] - Tagged sample storage, with the
//!   [`with_samples!`] family of dispatch macros
//! - [`Image`] / [`ImageMeta`] - The image container and its passthrough
//!   metadata
//! - [`Error`] / [`ErrorKind`] - Errors and their categories

pub mod buffer;
pub mod error;
pub mod format;
pub mod image;
pub mod sample;

pub use buffer::{PixelBuffer, SamplesMut};
pub use error::{Error, ErrorKind, Result};
pub use format::{ChannelLayout, FORMAT_TABLE, FormatInfo, PixelFormat, SampleKind};
pub use image::{Image, ImageMeta, element_count};
pub use sample::{Sample, alloc_samples, copy_samples};

/// Luminance weights for red, green and blue.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Perceptual luminance of an RGB triple, in the input's units.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Intensity of one pixel's channels: luminance for RGB layouts, the Y
/// channel for YUV, and channel 0 otherwise.
#[inline]
pub fn pixel_intensity(format: PixelFormat, px: &[f32]) -> f32 {
    if format.has_rgb() {
        luminance(px[0], px[1], px[2])
    } else {
        px[0]
    }
}
