//! pixform-filter - Convolution filters
//!
//! This crate provides neighbourhood filters on [`pixform_core::Image`]:
//!
//! - 3×3 convolution over interior pixels, with the border ring unchanged
//! - Derived filters: blur, sharpen, edge, emboss
//! - Arbitrary odd-sized [`Kernel`] convolution and Gaussian blur with
//!   replicate borders
//!
//! Palette-indexed images are rejected with `UnsupportedFormat`.

pub mod convolve;
mod edge;
mod error;
pub mod kernel;

pub use convolve::{MAX_BLUR_PASSES, blur, convolve, convolve_3x3, gaussian_blur};
pub use edge::{edge, emboss, sharpen};
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, Matrix3};
