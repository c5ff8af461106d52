//! pixform - Multi-format pixel transform and analysis engine
//!
//! One image container, eleven pixel formats, and a set of in-place
//! operations that behave the same way on every format they accept.
//!
//! # Overview
//!
//! - [`transform`]: resize, crop, flip, rotate, blend, composite
//! - [`color`]: brightness, contrast, gamma, HSV, channel swap,
//!   grayscale, levels
//! - [`filter`]: 3×3 convolution and derived filters, kernel convolution
//! - [`analysis`]: histogram, mean/stddev, brightness, contrast, Sobel
//!   edge map, entropy
//!
//! # Example
//!
//! ```
//! use pixform::{Image, PixelFormat};
//!
//! let mut img = Image::new(64, 48, PixelFormat::Rgba32).unwrap();
//! pixform::transform::resize(&mut img, 32, 24, pixform::transform::ResizeMethod::Bilinear)
//!     .unwrap();
//! pixform::color::grayscale(&mut img).unwrap();
//! assert_eq!(img.format(), PixelFormat::Gray8);
//! assert_eq!(img.byte_size(), 32 * 24);
//! ```

// Re-export core types (the image container and format table)
pub use pixform_core::*;

// Re-export operation crates as modules to avoid name conflicts
pub use pixform_analysis as analysis;
pub use pixform_color as color;
pub use pixform_filter as filter;
pub use pixform_transform as transform;
