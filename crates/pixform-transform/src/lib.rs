//! pixform-transform - Geometric transformations for pixform
//!
//! This crate provides geometric operations on [`pixform_core::Image`]:
//!
//! - Resizing (nearest-neighbor, bilinear)
//! - Cropping to a rectangle
//! - Horizontal and vertical flips
//! - Rotation about the center with a configurable canvas policy
//! - Blending two images and compositing an overlay
//!
//! All operations work in place. Those that change dimensions build the
//! complete new buffer before the image is updated, so a failed call
//! leaves the image as it was.

mod blend;
mod crop;
mod error;
pub mod resize;
pub mod rotate;

pub use blend::{blend, composite};
pub use crop::crop;
pub use error::{TransformError, TransformResult};
pub use resize::{ResizeMethod, resize};
pub use rotate::{RotateOptions, flip, flip_horizontal, flip_vertical, rotate, rotate_with};
