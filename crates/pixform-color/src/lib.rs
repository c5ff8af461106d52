//! pixform-color - Color adjustments
//!
//! This crate provides color operations on [`pixform_core::Image`]:
//!
//! - **Tone**: brightness, contrast, gamma
//! - **Color space**: HSV adjustment, channel swap, grayscale, sepia
//! - **Levels**: invert, threshold, normalize, equalize
//!
//! Every operation modifies the image in place and reports failures as
//! [`ColorError`]; on error the image is unchanged.

mod adjust;
pub mod colorspace;
mod error;
pub mod levels;

pub use adjust::{brightness, contrast, gamma};
pub use colorspace::{Hsv, channel_swap, grayscale, hsv_adjust, hsv_to_rgb, rgb_to_hsv, sepia};
pub use error::{ColorError, ColorResult};
pub use levels::{equalize, invert, normalize, threshold};
