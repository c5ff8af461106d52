//! Fixed-kernel enhancement filters
//!
//! Thin wrappers over [`convolve_3x3`](crate::convolve_3x3); the border
//! ring is left as it was.

use crate::FilterResult;
use crate::convolve::convolve_3x3;
use crate::kernel::{EDGE_3X3, EMBOSS_3X3, SHARPEN_3X3};
use pixform_core::Image;

/// Sharpen with `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
pub fn sharpen(image: &mut Image) -> FilterResult<()> {
    convolve_3x3(image, &SHARPEN_3X3, 1.0, 0.0)
}

/// Highlight edges with `[[-1,-1,-1],[-1,8,-1],[-1,-1,-1]]`.
///
/// Flat regions become 0.
pub fn edge(image: &mut Image) -> FilterResult<()> {
    convolve_3x3(image, &EDGE_3X3, 1.0, 0.0)
}

/// Emboss with `[[-2,-1,0],[-1,1,1],[0,1,2]]`, re-centered on the format
/// midpoint (128, 32768 or 0.5).
pub fn emboss(image: &mut Image) -> FilterResult<()> {
    let bias = image.format().midpoint();
    convolve_3x3(image, &EMBOSS_3X3, 1.0, bias)
}
