//! Rotation and flip operations
//!
//! This module provides:
//! - Horizontal and vertical flips (in place, from a temporary copy)
//! - Rotation by an arbitrary angle about the image center
//!
//! # Rotation
//!
//! Positive angles rotate clockwise as displayed (y axis pointing down).
//! Every destination pixel is mapped back into the source and takes the
//! nearest source pixel; destinations that map outside the source stay
//! zero (black, fully transparent).
//!
//! By default the canvas grows to the rotated bounding box, so no source
//! pixel is lost. [`RotateOptions::keep_size`] keeps the original canvas
//! and clips the corners instead.

use crate::TransformResult;
use pixform_core::{Image, Sample, alloc_samples, copy_samples, with_samples, with_samples_mut};

// ============================================================================
// Constants
// ============================================================================

/// Sines and cosines closer than this to 0 or ±1 are snapped, so quarter
/// turns map pixel centers exactly.
const SNAP_EPSILON: f64 = 1e-12;

/// Slack subtracted before rounding a rotated extent up to whole pixels.
const EXTENT_EPSILON: f64 = 1e-6;

// ============================================================================
// Flip
// ============================================================================

/// Reflect an image in place.
///
/// `horizontal` mirrors left and right, `vertical` mirrors top and bottom;
/// both together reflect through the center. Works for every format.
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_transform::flip;
///
/// let mut img = Image::from_samples(3, 1, PixelFormat::Gray8, vec![1u8, 2, 3]).unwrap();
/// flip(&mut img, true, false).unwrap();
/// assert_eq!(img.samples::<u8>().unwrap(), &[3, 2, 1]);
/// ```
pub fn flip(image: &mut Image, horizontal: bool, vertical: bool) -> TransformResult<()> {
    image.ensure_live()?;
    if !horizontal && !vertical {
        return Ok(());
    }
    let w = image.width() as usize;
    let h = image.height() as usize;
    let nc = image.channels() as usize;
    with_samples_mut!(image.data_mut(), data => {
        flip_samples(data, w, h, nc, horizontal, vertical)
    })?;
    Ok(())
}

/// Mirror left and right.
pub fn flip_horizontal(image: &mut Image) -> TransformResult<()> {
    flip(image, true, false)
}

/// Mirror top and bottom.
pub fn flip_vertical(image: &mut Image) -> TransformResult<()> {
    flip(image, false, true)
}

fn flip_samples<T: Sample>(
    data: &mut [T],
    w: usize,
    h: usize,
    nc: usize,
    horizontal: bool,
    vertical: bool,
) -> pixform_core::Result<()> {
    let src = copy_samples(data)?;
    for y in 0..h {
        let sy = if vertical { h - 1 - y } else { y };
        for x in 0..w {
            let sx = if horizontal { w - 1 - x } else { x };
            let d = (y * w + x) * nc;
            let s = (sy * w + sx) * nc;
            data[d..d + nc].copy_from_slice(&src[s..s + nc]);
        }
    }
    Ok(())
}

// ============================================================================
// Rotation
// ============================================================================

/// Options for [`rotate_with`]
#[derive(Debug, Clone)]
pub struct RotateOptions {
    /// Grow the canvas to the rotated bounding box
    pub expand: bool,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self { expand: true }
    }
}

impl RotateOptions {
    /// Keep the original canvas size, clipping rotated corners.
    pub fn keep_size() -> Self {
        Self { expand: false }
    }

    /// Set whether to expand output dimensions
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }
}

/// Rotate an image clockwise by `degrees` about its center, growing the
/// canvas to fit.
///
/// Equivalent to [`rotate_with`] with default options.
pub fn rotate(image: &mut Image, degrees: f32) -> TransformResult<()> {
    rotate_with(image, degrees, &RotateOptions::default())
}

/// Rotate an image clockwise by `degrees` about its center.
///
/// # Arguments
///
/// * `image` - Image to rotate; any format
/// * `degrees` - Clockwise angle; non-finite angles are rejected
/// * `options` - Canvas policy
///
/// # Errors
///
/// - `InvalidArgument` for a non-finite angle
/// - `AllocationFailure` if the new buffer cannot be allocated
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_transform::{RotateOptions, rotate_with};
///
/// let mut img = Image::new(4, 2, PixelFormat::Rgb24).unwrap();
/// rotate_with(&mut img, 90.0, &RotateOptions::default()).unwrap();
/// assert_eq!((img.width(), img.height()), (2, 4));
/// ```
pub fn rotate_with(
    image: &mut Image,
    degrees: f32,
    options: &RotateOptions,
) -> TransformResult<()> {
    image.ensure_live()?;
    if !degrees.is_finite() {
        return Err(crate::TransformError::InvalidParameters(format!(
            "rotation angle {} is not finite",
            degrees
        )));
    }

    let (sin, cos) = snapped_sin_cos(degrees as f64);
    if sin == 0.0 && cos == 1.0 {
        return Ok(());
    }

    let w = image.width();
    let h = image.height();
    let (nw, nh) = if options.expand {
        rotated_extent(w, h, sin, cos)
    } else {
        (w, h)
    };
    log::debug!(
        "rotate {}: {}x{} -> {}x{} (expand={})",
        degrees,
        w,
        h,
        nw,
        nh,
        options.expand
    );

    let format = image.format();
    let count = pixform_core::element_count(nw, nh, format)?;
    let mapping = Mapping {
        w: w as usize,
        h: h as usize,
        nw: nw as usize,
        nh: nh as usize,
        nc: format.channels() as usize,
        sin,
        cos,
    };
    let data = with_samples!(image.data(), src => {
        rotate_samples(src, &mapping, count).map(Sample::into_buffer)
    })?;
    image.replace_buffer(nw, nh, format, data)?;
    Ok(())
}

/// Sine and cosine of a clockwise angle, snapped near 0 and ±1.
fn snapped_sin_cos(degrees: f64) -> (f64, f64) {
    let snap = |v: f64| {
        if v.abs() < SNAP_EPSILON {
            0.0
        } else if (v.abs() - 1.0).abs() < SNAP_EPSILON {
            v.signum()
        } else {
            v
        }
    };
    let (s, c) = degrees.rem_euclid(360.0).to_radians().sin_cos();
    (snap(s), snap(c))
}

/// Size of the bounding box of a `w × h` image rotated by (sin, cos).
fn rotated_extent(w: u32, h: u32, sin: f64, cos: f64) -> (u32, u32) {
    let hw = (w as f64 - 1.0) / 2.0;
    let hh = (h as f64 - 1.0) / 2.0;
    let mut minx = f64::MAX;
    let mut maxx = f64::MIN;
    let mut miny = f64::MAX;
    let mut maxy = f64::MIN;
    for (x, y) in [(-hw, -hh), (hw, -hh), (-hw, hh), (hw, hh)] {
        let rx = x * cos - y * sin;
        let ry = x * sin + y * cos;
        minx = minx.min(rx);
        maxx = maxx.max(rx);
        miny = miny.min(ry);
        maxy = maxy.max(ry);
    }
    let nw = (maxx - minx + 1.0 - EXTENT_EPSILON).ceil().max(1.0);
    let nh = (maxy - miny + 1.0 - EXTENT_EPSILON).ceil().max(1.0);
    (nw as u32, nh as u32)
}

/// Inverse mapping from destination to source pixel centers.
struct Mapping {
    w: usize,
    h: usize,
    nw: usize,
    nh: usize,
    nc: usize,
    sin: f64,
    cos: f64,
}

fn rotate_samples<T: Sample>(
    src: &[T],
    m: &Mapping,
    count: usize,
) -> pixform_core::Result<Vec<T>> {
    let mut out = alloc_samples::<T>(count)?;
    let cx = (m.w as f64 - 1.0) / 2.0;
    let cy = (m.h as f64 - 1.0) / 2.0;
    let ncx = (m.nw as f64 - 1.0) / 2.0;
    let ncy = (m.nh as f64 - 1.0) / 2.0;
    let nc = m.nc;

    for y in 0..m.nh {
        let ty = y as f64 - ncy;
        for x in 0..m.nw {
            let tx = x as f64 - ncx;
            let sx = (cx + tx * m.cos + ty * m.sin + 0.5).floor();
            let sy = (cy - tx * m.sin + ty * m.cos + 0.5).floor();
            if sx < 0.0 || sy < 0.0 || sx >= m.w as f64 || sy >= m.h as f64 {
                continue;
            }
            let s = (sy as usize * m.w + sx as usize) * nc;
            let d = (y * m.nw + x) * nc;
            out[d..d + nc].copy_from_slice(&src[s..s + nc]);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::PixelFormat;

    fn gray(w: u32, h: u32, values: &[u8]) -> Image {
        Image::from_samples(w, h, PixelFormat::Gray8, values.to_vec()).unwrap()
    }

    #[test]
    fn test_flip_both_is_180() {
        let mut img = gray(2, 2, &[1, 2, 3, 4]);
        flip(&mut img, true, true).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[4, 3, 2, 1]);
    }

    #[test]
    fn test_flip_vertical_rgb() {
        let px: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let mut img = Image::from_samples(1, 2, PixelFormat::Rgb24, px).unwrap();
        flip_vertical(&mut img).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_quarter_turn_clockwise() {
        // 1 2 3      4 1
        // 4 5 6  ->  5 2
        //            6 3
        let mut img = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        rotate(&mut img, 90.0).unwrap();
        assert_eq!((img.width(), img.height()), (2, 3));
        assert_eq!(img.samples::<u8>().unwrap(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_negative_quarter_turn() {
        let mut img = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        rotate(&mut img, -90.0).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_rotate_half_turn() {
        let mut img = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        rotate(&mut img, 180.0).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let src = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        let mut img = src.clone();
        rotate(&mut img, 360.0).unwrap();
        assert_eq!(img, src);
    }

    #[test]
    fn test_extent() {
        assert_eq!(rotated_extent(4, 2, 1.0, 0.0), (2, 4));
        let (s, c) = snapped_sin_cos(45.0);
        assert_eq!(rotated_extent(2, 2, s, c), (3, 3));
    }
}
