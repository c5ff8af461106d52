//! Convolution operations
//!
//! - [`convolve_3x3`]: fixed 3×3 window over interior pixels; the outermost
//!   ring of pixels keeps its source values
//! - [`convolve`]: arbitrary odd-sized [`Kernel`] with replicate (clamp)
//!   border handling
//! - [`gaussian_blur`]: separable Gaussian with replicate borders
//! - [`blur`]: repeated 1-2-1 smoothing
//!
//! Every channel is filtered, alpha included. Integer results are rounded
//! and clamped to the format range; float results are not clamped.

use crate::kernel::{BLUR_3X3, Matrix3, check_sigma, gaussian_taps};
use crate::{FilterError, FilterResult, Kernel};
use pixform_core::{Image, Sample, alloc_samples, copy_samples, with_samples};

/// Dimensions shared by the sample loops.
#[derive(Clone, Copy)]
struct Plane {
    w: usize,
    h: usize,
    nc: usize,
}

impl Plane {
    fn of(image: &Image) -> Self {
        Self {
            w: image.width() as usize,
            h: image.height() as usize,
            nc: image.channels() as usize,
        }
    }
}

fn check_filterable(image: &Image, operation: &'static str) -> FilterResult<()> {
    image.ensure_live()?;
    image.ensure_arithmetic(operation)?;
    Ok(())
}

/// Convolve interior pixels with a 3×3 matrix.
///
/// For every pixel not on the outer ring and every channel,
/// `out = scale * Σ kernel[i][j] * src[y + i - 1][x + j - 1] + bias`.
/// The result is built in a new buffer from the unmodified source, then
/// swapped in.
///
/// # Errors
///
/// - [`FilterError::ImageTooSmall`] if width or height is below 3
/// - `InvalidArgument` for non-finite `scale`, `bias` or weights
/// - `UnsupportedFormat` for palette-indexed images
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_filter::convolve_3x3;
///
/// let mut px = vec![0u8; 9];
/// px[4] = 90;
/// let mut img = Image::from_samples(3, 3, PixelFormat::Gray8, px).unwrap();
/// let ones = [[1.0; 3]; 3];
/// convolve_3x3(&mut img, &ones, 1.0 / 9.0, 0.0).unwrap();
/// assert_eq!(img.sample(1, 1, 0), Some(10.0));
/// ```
pub fn convolve_3x3(
    image: &mut Image,
    kernel: &Matrix3,
    scale: f32,
    bias: f32,
) -> FilterResult<()> {
    check_filterable(image, "convolve 3x3")?;
    if !(scale.is_finite() && bias.is_finite() && kernel.iter().flatten().all(|k| k.is_finite()))
    {
        return Err(FilterError::InvalidParameters(format!(
            "non-finite convolution parameters (scale {}, bias {})",
            scale, bias
        )));
    }
    check_window(image, 3)?;

    let plane = Plane::of(image);
    let data = with_samples!(image.data(), src => {
        convolve_3x3_samples(src, plane, kernel, scale, bias).map(Sample::into_buffer)
    })?;
    image.replace_samples(data)?;
    Ok(())
}

fn check_window(image: &Image, min: u32) -> FilterResult<()> {
    if image.width() < min || image.height() < min {
        return Err(FilterError::ImageTooSmall {
            width: image.width(),
            height: image.height(),
            min,
        });
    }
    Ok(())
}

fn convolve_3x3_samples<T: Sample>(
    src: &[T],
    p: Plane,
    kernel: &Matrix3,
    scale: f32,
    bias: f32,
) -> pixform_core::Result<Vec<T>> {
    let mut out = copy_samples(src)?;
    let stride = p.w * p.nc;
    for y in 1..p.h - 1 {
        for x in 1..p.w - 1 {
            for c in 0..p.nc {
                let mut sum = 0.0f32;
                for (i, row) in kernel.iter().enumerate() {
                    let base = (y + i - 1) * stride + c;
                    for (j, k) in row.iter().enumerate() {
                        sum += k * src[base + (x + j - 1) * p.nc].to_f32();
                    }
                }
                out[y * stride + x * p.nc + c] = T::from_f32(scale * sum + bias);
            }
        }
    }
    Ok(out)
}

/// Largest number of smoothing passes [`blur`] accepts.
pub const MAX_BLUR_PASSES: u32 = 1024;

/// Smooth with the 1-2-1 kernel (`[[1,2,1],[2,4,2],[1,2,1]] / 16`).
///
/// `radius` selects the number of passes, `max(1, floor(radius))`, up to
/// [`MAX_BLUR_PASSES`].
///
/// # Errors
///
/// - `InvalidArgument` if `radius` is not positive, selects more than
///   [`MAX_BLUR_PASSES`] passes, or the image is smaller than 3×3
/// - `UnsupportedFormat` for palette-indexed images
pub fn blur(image: &mut Image, radius: f32) -> FilterResult<()> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "blur radius must be positive, got {}",
            radius
        )));
    }
    if radius.floor() > MAX_BLUR_PASSES as f32 {
        return Err(FilterError::InvalidParameters(format!(
            "blur radius {} exceeds {} passes",
            radius, MAX_BLUR_PASSES
        )));
    }
    let passes = (radius.floor() as u32).max(1);
    log::trace!("blur radius {} -> {} passes", radius, passes);
    for _ in 0..passes {
        convolve_3x3(image, &BLUR_3X3, 1.0 / 16.0, 0.0)?;
    }
    Ok(())
}

/// Convolve with an arbitrary odd-sized kernel.
///
/// Uses replicate (clamp) border handling: samples outside the image are
/// taken from the nearest edge pixel, so every pixel is filtered.
pub fn convolve(image: &mut Image, kernel: &Kernel) -> FilterResult<()> {
    check_filterable(image, "convolve")?;
    let plane = Plane::of(image);
    let data = with_samples!(image.data(), src => {
        convolve_clamped(src, plane, kernel).map(Sample::into_buffer)
    })?;
    image.replace_samples(data)?;
    Ok(())
}

fn convolve_clamped<T: Sample>(
    src: &[T],
    p: Plane,
    kernel: &Kernel,
) -> pixform_core::Result<Vec<T>> {
    let mut out = alloc_samples::<T>(src.len())?;
    let kw = kernel.width() as i64;
    let kh = kernel.height() as i64;
    let kcx = kernel.center_x() as i64;
    let kcy = kernel.center_y() as i64;
    let weights = kernel.data();
    let (w, h) = (p.w as i64, p.h as i64);

    for y in 0..h {
        for x in 0..w {
            for c in 0..p.nc {
                let mut sum = 0.0f32;
                for ky in 0..kh {
                    let sy = (y + ky - kcy).clamp(0, h - 1) as usize;
                    for kx in 0..kw {
                        let sx = (x + kx - kcx).clamp(0, w - 1) as usize;
                        let k = weights[(ky * kw + kx) as usize];
                        sum += k * src[(sy * p.w + sx) * p.nc + c].to_f32();
                    }
                }
                out[(y as usize * p.w + x as usize) * p.nc + c] = T::from_f32(sum);
            }
        }
    }
    Ok(out)
}

/// Gaussian blur with standard deviation `sigma`.
///
/// Runs a horizontal then a vertical 1D pass with half-width `ceil(3σ)`
/// and replicate borders. The half-width is limited to the larger image
/// dimension. Intermediate values are kept in `f32`.
///
/// # Errors
///
/// - `InvalidArgument` if `sigma` is not positive and finite
/// - `UnsupportedFormat` for palette-indexed images
pub fn gaussian_blur(image: &mut Image, sigma: f32) -> FilterResult<()> {
    check_sigma(sigma)?;
    check_filterable(image, "gaussian blur")?;
    let reach = image.width().max(image.height()) as f64;
    let half = (3.0 * sigma as f64).ceil().min(reach) as usize;
    let weights = gaussian_taps(half, sigma)?;
    log::trace!("gaussian blur sigma {} with {} taps", sigma, weights.len());

    let plane = Plane::of(image);
    let data = with_samples!(image.data(), src => {
        separable_pass(src, plane, &weights).map(Sample::into_buffer)
    })?;
    image.replace_samples(data)?;
    Ok(())
}

fn separable_pass<T: Sample>(
    src: &[T],
    p: Plane,
    weights: &[f32],
) -> pixform_core::Result<Vec<T>> {
    let half = (weights.len() / 2) as i64;
    let (w, h) = (p.w as i64, p.h as i64);

    let mut tmp = alloc_samples::<f32>(src.len())?;
    for y in 0..p.h {
        for x in 0..w {
            for c in 0..p.nc {
                let mut sum = 0.0f32;
                for (i, k) in weights.iter().enumerate() {
                    let sx = (x + i as i64 - half).clamp(0, w - 1) as usize;
                    sum += k * src[(y * p.w + sx) * p.nc + c].to_f32();
                }
                tmp[(y * p.w + x as usize) * p.nc + c] = sum;
            }
        }
    }

    let mut out = alloc_samples::<T>(src.len())?;
    for y in 0..h {
        for x in 0..p.w {
            for c in 0..p.nc {
                let mut sum = 0.0f32;
                for (i, k) in weights.iter().enumerate() {
                    let sy = (y + i as i64 - half).clamp(0, h - 1) as usize;
                    sum += k * tmp[(sy * p.w + x) * p.nc + c];
                }
                out[(y as usize * p.w + x) * p.nc + c] = T::from_f32(sum);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::{ErrorKind, PixelFormat};

    fn spike(format: PixelFormat, value: f32) -> Image {
        let mut img = Image::new(3, 3, format).unwrap();
        img.set_sample(1, 1, 0, value).unwrap();
        img
    }

    #[test]
    fn test_blur_spike() {
        let mut img = spike(PixelFormat::Gray8, 16.0);
        blur(&mut img, 1.0).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 0, 0, 0, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_blur_passes() {
        // 5x5 constant stays constant through any number of passes
        let mut img = Image::from_samples(5, 5, PixelFormat::Gray16, vec![1000u16; 25]).unwrap();
        blur(&mut img, 3.7).unwrap();
        assert!(img.samples::<u16>().unwrap().iter().all(|&v| v == 1000));
    }

    #[test]
    fn test_blur_rejects_bad_input() {
        let mut img = Image::new(2, 2, PixelFormat::Gray8).unwrap();
        let err = blur(&mut img, 1.0).unwrap_err();
        assert!(matches!(err, FilterError::ImageTooSmall { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut img = Image::new(4, 4, PixelFormat::Gray8).unwrap();
        assert!(blur(&mut img, 0.0).is_err());
        assert!(blur(&mut img, -2.0).is_err());

        let mut img = Image::new(4, 4, PixelFormat::Indexed8).unwrap();
        let err = blur(&mut img, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_convolve_3x3_keeps_border() {
        let values: Vec<u8> = (0..16).map(|v| v * 10).collect();
        let src = Image::from_samples(4, 4, PixelFormat::Gray8, values).unwrap();
        let mut img = src.clone();
        convolve_3x3(&mut img, &[[0.0; 3]; 3], 1.0, 7.0).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let interior = (1..3).contains(&x) && (1..3).contains(&y);
                let expected = if interior { 7.0 } else { src.sample(x, y, 0).unwrap() };
                assert_eq!(img.sample(x, y, 0), Some(expected));
            }
        }
    }

    #[test]
    fn test_convolve_3x3_float_unclamped() {
        let mut img = spike(PixelFormat::Float32, 1.0);
        convolve_3x3(&mut img, &crate::kernel::EDGE_3X3, -1.0, 0.0).unwrap();
        assert_eq!(img.sample(1, 1, 0), Some(-8.0));
    }

    #[test]
    fn test_convolve_identity_kernel() {
        let values: Vec<u8> = (0..24).collect();
        let src = Image::from_samples(4, 2, PixelFormat::Rgb24, values).unwrap();
        let mut img = src.clone();
        let identity = Kernel::from_slice(3, 3, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        convolve(&mut img, &identity).unwrap();
        assert_eq!(img, src);
    }

    #[test]
    fn test_convolve_clamps_at_edges() {
        // Box filter over a step: edge pixels see replicated neighbours.
        let src = Image::from_samples(3, 1, PixelFormat::Gray8, vec![0u8, 0, 90]).unwrap();
        let mut img = src.clone();
        let k = Kernel::from_slice(3, 1, &[1.0 / 3.0; 3]).unwrap();
        convolve(&mut img, &k).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 30, 60]);
    }

    #[test]
    fn test_blur_pass_limit() {
        let mut img = spike(PixelFormat::Gray8, 16.0);
        let err = blur(&mut img, 1e30).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(blur(&mut img, (MAX_BLUR_PASSES + 1) as f32).is_err());
        assert_eq!(img.sample(1, 1, 0), Some(16.0));
        blur(&mut img, MAX_BLUR_PASSES as f32 + 0.5).unwrap();
    }

    #[test]
    fn test_gaussian_blur_large_sigma() {
        // Taps are limited to the image; all nearly equal at this sigma
        let mut img = spike(PixelFormat::Gray8, 70.0);
        gaussian_blur(&mut img, 20000.0).unwrap();
        assert!(img.samples::<u8>().unwrap().iter().all(|&v| v == 1));

        let mut img = spike(PixelFormat::Float32, 1.0);
        gaussian_blur(&mut img, f32::MAX).unwrap();
        assert!(img.samples::<f32>().unwrap().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_gaussian_blur_tiny_sigma_is_identity() {
        let src = Image::from_samples(3, 2, PixelFormat::Gray8, vec![1u8, 50, 9, 200, 0, 33])
            .unwrap();
        let mut img = src.clone();
        gaussian_blur(&mut img, 1e-30).unwrap();
        assert_eq!(img, src);
    }

    #[test]
    fn test_gaussian_blur_constant() {
        let mut img = Image::from_samples(6, 4, PixelFormat::Gray8, vec![77u8; 24]).unwrap();
        gaussian_blur(&mut img, 1.5).unwrap();
        assert!(img.samples::<u8>().unwrap().iter().all(|&v| v == 77));
        assert!(gaussian_blur(&mut img, 0.0).is_err());
    }
}
