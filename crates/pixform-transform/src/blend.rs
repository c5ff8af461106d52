//! Blending and compositing
//!
//! - [`blend`] mixes two images of identical size and format
//! - [`composite`] mixes a smaller overlay into a region of a larger image
//!
//! Both compute `(1 - a) * dst + a * src` per element; integer results are
//! rounded and clamped to the format range.

use crate::{TransformError, TransformResult};
use pixform_core::{Error, Image, Sample, with_sample_pair};

fn check_ratio(name: &str, value: f32) -> TransformResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(TransformError::InvalidParameters(format!(
            "{} {} outside [0, 1]",
            name, value
        )));
    }
    Ok(())
}

#[inline]
fn mix<T: Sample>(d: T, s: T, a: f32) -> T {
    T::from_f32((1.0 - a) * d.to_f32() + a * s.to_f32())
}

/// Blend `src` into `dst`: `dst = (1 - ratio) * dst + ratio * src`.
///
/// # Errors
///
/// - `InvalidArgument` if the images differ in size or format, or `ratio`
///   is outside `[0, 1]`
/// - `UnsupportedFormat` for palette-indexed images
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_transform::blend;
///
/// let mut dst = Image::from_samples(1, 1, PixelFormat::Gray8, vec![0u8]).unwrap();
/// let src = Image::from_samples(1, 1, PixelFormat::Gray8, vec![200u8]).unwrap();
/// blend(&mut dst, &src, 0.25).unwrap();
/// assert_eq!(dst.samples::<u8>().unwrap(), &[50]);
/// ```
pub fn blend(dst: &mut Image, src: &Image, ratio: f32) -> TransformResult<()> {
    dst.ensure_live()?;
    src.ensure_live()?;
    check_ratio("blend ratio", ratio)?;
    dst.ensure_same_layout(src)?;
    dst.ensure_arithmetic("blend")?;

    let done = with_sample_pair!(dst.data_mut(), src.data(), d, s => {
        for (dv, sv) in d.iter_mut().zip(s) {
            *dv = mix(*dv, *sv, ratio);
        }
    });
    done.ok_or_else(|| mismatch(dst, src))?;
    Ok(())
}

/// Composite `overlay` onto `dst` with its top-left corner at `(x, y)`.
///
/// Only the pixels under the overlay change; every channel, alpha
/// included, is mixed with weight `alpha`.
///
/// # Errors
///
/// - `InvalidArgument` if the formats differ or `alpha` is outside `[0, 1]`
/// - [`TransformError::RegionOutOfBounds`] if the overlay does not fit
///   inside `dst` at `(x, y)`
/// - `UnsupportedFormat` for palette-indexed images
pub fn composite(
    dst: &mut Image,
    overlay: &Image,
    x: u32,
    y: u32,
    alpha: f32,
) -> TransformResult<()> {
    dst.ensure_live()?;
    overlay.ensure_live()?;
    check_ratio("composite alpha", alpha)?;
    if dst.format() != overlay.format() {
        return Err(mismatch(dst, overlay).into());
    }
    dst.ensure_arithmetic("composite")?;

    let (ow, oh) = (overlay.width(), overlay.height());
    let fits_x = x.checked_add(ow).is_some_and(|r| r <= dst.width());
    let fits_y = y.checked_add(oh).is_some_and(|b| b <= dst.height());
    if !fits_x || !fits_y {
        return Err(TransformError::RegionOutOfBounds {
            x,
            y,
            w: ow,
            h: oh,
            width: dst.width(),
            height: dst.height(),
        });
    }

    let nc = dst.channels() as usize;
    let dst_stride = dst.width() as usize * nc;
    let row_len = ow as usize * nc;
    let start = y as usize * dst_stride + x as usize * nc;

    let done = with_sample_pair!(dst.data_mut(), overlay.data(), d, s => {
        for (row, src_row) in s.chunks_exact(row_len).enumerate() {
            let offset = start + row * dst_stride;
            for (dv, sv) in d[offset..offset + row_len].iter_mut().zip(src_row) {
                *dv = mix(*dv, *sv, alpha);
            }
        }
    });
    done.ok_or_else(|| mismatch(dst, overlay))?;
    Ok(())
}

fn mismatch(a: &Image, b: &Image) -> Error {
    Error::IncompatibleImages(
        a.width(),
        a.height(),
        a.format(),
        b.width(),
        b.height(),
        b.format(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::{ErrorKind, PixelFormat};

    #[test]
    fn test_blend_rounds() {
        let mut dst = Image::from_samples(2, 1, PixelFormat::Gray16, vec![0u16, 65535]).unwrap();
        let src = Image::from_samples(2, 1, PixelFormat::Gray16, vec![3u16, 0]).unwrap();
        blend(&mut dst, &src, 0.5).unwrap();
        assert_eq!(dst.samples::<u16>().unwrap(), &[2, 32768]);
    }

    #[test]
    fn test_blend_rejects_mismatch() {
        let mut dst = Image::new(2, 2, PixelFormat::Rgb24).unwrap();
        let src = Image::new(2, 2, PixelFormat::Rgb48).unwrap();
        let err = blend(&mut dst, &src, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let src = Image::new(2, 3, PixelFormat::Rgb24).unwrap();
        assert!(blend(&mut dst, &src, 0.5).is_err());
        let src = Image::new(2, 2, PixelFormat::Rgb24).unwrap();
        assert!(blend(&mut dst, &src, 1.5).is_err());
        assert!(blend(&mut dst, &src, f32::NAN).is_err());
    }

    #[test]
    fn test_blend_indexed_unsupported() {
        let mut dst = Image::new(2, 2, PixelFormat::Indexed8).unwrap();
        let src = Image::new(2, 2, PixelFormat::Indexed8).unwrap();
        let err = blend(&mut dst, &src, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_composite_region_only() {
        let mut dst = Image::from_samples(3, 2, PixelFormat::Gray8, vec![10u8; 6]).unwrap();
        let overlay = Image::from_samples(2, 1, PixelFormat::Gray8, vec![110u8, 210]).unwrap();
        composite(&mut dst, &overlay, 1, 1, 0.5).unwrap();
        assert_eq!(dst.samples::<u8>().unwrap(), &[10, 10, 10, 10, 60, 110]);
    }

    #[test]
    fn test_composite_out_of_bounds() {
        let mut dst = Image::new(3, 3, PixelFormat::Rgba32).unwrap();
        let overlay = Image::new(2, 2, PixelFormat::Rgba32).unwrap();
        let err = composite(&mut dst, &overlay, 2, 0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        composite(&mut dst, &overlay, 1, 1, 1.0).unwrap();
    }
}
