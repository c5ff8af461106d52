//! Rectangular cropping

use crate::{TransformError, TransformResult};
use pixform_core::{Image, Sample, alloc_samples, with_samples};

/// Crop an image in place to the rectangle at `(x, y)` of size `w × h`.
///
/// Rows are copied into a newly sized buffer, which then replaces the old
/// one.
///
/// # Errors
///
/// - [`TransformError::InvalidParameters`] if `w` or `h` is zero
/// - [`TransformError::RegionOutOfBounds`] if the rectangle extends past
///   the image
pub fn crop(image: &mut Image, x: u32, y: u32, w: u32, h: u32) -> TransformResult<()> {
    image.ensure_live()?;
    if w == 0 || h == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "crop size {}x{} must be non-zero",
            w, h
        )));
    }
    let fits_x = x.checked_add(w).is_some_and(|r| r <= image.width());
    let fits_y = y.checked_add(h).is_some_and(|b| b <= image.height());
    if !fits_x || !fits_y {
        return Err(TransformError::RegionOutOfBounds {
            x,
            y,
            w,
            h,
            width: image.width(),
            height: image.height(),
        });
    }

    let format = image.format();
    let count = pixform_core::element_count(w, h, format)?;
    let nc = format.channels() as usize;
    let src_stride = image.width() as usize * nc;
    let row_len = w as usize * nc;
    let x0 = x as usize * nc;

    let data = with_samples!(image.data(), src => {
        copy_rows(src, count, src_stride, row_len, y as usize * src_stride + x0)
            .map(Sample::into_buffer)
    })?;

    image.replace_buffer(w, h, format, data)?;
    Ok(())
}

/// Copy `count / row_len` rows of `row_len` elements starting at `start`.
fn copy_rows<T: Sample>(
    src: &[T],
    count: usize,
    src_stride: usize,
    row_len: usize,
    start: usize,
) -> pixform_core::Result<Vec<T>> {
    let mut out = alloc_samples::<T>(count)?;
    for (row, dst_row) in out.chunks_exact_mut(row_len).enumerate() {
        let offset = start + row * src_stride;
        dst_row.copy_from_slice(&src[offset..offset + row_len]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::{ErrorKind, PixelFormat};

    #[test]
    fn test_crop_interior() {
        let values: Vec<u8> = (0..16).collect();
        let mut img = Image::from_samples(4, 4, PixelFormat::Gray8, values).unwrap();
        crop(&mut img, 1, 1, 2, 2).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[5, 6, 9, 10]);
        assert_eq!(img.byte_size(), 4);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let mut img = Image::new(4, 4, PixelFormat::Rgba64).unwrap();
        let err = crop(&mut img, 1, 1, 5, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = crop(&mut img, u32::MAX, 0, 2, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!((img.width(), img.height()), (4, 4));
    }

    #[test]
    fn test_crop_zero_size() {
        let mut img = Image::new(4, 4, PixelFormat::Gray8).unwrap();
        let err = crop(&mut img, 0, 0, 0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
