//! Level operations
//!
//! Inversion, binarization, contrast stretching and histogram
//! equalization. These touch color channels only; alpha is preserved.

use crate::adjust::check_finite;
use crate::ColorResult;
use pixform_core::{ChannelLayout, Image, Sample, luminance, with_samples_mut};

/// Replace each color sample `v` with `max - v` (`1 - v` for float).
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_color::invert;
///
/// let mut img = Image::from_samples(1, 1, PixelFormat::Rgba32, vec![0u8, 100, 255, 9]).unwrap();
/// invert(&mut img).unwrap();
/// assert_eq!(img.samples::<u8>().unwrap(), &[255, 155, 0, 9]);
/// ```
pub fn invert(image: &mut Image) -> ColorResult<()> {
    image.ensure_live()?;
    image.ensure_arithmetic("invert")?;
    let (nc, cc) = channel_split(image);
    with_samples_mut!(image.data_mut(), data => invert_slice(data, nc, cc));
    Ok(())
}

fn invert_slice<T: Sample>(data: &mut [T], nc: usize, cc: usize) {
    map_color(data, nc, cc, |v| T::from_f32(T::MAX - v.to_f32()));
}

/// Binarize color samples: `v >= t` becomes the format maximum, anything
/// else becomes 0.
///
/// `t` is in the format's own units.
pub fn threshold(image: &mut Image, t: f32) -> ColorResult<()> {
    check_finite("threshold", t)?;
    image.ensure_live()?;
    image.ensure_arithmetic("threshold")?;
    let (nc, cc) = channel_split(image);
    with_samples_mut!(image.data_mut(), data => threshold_slice(data, nc, cc, t));
    Ok(())
}

fn threshold_slice<T: Sample>(data: &mut [T], nc: usize, cc: usize, t: f32) {
    let high = T::from_f32(T::MAX);
    map_color(data, nc, cc, |v| if v.to_f32() >= t { high } else { T::default() });
}

/// Linearly stretch the color samples so the smallest becomes 0 and the
/// largest becomes the format maximum (1.0 for float).
///
/// Flat images are left unchanged.
pub fn normalize(image: &mut Image) -> ColorResult<()> {
    image.ensure_live()?;
    image.ensure_arithmetic("normalize")?;
    let (nc, cc) = channel_split(image);
    with_samples_mut!(image.data_mut(), data => stretch(data, nc, cc));
    Ok(())
}

fn stretch<T: Sample>(data: &mut [T], nc: usize, cc: usize) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for px in data.chunks_exact(nc) {
        for v in &px[..cc] {
            let v = v.to_f32();
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if hi <= lo {
        return;
    }
    let scale = T::MAX / (hi - lo);
    log::trace!("normalize: [{}, {}] scale {}", lo, hi, scale);
    map_color(data, nc, cc, |v| T::from_f32((v.to_f32() - lo) * scale));
}

/// Histogram-equalize an 8-bit image.
///
/// The lookup table comes from the cumulative histogram of intensity,
/// `round((cdf[v] - cdf_min) / (n - cdf_min) * 255)`, where `cdf_min` is
/// the first non-zero cumulative count.
///
/// - Gray: samples are remapped directly
/// - YUV: the Y channel is remapped
/// - RGB/RGBA: color channels are scaled by `new_l / l`, where `l` is the
///   pixel's luminance; black pixels take `new_l` in every color channel
///
/// # Errors
///
/// `UnsupportedFormat` for 16-bit, float and palette-indexed images.
pub fn equalize(image: &mut Image) -> ColorResult<()> {
    image.ensure_live()?;
    image.ensure_arithmetic("equalize")?;
    let format = image.format();
    if format.is_float() || format.bytes_per_element() != 1 {
        return Err(pixform_core::Error::UnsupportedFormat {
            format,
            operation: "equalize",
        }
        .into());
    }

    let nc = format.channels() as usize;
    let layout = format.layout();
    let data = image
        .samples_mut::<u8>()
        .ok_or(pixform_core::Error::BufferKindMismatch {
            format,
            actual: "non-u8",
        })?;

    let intensity = |px: &[u8]| -> usize {
        match layout {
            ChannelLayout::Rgb | ChannelLayout::Rgba => {
                u8::from_f32(luminance(px[0] as f32, px[1] as f32, px[2] as f32)) as usize
            }
            _ => px[0] as usize,
        }
    };

    let mut hist = [0u64; 256];
    for px in data.chunks_exact(nc) {
        hist[intensity(px)] += 1;
    }
    let Some(lut) = equalize_lut(&hist) else {
        log::debug!("equalize: flat histogram, nothing to do");
        return Ok(());
    };

    for px in data.chunks_exact_mut(nc) {
        match layout {
            ChannelLayout::Rgb | ChannelLayout::Rgba => {
                let l = intensity(&*px);
                let nl = lut[l];
                if l == 0 {
                    px[..3].fill(nl);
                } else {
                    let ratio = nl as f32 / l as f32;
                    for v in &mut px[..3] {
                        *v = u8::from_f32(*v as f32 * ratio);
                    }
                }
            }
            _ => px[0] = lut[px[0] as usize],
        }
    }
    Ok(())
}

/// Equalization table for a 256-bin histogram, or `None` when every
/// sample falls into one bin.
fn equalize_lut(hist: &[u64; 256]) -> Option<[u8; 256]> {
    let total: u64 = hist.iter().sum();
    let cdf_min = hist.iter().copied().find(|&c| c > 0)?;
    if total == cdf_min {
        return None;
    }
    let range = (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    let mut cdf = 0u64;
    for (entry, &count) in lut.iter_mut().zip(hist) {
        cdf += count;
        let scaled = cdf.saturating_sub(cdf_min) as f64 / range * 255.0;
        *entry = scaled.round().clamp(0.0, 255.0) as u8;
    }
    Some(lut)
}

/// Channels per pixel and leading color channels.
fn channel_split(image: &Image) -> (usize, usize) {
    let format = image.format();
    (format.channels() as usize, format.color_channels())
}

fn map_color<T: Sample>(data: &mut [T], nc: usize, cc: usize, f: impl Fn(T) -> T) {
    for px in data.chunks_exact_mut(nc) {
        for v in &mut px[..cc] {
            *v = f(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::{ErrorKind, PixelFormat};

    #[test]
    fn test_invert_float() {
        let mut img = Image::from_samples(2, 1, PixelFormat::Float32, vec![0.25f32, 1.0]).unwrap();
        invert(&mut img).unwrap();
        assert_eq!(img.samples::<f32>().unwrap(), &[0.75, 0.0]);
    }

    #[test]
    fn test_invert_u16() {
        let mut img = Image::from_samples(2, 1, PixelFormat::Gray16, vec![0u16, 535]).unwrap();
        invert(&mut img).unwrap();
        assert_eq!(img.samples::<u16>().unwrap(), &[65535, 65000]);
    }

    #[test]
    fn test_threshold_keeps_alpha() {
        let mut img =
            Image::from_samples(1, 1, PixelFormat::Rgba32, vec![127u8, 128, 200, 50]).unwrap();
        threshold(&mut img, 128.0).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 255, 255, 50]);
    }

    #[test]
    fn test_normalize_stretches() {
        let mut img =
            Image::from_samples(3, 1, PixelFormat::Gray8, vec![50u8, 100, 200]).unwrap();
        normalize(&mut img).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 85, 255]);
    }

    #[test]
    fn test_normalize_flat_is_noop() {
        let mut img = Image::from_samples(2, 1, PixelFormat::Float32, vec![0.3f32, 0.3]).unwrap();
        normalize(&mut img).unwrap();
        assert_eq!(img.samples::<f32>().unwrap(), &[0.3, 0.3]);
    }

    #[test]
    fn test_equalize_gray() {
        let mut img =
            Image::from_samples(4, 1, PixelFormat::Gray8, vec![0u8, 0, 128, 255]).unwrap();
        equalize(&mut img).unwrap();
        // cdf = 2, 3, 4 with cdf_min = 2
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 0, 128, 255]);

        let mut img =
            Image::from_samples(4, 1, PixelFormat::Gray8, vec![10u8, 20, 20, 30]).unwrap();
        equalize(&mut img).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 170, 170, 255]);
    }

    #[test]
    fn test_equalize_yuv_touches_only_luma() {
        let mut img =
            Image::from_samples(2, 1, PixelFormat::Yuv24, vec![10u8, 7, 8, 30, 9, 10]).unwrap();
        equalize(&mut img).unwrap();
        assert_eq!(img.samples::<u8>().unwrap(), &[0, 7, 8, 255, 9, 10]);
    }

    #[test]
    fn test_equalize_rejects_wide_formats() {
        let mut img = Image::new(2, 2, PixelFormat::Gray16).unwrap();
        assert_eq!(equalize(&mut img).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
        let mut img = Image::new(2, 2, PixelFormat::Float32Rgb).unwrap();
        assert_eq!(equalize(&mut img).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_indexed_rejected() {
        let mut img = Image::new(2, 2, PixelFormat::Indexed8).unwrap();
        assert_eq!(invert(&mut img).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_equalize_lut_flat() {
        let mut hist = [0u64; 256];
        hist[42] = 9;
        assert!(equalize_lut(&hist).is_none());
    }

    #[test]
    fn test_threshold_rejects_nan() {
        let mut img = Image::new(1, 1, PixelFormat::Gray8).unwrap();
        let err = threshold(&mut img, f32::NAN).unwrap_err();
        assert!(matches!(err, crate::ColorError::InvalidParameters(_)));
    }
}
