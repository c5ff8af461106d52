//! Color space operations
//!
//! Provides:
//! - RGB <-> HSV conversion on normalized values
//! - HSV adjustment of whole images
//! - Channel swapping
//! - Grayscale conversion (RGB luminance or YUV luma)
//! - Sepia toning

use crate::adjust::check_finite;
use crate::{ColorError, ColorResult};
use pixform_core::{
    ChannelLayout, Image, PixelFormat, Sample, alloc_samples, luminance, with_samples,
    with_samples_mut,
};

/// HSV color representation
///
/// - `h`: Hue in degrees, `[0.0, 360.0)`
/// - `s`: Saturation in range `[0.0, 1.0]`
/// - `v`: Value in range `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// Convert normalized RGB (each in `[0, 1]`) to HSV.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    Hsv::new(h.rem_euclid(360.0), s, max)
}

/// Convert HSV to normalized RGB.
///
/// Hue is wrapped into `[0, 360)` first.
pub fn hsv_to_rgb(hsv: Hsv) -> (f32, f32, f32) {
    let h = hsv.h.rem_euclid(360.0) / 60.0;
    let c = hsv.v * hsv.s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = hsv.v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}

fn require_rgb(image: &Image, operation: &'static str) -> ColorResult<()> {
    image.ensure_live()?;
    image.ensure_arithmetic(operation)?;
    if image.channels() < 3 {
        return Err(ColorError::TooFewChannels {
            operation,
            required: 3,
            actual: image.channels(),
        });
    }
    if !image.format().has_rgb() {
        return Err(pixform_core::Error::UnsupportedFormat {
            format: image.format(),
            operation,
        }
        .into());
    }
    Ok(())
}

/// Shift hue and scale saturation and value of every pixel.
///
/// The first three channels are read as RGB, normalized by the format
/// maximum, converted to HSV, adjusted and written back. Saturation and
/// value are clamped to `[0, 1]`; a fourth (alpha) channel is untouched.
///
/// # Arguments
///
/// * `image` - RGB or RGBA image of any element width
/// * `hue_shift` - Degrees added to hue, result wrapped into `[0, 360)`
/// * `sat_mult` - Saturation multiplier
/// * `val_mult` - Value multiplier
///
/// # Errors
///
/// - `InvalidArgument` for fewer than three channels or non-finite
///   parameters
/// - `UnsupportedFormat` for YUV and palette-indexed images
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_color::hsv_adjust;
///
/// let mut img = Image::from_samples(1, 1, PixelFormat::Rgb24, vec![255u8, 0, 0]).unwrap();
/// hsv_adjust(&mut img, 120.0, 1.0, 1.0).unwrap();
/// assert_eq!(img.samples::<u8>().unwrap(), &[0, 255, 0]);
/// ```
pub fn hsv_adjust(
    image: &mut Image,
    hue_shift: f32,
    sat_mult: f32,
    val_mult: f32,
) -> ColorResult<()> {
    check_finite("hue shift", hue_shift)?;
    check_finite("saturation multiplier", sat_mult)?;
    check_finite("value multiplier", val_mult)?;
    require_rgb(image, "hsv adjust")?;

    let nc = image.channels() as usize;
    with_samples_mut!(image.data_mut(), data => {
        adjust_pixels(data, nc, |r, g, b| {
            let hsv = rgb_to_hsv(r, g, b);
            hsv_to_rgb(Hsv::new(
                hsv.h + hue_shift,
                (hsv.s * sat_mult).clamp(0.0, 1.0),
                (hsv.v * val_mult).clamp(0.0, 1.0),
            ))
        })
    });
    Ok(())
}

/// Run `f` on the normalized RGB of every pixel and store the result.
fn adjust_pixels<T: Sample>(
    data: &mut [T],
    nc: usize,
    f: impl Fn(f32, f32, f32) -> (f32, f32, f32),
) {
    let max = T::MAX;
    for px in data.chunks_exact_mut(nc) {
        let norm = |s: T| (s.to_f32() / max).clamp(0.0, 1.0);
        let (r, g, b) = f(norm(px[0]), norm(px[1]), norm(px[2]));
        px[0] = T::from_f32(r * max);
        px[1] = T::from_f32(g * max);
        px[2] = T::from_f32(b * max);
    }
}

/// Exchange channels `a` and `b` of every pixel.
///
/// # Errors
///
/// Returns [`ColorError::InvalidChannel`] if either index is not below the
/// channel count.
pub fn channel_swap(image: &mut Image, a: u32, b: u32) -> ColorResult<()> {
    image.ensure_live()?;
    let channels = image.channels();
    for index in [a, b] {
        if index >= channels {
            return Err(ColorError::InvalidChannel { index, channels });
        }
    }
    if a == b {
        return Ok(());
    }
    let nc = channels as usize;
    let (a, b) = (a as usize, b as usize);
    with_samples_mut!(image.data_mut(), data => {
        for px in data.chunks_exact_mut(nc) {
            px.swap(a, b);
        }
    });
    Ok(())
}

/// Convert to a single-channel image of the same element width.
///
/// RGB and RGBA use luminance `0.299 R + 0.587 G + 0.114 B` (alpha is
/// dropped); YUV keeps its Y channel. Single-channel images are left as
/// they are.
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_color::grayscale;
///
/// let mut img = Image::from_samples(1, 1, PixelFormat::Rgb48, vec![0u16, 65535, 0]).unwrap();
/// grayscale(&mut img).unwrap();
/// assert_eq!(img.format(), PixelFormat::Gray16);
/// assert_eq!(img.samples::<u16>().unwrap(), &[38469]);
/// ```
pub fn grayscale(image: &mut Image) -> ColorResult<()> {
    image.ensure_live()?;
    let format = image.format();
    if format.channels() == 1 {
        return Ok(());
    }
    let gray = format.gray_equivalent();
    let nc = format.channels() as usize;
    let count = image.pixel_count();
    let data = with_samples!(image.data(), src => {
        luma_plane(src, nc, count, format).map(Sample::into_buffer)
    })?;
    image.replace_buffer(image.width(), image.height(), gray, data)?;
    Ok(())
}

fn luma_plane<T: Sample>(
    src: &[T],
    nc: usize,
    count: usize,
    format: PixelFormat,
) -> pixform_core::Result<Vec<T>> {
    let mut out = alloc_samples::<T>(count)?;
    let yuv = format.layout() == ChannelLayout::Yuv;
    for (dst, px) in out.iter_mut().zip(src.chunks_exact(nc)) {
        *dst = if yuv {
            px[0]
        } else {
            T::from_f32(luminance(px[0].to_f32(), px[1].to_f32(), px[2].to_f32()))
        };
    }
    Ok(out)
}

/// Apply a sepia tone to an RGB or RGBA image.
///
/// Results are clamped to `[0, max]` for every element width.
pub fn sepia(image: &mut Image) -> ColorResult<()> {
    require_rgb(image, "sepia")?;
    let nc = image.channels() as usize;
    with_samples_mut!(image.data_mut(), data => {
        for px in data.chunks_exact_mut(nc) {
            let (r, g, b) = (px[0].to_f32(), px[1].to_f32(), px[2].to_f32());
            px[0] = Sample::from_f32_clamped(0.393 * r + 0.769 * g + 0.189 * b);
            px[1] = Sample::from_f32_clamped(0.349 * r + 0.686 * g + 0.168 * b);
            px[2] = Sample::from_f32_clamped(0.272 * r + 0.534 * g + 0.131 * b);
        }
    });
    Ok(())
}
