//! Tone adjustments
//!
//! Per-element transfer functions applied to every channel, alpha included:
//!
//! - [`brightness`]: `in + offset`
//! - [`contrast`]: `(in - mid) * factor + mid`
//! - [`gamma`]: `max * (in / max)^(1 / gamma)`
//!
//! Integer formats are rounded and clamped to `[0, max]`. Float formats
//! are left unclamped by brightness and contrast.

use crate::{ColorError, ColorResult};
use pixform_core::{Image, Sample, SamplesMut, with_samples_mut};

pub(crate) fn check_finite(name: &str, value: f32) -> ColorResult<()> {
    if !value.is_finite() {
        return Err(ColorError::InvalidParameters(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Apply `f` to every element of an intensity image.
pub(crate) fn map_samples(
    image: &mut Image,
    operation: &'static str,
    f: impl Fn(f32) -> f32,
) -> ColorResult<()> {
    image.ensure_live()?;
    image.ensure_arithmetic(operation)?;
    with_samples_mut!(image.data_mut(), data => map_slice(data, &f));
    Ok(())
}

fn map_slice<T: Sample>(data: &mut [T], f: &impl Fn(f32) -> f32) {
    for s in data.iter_mut() {
        *s = T::from_f32(f(s.to_f32()));
    }
}

/// Add `offset` to every element.
///
/// `offset` is in the format's own units (e.g. `50.0` for 8-bit, `0.2`
/// for float).
///
/// # Errors
///
/// - `InvalidArgument` for a non-finite offset
/// - `UnsupportedFormat` for palette-indexed images
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_color::brightness;
///
/// let mut img = Image::from_samples(2, 1, PixelFormat::Gray8, vec![10u8, 250]).unwrap();
/// brightness(&mut img, 50.0).unwrap();
/// assert_eq!(img.samples::<u8>().unwrap(), &[60, 255]);
/// ```
pub fn brightness(image: &mut Image, offset: f32) -> ColorResult<()> {
    check_finite("brightness offset", offset)?;
    map_samples(image, "brightness", |v| v + offset)
}

/// Scale every element's distance from the format midpoint by `factor`.
///
/// The midpoint is 128 for 8-bit, 32768 for 16-bit and 0.5 for float.
///
/// # Errors
///
/// - `InvalidArgument` for a non-finite factor
/// - `UnsupportedFormat` for palette-indexed images
pub fn contrast(image: &mut Image, factor: f32) -> ColorResult<()> {
    check_finite("contrast factor", factor)?;
    let mid = image.format().midpoint();
    map_samples(image, "contrast", |v| (v - mid) * factor + mid)
}

/// Apply the power law `out = max * (in / max)^(1 / gamma)`.
///
/// 8-bit and 16-bit images go through a lookup table with one entry per
/// representable value. Negative float samples are treated as 0.
///
/// # Errors
///
/// - `InvalidArgument` if `gamma` is not a positive finite number
/// - `UnsupportedFormat` for palette-indexed images
pub fn gamma(image: &mut Image, gamma: f32) -> ColorResult<()> {
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(ColorError::InvalidParameters(format!(
            "gamma must be positive, got {}",
            gamma
        )));
    }
    image.ensure_live()?;
    image.ensure_arithmetic("gamma")?;
    let inv = 1.0 / gamma as f64;

    match image.data_mut() {
        SamplesMut::U8(data) => apply_lut(data, &gamma_lut::<u8>(inv)),
        SamplesMut::U16(data) => apply_lut(data, &gamma_lut::<u16>(inv)),
        SamplesMut::F32(data) => {
            for v in data.iter_mut() {
                *v = (v.max(0.0) as f64).powf(inv) as f32;
            }
        }
    }
    Ok(())
}

fn gamma_lut<T: Sample>(inv: f64) -> Vec<T> {
    let max = T::MAX as f64;
    (0..=T::MAX as usize)
        .map(|i| T::from_f32((max * (i as f64 / max).powf(inv)) as f32))
        .collect()
}

fn apply_lut<T: Sample + Into<usize>>(data: &mut [T], lut: &[T]) {
    for v in data.iter_mut() {
        let index: usize = (*v).into();
        *v = lut[index];
    }
}
