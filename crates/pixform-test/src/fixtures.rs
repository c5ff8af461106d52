//! Synthetic test images
//!
//! Small deterministic images for regression tests. Values are given in the
//! format's own units (0..255, 0..65535, or 0.0..1.0).

use pixform_core::{Image, PixelBuffer, PixelFormat, Result, with_samples_mut};

/// Every sample set to `value`.
pub fn constant(width: u32, height: u32, format: PixelFormat, value: f32) -> Result<Image> {
    let mut img = Image::new(width, height, format)?;
    with_samples_mut!(img.data_mut(), data => {
        for s in data.iter_mut() {
            *s = pixform_core::Sample::from_f32(value);
        }
    });
    Ok(img)
}

/// Every pixel set to `px` (one value per channel).
///
/// # Panics
///
/// Panics if `px` does not have one value per channel.
pub fn solid(width: u32, height: u32, format: PixelFormat, px: &[f32]) -> Result<Image> {
    assert_eq!(px.len(), format.channels() as usize, "one value per channel");
    let mut img = Image::new(width, height, format)?;
    let nc = px.len();
    with_samples_mut!(img.data_mut(), data => {
        for (i, s) in data.iter_mut().enumerate() {
            *s = pixform_core::Sample::from_f32(px[i % nc]);
        }
    });
    Ok(img)
}

/// Horizontal ramp from 0 at the left edge to the format maximum at the
/// right edge. Channel `c > 0` is offset by `c * max / 8` and wrapped.
pub fn gradient(width: u32, height: u32, format: PixelFormat) -> Result<Image> {
    let mut img = Image::new(width, height, format)?;
    let max = format.max_value();
    let nc = format.channels();
    let span = (width.max(2) - 1) as f32;
    let wrap = if format.is_float() { max } else { max + 1.0 };
    for y in 0..height {
        for x in 0..width {
            for c in 0..nc {
                let base = max * x as f32 / span;
                let v = if c == 0 {
                    base
                } else {
                    (base + c as f32 * max / 8.0) % wrap
                };
                img.set_sample(x, y, c, v)?;
            }
        }
    }
    Ok(img)
}

/// Checkerboard of `cell`-pixel squares alternating between 0 and `high`
/// on every channel, starting with 0 at the top-left.
pub fn checkerboard(
    width: u32,
    height: u32,
    format: PixelFormat,
    cell: u32,
    high: f32,
) -> Result<Image> {
    let mut img = Image::new(width, height, format)?;
    let cell = cell.max(1);
    for y in 0..height {
        for x in 0..width {
            if ((x / cell) + (y / cell)) % 2 == 1 {
                for c in 0..format.channels() {
                    img.set_sample(x, y, c, high)?;
                }
            }
        }
    }
    Ok(img)
}

/// 8-bit image from literal values in row-major, channel-interleaved order.
pub fn from_u8_values(
    width: u32,
    height: u32,
    format: PixelFormat,
    values: &[u8],
) -> Result<Image> {
    Image::from_buffer(width, height, format, PixelBuffer::U8(values.to_vec()))
}

/// Image whose every sample is distinct: sample `i` gets `(i * step) % modulus`.
pub fn numbered(width: u32, height: u32, format: PixelFormat) -> Result<Image> {
    let mut img = Image::new(width, height, format)?;
    let modulus = if format.is_float() { 1.0 } else { format.max_value() + 1.0 };
    let step = if format.is_float() { 0.01 } else { 7.0 };
    with_samples_mut!(img.data_mut(), data => {
        for (i, s) in data.iter_mut().enumerate() {
            *s = pixform_core::Sample::from_f32((i as f32 * step) % modulus);
        }
    });
    Ok(img)
}
