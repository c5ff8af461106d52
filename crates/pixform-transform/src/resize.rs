//! Image resizing
//!
//! Resamples an image to an explicit target size:
//!
//! - [`ResizeMethod::Nearest`]: destination `(x, y)` reads source
//!   `(⌊x·W/newW⌋, ⌊y·H/newH⌋)`
//! - [`ResizeMethod::Bilinear`]: pixel-center aligned, four-tap linear
//!   interpolation per channel
//! - [`ResizeMethod::Bicubic`] and [`ResizeMethod::Lanczos`] are accepted and
//!   sampled with the nearest-neighbor path
//!
//! The new buffer is fully built before it replaces the old one.

use crate::{TransformError, TransformResult};
use pixform_core::{Image, Sample, alloc_samples, with_samples};

/// Resampling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMethod {
    /// Nearest-neighbor sampling
    Nearest,
    /// Linear interpolation over the four nearest source pixels
    #[default]
    Bilinear,
    /// Accepted; sampled as [`ResizeMethod::Nearest`]
    Bicubic,
    /// Accepted; sampled as [`ResizeMethod::Nearest`]
    Lanczos,
}

impl ResizeMethod {
    /// The method that is actually run.
    pub fn effective(self) -> ResizeMethod {
        match self {
            ResizeMethod::Bicubic | ResizeMethod::Lanczos => ResizeMethod::Nearest,
            other => other,
        }
    }
}

/// Resize an image in place.
///
/// # Arguments
///
/// * `image` - Image to resize
/// * `new_width` - Target width (> 0)
/// * `new_height` - Target height (> 0)
/// * `method` - Resampling method
///
/// # Errors
///
/// - [`TransformError::InvalidParameters`] for a zero target dimension
/// - `UnsupportedFormat` for bilinear resampling of palette indices
/// - `AllocationFailure` if the new buffer cannot be allocated
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_transform::{ResizeMethod, resize};
///
/// let mut img = Image::new(8, 6, PixelFormat::Rgb24).unwrap();
/// resize(&mut img, 4, 3, ResizeMethod::Bilinear).unwrap();
/// assert_eq!((img.width(), img.height()), (4, 3));
/// ```
pub fn resize(
    image: &mut Image,
    new_width: u32,
    new_height: u32,
    method: ResizeMethod,
) -> TransformResult<()> {
    image.ensure_live()?;
    if new_width == 0 || new_height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size {}x{} must be non-zero",
            new_width, new_height
        )));
    }

    let effective = method.effective();
    if effective != method {
        log::debug!("resize: {:?} not available, using {:?}", method, effective);
    }
    if effective == ResizeMethod::Bilinear {
        image.ensure_arithmetic("bilinear resize")?;
    }

    let format = image.format();
    let geom = Geometry {
        width: image.width() as usize,
        height: image.height() as usize,
        channels: format.channels() as usize,
        new_width: new_width as usize,
        new_height: new_height as usize,
    };
    let count = pixform_core::element_count(new_width, new_height, format)?;

    let data = with_samples!(image.data(), src => match effective {
        ResizeMethod::Bilinear => resize_bilinear(src, &geom, count).map(Sample::into_buffer),
        _ => resize_nearest(src, &geom, count).map(Sample::into_buffer),
    })?;

    image.replace_buffer(new_width, new_height, format, data)?;
    Ok(())
}

/// Source and target sizes of one resize.
struct Geometry {
    width: usize,
    height: usize,
    channels: usize,
    new_width: usize,
    new_height: usize,
}

fn resize_nearest<T: Sample>(
    src: &[T],
    g: &Geometry,
    count: usize,
) -> pixform_core::Result<Vec<T>> {
    let mut out = alloc_samples::<T>(count)?;
    let nc = g.channels;

    // Precompute source columns
    let xmap: Vec<usize> = (0..g.new_width)
        .map(|x| x * g.width / g.new_width)
        .collect();

    for y in 0..g.new_height {
        let sy = y * g.height / g.new_height;
        let src_row = &src[sy * g.width * nc..(sy + 1) * g.width * nc];
        let dst_row = &mut out[y * g.new_width * nc..(y + 1) * g.new_width * nc];
        for (x, &sx) in xmap.iter().enumerate() {
            dst_row[x * nc..(x + 1) * nc].copy_from_slice(&src_row[sx * nc..(sx + 1) * nc]);
        }
    }
    Ok(out)
}

/// Source coordinate and weight for one destination index.
#[derive(Clone, Copy)]
struct Tap {
    i0: usize,
    i1: usize,
    frac: f32,
}

fn taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|i| {
            let f = ((i as f64 + 0.5) * scale - 0.5).clamp(0.0, last as f64);
            let i0 = f.floor() as usize;
            let i1 = (i0 + 1).min(last);
            Tap {
                i0,
                i1,
                frac: (f - i0 as f64) as f32,
            }
        })
        .collect()
}

fn resize_bilinear<T: Sample>(
    src: &[T],
    g: &Geometry,
    count: usize,
) -> pixform_core::Result<Vec<T>> {
    let mut out = alloc_samples::<T>(count)?;
    let nc = g.channels;
    let xtaps = taps(g.width, g.new_width);
    let ytaps = taps(g.height, g.new_height);
    let at = |x: usize, y: usize, c: usize| src[(y * g.width + x) * nc + c].to_f32();

    for (y, ty) in ytaps.iter().enumerate() {
        for (x, tx) in xtaps.iter().enumerate() {
            let base = (y * g.new_width + x) * nc;
            for c in 0..nc {
                let top = at(tx.i0, ty.i0, c) * (1.0 - tx.frac) + at(tx.i1, ty.i0, c) * tx.frac;
                let bottom =
                    at(tx.i0, ty.i1, c) * (1.0 - tx.frac) + at(tx.i1, ty.i1, c) * tx.frac;
                out[base + c] = T::from_f32(top * (1.0 - ty.frac) + bottom * ty.frac);
            }
        }
    }
    Ok(out)
}
