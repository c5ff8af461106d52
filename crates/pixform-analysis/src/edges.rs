//! Sobel edge map
//!
//! The source is reduced to an 8-bit-scale luminance plane, then the
//! horizontal and vertical Sobel gradients are combined into
//! `sqrt(gx² + gy²)`, clamped to `[0, 255]`. The result is a new `Gray8`
//! image of the same size whose outer ring is zero.

use crate::{AnalysisError, AnalysisResult};
use pixform_core::{Image, PixelFormat, Sample, pixel_intensity, with_samples};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Options for [`sobel_edge_map_with`]
#[derive(Debug, Clone, Default)]
pub struct SobelOptions {
    /// Rescale magnitudes so the strongest edge maps to 255
    pub normalize: bool,
}

impl SobelOptions {
    /// Set whether to rescale magnitudes to the full 8-bit range
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// Compute the Sobel edge magnitude map with default options.
pub fn sobel_edge_map(image: &Image) -> AnalysisResult<Image> {
    sobel_edge_map_with(image, &SobelOptions::default())
}

/// Compute the Sobel edge magnitude map.
///
/// The source is not modified. Its metadata is carried to the result.
///
/// # Errors
///
/// - [`AnalysisError::ImageTooSmall`] if width or height is below 3
/// - `UnsupportedFormat` for palette-indexed images
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_analysis::sobel_edge_map;
///
/// // Vertical step from 0 to 100
/// let row = [0u8, 0, 100, 100];
/// let img = Image::from_samples(4, 3, PixelFormat::Gray8, row.repeat(3)).unwrap();
/// let edges = sobel_edge_map(&img).unwrap();
/// assert_eq!(edges.format(), PixelFormat::Gray8);
/// assert_eq!(edges.sample(1, 1, 0), Some(255.0));
/// assert_eq!(edges.sample(0, 1, 0), Some(0.0));
/// ```
pub fn sobel_edge_map_with(image: &Image, options: &SobelOptions) -> AnalysisResult<Image> {
    image.ensure_live()?;
    image.ensure_arithmetic("sobel edge map")?;
    let (w, h) = (image.width(), image.height());
    if w < 3 || h < 3 {
        return Err(AnalysisError::ImageTooSmall {
            width: w,
            height: h,
            min: 3,
        });
    }

    let luma = luma_plane(image);
    let (w, h) = (w as usize, h as usize);
    let mut magnitude = vec![0.0f32; w * h];
    let mut strongest = 0.0f32;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for i in 0..3 {
                let row = (y + i - 1) * w;
                for j in 0..3 {
                    let v = luma[row + x + j - 1];
                    gx += SOBEL_X[i][j] * v;
                    gy += SOBEL_Y[i][j] * v;
                }
            }
            let m = (gx * gx + gy * gy).sqrt();
            strongest = strongest.max(m);
            magnitude[y * w + x] = m;
        }
    }

    let scale = if options.normalize && strongest > 0.0 {
        255.0 / strongest
    } else {
        1.0
    };
    log::trace!(
        "sobel edge map {}x{}: strongest {} scale {}",
        w,
        h,
        strongest,
        scale
    );

    let data: Vec<u8> = magnitude.iter().map(|&m| u8::from_f32(m * scale)).collect();
    let mut edges = image.create_template(w as u32, h as u32, PixelFormat::Gray8)?;
    edges.replace_samples(data.into())?;
    Ok(edges)
}

/// Per-pixel intensity rescaled to `[0, 255]`.
fn luma_plane(image: &Image) -> Vec<f32> {
    let format = image.format();
    let nc = format.channels() as usize;
    let to_8bit = 255.0 / format.max_value();
    with_samples!(image.data(), data => {
        let mut px = vec![0.0f32; nc];
        data.chunks_exact(nc)
            .map(|chunk| {
                for (dst, v) in px.iter_mut().zip(chunk) {
                    *dst = v.to_f32();
                }
                pixel_intensity(format, &px) * to_8bit
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::ErrorKind;

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = Image::from_samples(4, 4, PixelFormat::Rgb48, vec![30000u16; 48]).unwrap();
        let edges = sobel_edge_map(&img).unwrap();
        assert!(edges.samples::<u8>().unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_step_magnitude() {
        // Horizontal step of 10 levels: gy = 4 * 10 across the boundary
        let mut values = vec![0u8; 12];
        values[8..].fill(10);
        let img = Image::from_samples(4, 3, PixelFormat::Gray8, values).unwrap();
        let edges = sobel_edge_map(&img).unwrap();
        assert_eq!(edges.sample(1, 1, 0), Some(40.0));
        assert_eq!(edges.sample(2, 1, 0), Some(40.0));
        assert_eq!(edges.sample(1, 0, 0), Some(0.0));
    }

    #[test]
    fn test_normalize_option() {
        let mut values = vec![0u8; 12];
        values[8..].fill(10);
        let img = Image::from_samples(4, 3, PixelFormat::Gray8, values).unwrap();
        let edges = sobel_edge_map_with(&img, &SobelOptions::default().normalize(true)).unwrap();
        assert_eq!(edges.sample(1, 1, 0), Some(255.0));
    }

    #[test]
    fn test_float_source_scaled_to_8bit() {
        let mut values = vec![0.0f32; 12];
        values[8..].fill(0.1);
        let img = Image::from_samples(4, 3, PixelFormat::Float32, values).unwrap();
        let edges = sobel_edge_map(&img).unwrap();
        // 0.1 * 255 * 4 = 102
        assert_eq!(edges.sample(1, 1, 0), Some(102.0));
    }

    #[test]
    fn test_too_small() {
        let img = Image::new(2, 5, PixelFormat::Gray8).unwrap();
        let err = sobel_edge_map(&img).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
