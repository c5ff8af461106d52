//! Histogram generation and entropy
//!
//! Histograms have 256 bins per channel, laid out channel after channel:
//! bin `c * 256 + v` counts samples of channel `c` that map to value `v`.
//!
//! - 8-bit samples map directly
//! - 16-bit samples keep their high byte (`v >> 8`)
//! - float samples are clamped to `[0, 1]` and scaled to `[0, 255]`
//!
//! Palette-indexed images are counted by index.

use crate::{AnalysisError, AnalysisResult};
use pixform_core::{Image, Sample, SampleKind, with_samples};

/// Bins per channel.
pub const HISTOGRAM_BINS: usize = 256;

/// Compute the per-channel histogram of an image.
///
/// Returns `256 * channels` counts.
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_analysis::histogram;
///
/// let img = Image::from_samples(2, 1, PixelFormat::Gray16, vec![0x1234u16, 0x12ff]).unwrap();
/// let hist = histogram(&img).unwrap();
/// assert_eq!(hist.len(), 256);
/// assert_eq!(hist[0x12], 2);
/// ```
pub fn histogram(image: &Image) -> AnalysisResult<Vec<u32>> {
    image.ensure_live()?;
    let mut bins = vec![0u32; HISTOGRAM_BINS * image.channels() as usize];
    histogram_into(image, &mut bins)?;
    Ok(bins)
}

/// Compute the histogram into a caller-provided buffer.
///
/// The first `256 * channels` entries are overwritten; any further entries
/// are left alone.
///
/// # Errors
///
/// Returns [`AnalysisError::BufferTooSmall`] if `bins` holds fewer than
/// `256 * channels` entries.
pub fn histogram_into(image: &Image, bins: &mut [u32]) -> AnalysisResult<()> {
    image.ensure_live()?;
    let nc = image.channels() as usize;
    let needed = HISTOGRAM_BINS * nc;
    if bins.len() < needed {
        return Err(AnalysisError::BufferTooSmall {
            needed,
            actual: bins.len(),
        });
    }
    let bins = &mut bins[..needed];
    bins.fill(0);
    with_samples!(image.data(), data => count_samples(data, nc, bins));
    Ok(())
}

fn count_samples<T: Sample>(data: &[T], nc: usize, bins: &mut [u32]) {
    for px in data.chunks_exact(nc) {
        for (c, &v) in px.iter().enumerate() {
            bins[c * HISTOGRAM_BINS + bin_of(v)] += 1;
        }
    }
}

/// Histogram bin of one sample.
#[inline]
fn bin_of<T: Sample>(v: T) -> usize {
    match T::KIND {
        SampleKind::U8 => v.to_f32() as usize,
        SampleKind::U16 => ((v.to_f32() as u32) >> 8) as usize,
        SampleKind::F32 => (v.to_f32().clamp(0.0, 1.0) * 255.0).round() as usize,
    }
}

/// Shannon entropy of the histogram, in bits.
///
/// `-Σ p·log2(p)` over every non-empty bin of every channel, with
/// `p = count / (pixel_count * channels)`. A constant single-channel image
/// has entropy 0; an even two-value split has entropy 1.
pub fn entropy(image: &Image) -> AnalysisResult<f64> {
    let bins = histogram(image)?;
    let total = image.pixel_count() as f64 * image.channels() as f64;
    let h = bins
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>();
    Ok(h.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::{ErrorKind, PixelFormat};

    #[test]
    fn test_bin_mapping() {
        assert_eq!(bin_of(200u8), 200);
        assert_eq!(bin_of(65535u16), 255);
        assert_eq!(bin_of(255u16), 0);
        assert_eq!(bin_of(1.0f32), 255);
        assert_eq!(bin_of(-0.5f32), 0);
        assert_eq!(bin_of(7.0f32), 255);
        assert_eq!(bin_of(0.5f32), 128);
    }

    #[test]
    fn test_histogram_rgb_layout() {
        let img = Image::from_samples(2, 2, PixelFormat::Rgb24, [10u8, 20, 30].repeat(4)).unwrap();
        let hist = histogram(&img).unwrap();
        assert_eq!(hist.len(), 768);
        assert_eq!(hist[10], 4);
        assert_eq!(hist[256 + 20], 4);
        assert_eq!(hist[512 + 30], 4);
        assert_eq!(hist.iter().sum::<u32>(), 12);
    }

    #[test]
    fn test_histogram_into_small_buffer() {
        let img = Image::new(2, 2, PixelFormat::Rgba32).unwrap();
        let mut bins = vec![0u32; 1000];
        let err = histogram_into(&img, &mut bins).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_histogram_into_overwrites() {
        let img = Image::from_samples(1, 1, PixelFormat::Gray8, vec![3u8]).unwrap();
        let mut bins = vec![9u32; 300];
        histogram_into(&img, &mut bins).unwrap();
        assert_eq!(bins[3], 1);
        assert_eq!(bins[4], 0);
        assert_eq!(bins[299], 9);
    }

    #[test]
    fn test_entropy_values() {
        let flat = Image::from_samples(4, 1, PixelFormat::Gray8, vec![7u8; 4]).unwrap();
        assert_eq!(entropy(&flat).unwrap(), 0.0);
        let half = Image::from_samples(4, 1, PixelFormat::Gray8, vec![0u8, 255, 0, 255]).unwrap();
        assert!((entropy(&half).unwrap() - 1.0).abs() < 1e-12);
        let four = Image::from_samples(4, 1, PixelFormat::Gray8, vec![1u8, 2, 3, 4]).unwrap();
        assert!((entropy(&four).unwrap() - 2.0).abs() < 1e-12);
    }
}
