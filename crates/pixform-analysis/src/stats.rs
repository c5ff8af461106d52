//! Per-channel statistics and global brightness/contrast measures

use crate::AnalysisResult;
use pixform_core::{Image, Sample, pixel_intensity, with_samples};

/// Population statistics of one channel, in the format's own units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelStats {
    /// Mean sample value
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
}

/// Mean and standard deviation of every channel.
///
/// Variance is computed as `max(0, E[X²] - E[X]²)` in `f64`.
///
/// # Examples
///
/// ```
/// use pixform_core::{Image, PixelFormat};
/// use pixform_analysis::mean_stddev;
///
/// let img = Image::from_samples(2, 2, PixelFormat::Gray8, vec![10u8, 20, 30, 40]).unwrap();
/// let stats = mean_stddev(&img).unwrap();
/// assert_eq!(stats[0].mean, 25.0);
/// assert!((stats[0].stddev - 125f64.sqrt()).abs() < 1e-9);
/// ```
pub fn mean_stddev(image: &Image) -> AnalysisResult<Vec<ChannelStats>> {
    image.ensure_live()?;
    let nc = image.channels() as usize;
    let stats = with_samples!(image.data(), data => channel_stats(data, nc));
    Ok(stats)
}

fn channel_stats<T: Sample>(data: &[T], nc: usize) -> Vec<ChannelStats> {
    let mut sum = vec![0.0f64; nc];
    let mut sum_sq = vec![0.0f64; nc];
    for px in data.chunks_exact(nc) {
        for (c, v) in px.iter().enumerate() {
            let v = v.to_f32() as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }
    let n = (data.len() / nc.max(1)).max(1) as f64;
    sum.iter()
        .zip(&sum_sq)
        .map(|(&s, &sq)| {
            let mean = s / n;
            let var = (sq / n - mean * mean).max(0.0);
            ChannelStats {
                mean,
                stddev: var.sqrt(),
            }
        })
        .collect()
}

/// Average intensity normalized to `[0, 1]`.
///
/// Intensity is the luminance `0.299 R + 0.587 G + 0.114 B` for RGB and
/// RGBA, the Y channel for YUV, and the sample itself for single-channel
/// formats.
///
/// # Errors
///
/// `UnsupportedFormat` for palette-indexed images.
pub fn brightness(image: &Image) -> AnalysisResult<f64> {
    image.ensure_live()?;
    image.ensure_arithmetic("brightness")?;
    let format = image.format();
    let nc = format.channels() as usize;
    let total = with_samples!(image.data(), data => {
        let mut px = vec![0.0f32; nc];
        let mut total = 0.0f64;
        for chunk in data.chunks_exact(nc) {
            for (dst, v) in px.iter_mut().zip(chunk) {
                *dst = v.to_f32();
            }
            total += pixel_intensity(format, &px) as f64;
        }
        total
    });
    let mean = total / image.pixel_count() as f64;
    Ok(mean / format.max_value() as f64)
}

/// Average per-channel standard deviation, normalized by the format
/// maximum.
///
/// # Errors
///
/// `UnsupportedFormat` for palette-indexed images.
pub fn contrast(image: &Image) -> AnalysisResult<f64> {
    image.ensure_live()?;
    image.ensure_arithmetic("contrast")?;
    let stats = mean_stddev(image)?;
    let avg = stats.iter().map(|s| s.stddev).sum::<f64>() / stats.len() as f64;
    Ok(avg / image.format().max_value() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixform_core::{ErrorKind, PixelFormat};

    #[test]
    fn test_mean_stddev_per_channel() {
        let img =
            Image::from_samples(2, 1, PixelFormat::Rgb48, vec![0u16, 100, 7, 1000, 100, 7])
                .unwrap();
        let stats = mean_stddev(&img).unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].mean, 500.0);
        assert_eq!(stats[0].stddev, 500.0);
        assert_eq!(stats[1], ChannelStats { mean: 100.0, stddev: 0.0 });
    }

    #[test]
    fn test_brightness_checkerboard() {
        let img = Image::from_samples(2, 2, PixelFormat::Gray8, vec![0u8, 255, 255, 0]).unwrap();
        assert!((brightness(&img).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_brightness_uses_luminance() {
        let img = Image::from_samples(1, 1, PixelFormat::Float32Rgb, vec![0.0f32, 1.0, 0.0])
            .unwrap();
        assert!((brightness(&img).unwrap() - 0.587).abs() < 1e-6);
        let yuv = Image::from_samples(1, 1, PixelFormat::Yuv24, vec![51u8, 200, 200]).unwrap();
        assert!((brightness(&yuv).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_contrast() {
        let flat = Image::from_samples(2, 1, PixelFormat::Gray8, vec![9u8, 9]).unwrap();
        assert_eq!(contrast(&flat).unwrap(), 0.0);
        let img = Image::from_samples(2, 1, PixelFormat::Gray8, vec![0u8, 255]).unwrap();
        assert!((contrast(&img).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_indexed_rejected() {
        let img = Image::new(2, 2, PixelFormat::Indexed8).unwrap();
        assert_eq!(brightness(&img).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
        assert_eq!(contrast(&img).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
        assert!(mean_stddev(&img).is_ok());
    }
}
