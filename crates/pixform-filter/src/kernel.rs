//! Convolution kernels
//!
//! [`Kernel`] is an odd-sized weight matrix anchored at its middle element.
//! The fixed 3×3 matrices used by the derived filters are also exported as
//! constants for use with [`convolve_3x3`](crate::convolve_3x3).

use crate::{FilterError, FilterResult};
use pixform_core::alloc_samples;

/// A 3×3 weight matrix, indexed `[row][column]`.
pub type Matrix3 = [[f32; 3]; 3];

/// Smoothing kernel; divide by 16 for unit gain.
pub const BLUR_3X3: Matrix3 = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

/// Unsharp kernel with unit gain.
pub const SHARPEN_3X3: Matrix3 = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Laplacian-style edge detector with zero gain.
pub const EDGE_3X3: Matrix3 = [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]];

/// Diagonal relief kernel with unit gain.
pub const EMBOSS_3X3: Matrix3 = [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]];

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel (odd)
    width: u32,
    /// Height of the kernel (odd)
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zeroed kernel.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is zero
    /// or even.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        check_dims(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "{}x{} kernel needs {} values, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        if let Some(v) = data.iter().find(|v| !v.is_finite()) {
            return Err(FilterError::InvalidKernel(format!(
                "non-finite weight {}",
                v
            )));
        }
        Ok(Self {
            width,
            height,
            data: data.to_vec(),
        })
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        let v = 1.0 / (size as f32 * size as f32);
        kernel.data.fill(v);
        Ok(kernel)
    }

    /// Create a normalized Gaussian kernel of odd `size`.
    ///
    /// The weights are the outer product of the 1D taps used by
    /// [`gaussian_blur`](crate::gaussian_blur).
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        check_sigma(sigma)?;
        let mut kernel = Self::new(size, size)?;
        let taps = gaussian_taps(size as usize / 2, sigma)?;
        for (row, ty) in kernel.data.chunks_exact_mut(size as usize).zip(&taps) {
            for (v, tx) in row.iter_mut().zip(&taps) {
                *v = ty * tx;
            }
        }
        Ok(kernel)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// Kernels summing to zero are left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

pub(crate) fn check_sigma(sigma: f32) -> FilterResult<()> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "gaussian sigma must be positive, got {}",
            sigma
        )));
    }
    Ok(())
}

/// Normalized 1D Gaussian taps for offsets `-half..=half`.
///
/// Offsets are squared in `f64`, so any `half` and any positive `sigma`
/// give finite weights; the center tap is never zero.
pub(crate) fn gaussian_taps(half: usize, sigma: f32) -> FilterResult<Vec<f32>> {
    let mut taps = alloc_samples::<f32>(2 * half + 1)?;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    let mut sum = 0.0f64;
    for (i, tap) in taps.iter_mut().enumerate() {
        let d = i as f64 - half as f64;
        let w = (-(d * d) / denom).exp();
        sum += w;
        *tap = w as f32;
    }
    for tap in &mut taps {
        *tap = (*tap as f64 / sum) as f32;
    }
    Ok(taps)
}

fn check_dims(width: u32, height: u32) -> FilterResult<()> {
    if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel dimensions must be odd and non-zero, got {}x{}",
            width, height
        )));
    }
    Ok(())
}
