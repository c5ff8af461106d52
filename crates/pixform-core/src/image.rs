//! Image - the pixel container
//!
//! An [`Image`] owns a width × height grid of interleaved pixels in one of
//! the [`PixelFormat`]s, plus passthrough [`ImageMeta`].
//!
//! # Pixel layout
//!
//! - Rows are stored top to bottom with no padding
//! - Channels of one pixel are adjacent (`RGBRGB...`)
//! - Element `(x, y, c)` lives at `(y * width + x) * channels + c`
//!
//! # Lifecycle
//!
//! - [`Image::new`] allocates a zeroed buffer after validating the size
//! - Operations that keep dimensions and format mutate the buffer in place
//! - Operations that change dimensions or format build a complete new
//!   buffer and commit it with [`Image::replace_buffer`], which updates
//!   width, height, format and buffer together
//! - [`Image::release`] frees the buffer; it is idempotent, and every
//!   later operation reports [`Error::Released`]

use crate::buffer::{PixelBuffer, SamplesMut};
use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::sample::Sample;

/// Descriptive fields carried along with an image and never interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMeta {
    pub name: Option<String>,
    pub author: Option<String>,
    /// Horizontal resolution in dots per inch (0 when unknown)
    pub dpi_x: f32,
    /// Vertical resolution in dots per inch (0 when unknown)
    pub dpi_y: f32,
    pub exposure: f32,
    /// Bitmask of channels a producer marked as meaningful
    pub channel_mask: u32,
    pub software: Option<String>,
    pub creation_os: Option<String>,
    pub creation_date: Option<String>,
    pub ai_generated: bool,
    /// Free-form producer data
    pub user_data: Option<String>,
}

/// The main image container.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: PixelBuffer,
    meta: ImageMeta,
}

/// Number of elements in a `width × height` image of `format`.
///
/// # Errors
///
/// - [`Error::InvalidDimension`] if either dimension is zero
/// - [`Error::SizeOverflow`] if the element or byte count overflows `usize`
pub fn element_count(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    let overflow = || Error::SizeOverflow {
        width,
        height,
        format,
    };
    let count = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.channels() as usize))
        .ok_or_else(overflow)?;
    count
        .checked_mul(format.bytes_per_element())
        .ok_or_else(overflow)?;
    Ok(count)
}

impl Image {
    /// Create a zero-filled image.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `format` - Pixel format
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] for a zero dimension
    /// - [`Error::SizeOverflow`] if the buffer size does not fit in `usize`
    /// - [`Error::AllocationFailed`] if the buffer cannot be allocated
    ///
    /// # Examples
    ///
    /// ```
    /// use pixform_core::{Image, PixelFormat};
    ///
    /// let img = Image::new(4, 3, PixelFormat::Rgb48).unwrap();
    /// assert_eq!(img.byte_size(), 4 * 3 * 3 * 2);
    /// ```
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let count = element_count(width, height, format)?;
        let data = PixelBuffer::zeroed(format.sample_kind(), count)?;
        Ok(Image {
            width,
            height,
            format,
            data,
            meta: ImageMeta::default(),
        })
    }

    /// Adopt an existing buffer.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions are invalid, the buffer's element kind does
    /// not match `format`, or its length is not `width * height * channels`.
    pub fn from_buffer(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: PixelBuffer,
    ) -> Result<Self> {
        check_buffer(width, height, format, &data)?;
        Ok(Image {
            width,
            height,
            format,
            data,
            meta: ImageMeta::default(),
        })
    }

    /// Adopt a vector of samples.
    ///
    /// ```
    /// use pixform_core::{Image, PixelFormat};
    ///
    /// let img = Image::from_samples(2, 1, PixelFormat::Gray16, vec![0u16, 65535]).unwrap();
    /// assert_eq!(img.sample(1, 0, 0), Some(65535.0));
    /// ```
    pub fn from_samples<T: Sample>(
        width: u32,
        height: u32,
        format: PixelFormat,
        samples: Vec<T>,
    ) -> Result<Self> {
        Self::from_buffer(width, height, format, T::into_buffer(samples))
    }

    /// Create a zeroed image of another size and format that carries this
    /// image's metadata.
    pub fn create_template(&self, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let mut out = Image::new(width, height, format)?;
        out.meta = self.meta.clone();
        Ok(out)
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Channels per pixel, from the format table.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.format.channels()
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total buffer size in bytes: `width * height * channels * bytes_per_element`.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.data.byte_len()
    }

    /// Returns true once the buffer has been released.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.data.is_empty()
    }

    /// Fail with [`Error::Released`] if the buffer has been released.
    #[inline]
    pub fn ensure_live(&self) -> Result<()> {
        if self.is_released() {
            return Err(Error::Released);
        }
        Ok(())
    }

    #[inline]
    pub fn data(&self) -> &PixelBuffer {
        &self.data
    }

    /// Mutable view of the elements. Values can change; the element count
    /// and kind stay fixed. Use [`Image::replace_buffer`] to swap storage.
    #[inline]
    pub fn data_mut(&mut self) -> SamplesMut<'_> {
        self.data.as_samples_mut()
    }

    /// Borrow the elements as `&[T]` if `T` matches the format.
    pub fn samples<T: Sample>(&self) -> Option<&[T]> {
        T::slice_of(&self.data)
    }

    /// Mutably borrow the elements as `&mut [T]` if `T` matches the format.
    pub fn samples_mut<T: Sample>(&mut self) -> Option<&mut [T]> {
        T::slice_of_mut(&mut self.data)
    }

    #[inline]
    pub fn meta(&self) -> &ImageMeta {
        &self.meta
    }

    #[inline]
    pub fn meta_mut(&mut self) -> &mut ImageMeta {
        &mut self.meta
    }

    /// Builder-style metadata setter.
    pub fn with_meta(mut self, meta: ImageMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Element index of channel 0 of pixel `(x, y)`. No bounds check.
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels() as usize
    }

    /// Channel `c` of pixel `(x, y)` widened to `f32`.
    pub fn sample(&self, x: u32, y: u32, c: u32) -> Option<f32> {
        if x >= self.width || y >= self.height || c >= self.channels() {
            return None;
        }
        self.data.get_f32(self.pixel_index(x, y) + c as usize)
    }

    /// Store channel `c` of pixel `(x, y)`, rounding and clamping for
    /// integer formats.
    ///
    /// # Errors
    ///
    /// - [`Error::PixelOutOfBounds`] for a coordinate outside the image
    /// - [`Error::IndexOutOfBounds`] for a channel index ≥ channels
    pub fn set_sample(&mut self, x: u32, y: u32, c: u32, value: f32) -> Result<()> {
        self.ensure_live()?;
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if c >= self.channels() {
            return Err(Error::IndexOutOfBounds {
                index: c as usize,
                len: self.channels() as usize,
            });
        }
        let index = self.pixel_index(x, y) + c as usize;
        self.data.set_f32(index, value);
        Ok(())
    }

    /// All channels of pixel `(x, y)` widened to `f32`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec<f32>> {
        if x >= self.width || y >= self.height || self.is_released() {
            return None;
        }
        let base = self.pixel_index(x, y);
        (0..self.channels() as usize)
            .map(|c| self.data.get_f32(base + c))
            .collect()
    }

    /// Returns true if both images have the same dimensions and format.
    pub fn sizes_equal(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height && self.format == other.format
    }

    /// Fail with [`Error::IncompatibleImages`] unless [`Image::sizes_equal`].
    pub fn ensure_same_layout(&self, other: &Image) -> Result<()> {
        if !self.sizes_equal(other) {
            return Err(Error::IncompatibleImages(
                self.width,
                self.height,
                self.format,
                other.width,
                other.height,
                other.format,
            ));
        }
        Ok(())
    }

    /// Fail with [`Error::UnsupportedFormat`] if samples are palette indices.
    pub fn ensure_arithmetic(&self, operation: &'static str) -> Result<()> {
        if !self.format.supports_arithmetic() {
            return Err(Error::UnsupportedFormat {
                format: self.format,
                operation,
            });
        }
        Ok(())
    }

    /// Commit a fully built buffer with new dimensions and format.
    ///
    /// The new buffer is validated first. On error the image is left
    /// untouched; on success all fields change together and the previous
    /// buffer is dropped.
    pub fn replace_buffer(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: PixelBuffer,
    ) -> Result<()> {
        check_buffer(width, height, format, &data)?;
        log::debug!(
            "replace buffer: {}x{} {} -> {}x{} {}",
            self.width,
            self.height,
            self.format,
            width,
            height,
            format
        );
        let old = std::mem::replace(&mut self.data, data);
        self.width = width;
        self.height = height;
        self.format = format;
        drop(old);
        Ok(())
    }

    /// Replace the elements without changing dimensions or format.
    pub fn replace_samples(&mut self, data: PixelBuffer) -> Result<()> {
        self.replace_buffer(self.width, self.height, self.format, data)
    }

    /// Free the buffer. Calling this again is a no-op.
    pub fn release(&mut self) {
        if self.is_released() {
            return;
        }
        log::trace!("release {}x{} {}", self.width, self.height, self.format);
        self.data = PixelBuffer::empty(self.format.sample_kind());
        self.width = 0;
        self.height = 0;
    }

    /// Hand the buffer to the caller, consuming the image.
    pub fn into_buffer(self) -> PixelBuffer {
        self.data
    }
}

fn check_buffer(width: u32, height: u32, format: PixelFormat, data: &PixelBuffer) -> Result<()> {
    let count = element_count(width, height, format)?;
    if data.kind() != format.sample_kind() {
        return Err(Error::BufferKindMismatch {
            format,
            actual: data.kind().name(),
        });
    }
    data.check_len(count)
}
