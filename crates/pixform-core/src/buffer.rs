//! Tagged sample storage
//!
//! [`PixelBuffer`] holds the channel elements of an image as one of three
//! vector types. The variant always agrees with the image's
//! [`SampleKind`]; [`Image`](crate::Image) checks this on construction.
//!
//! Generic per-kind code is reached through the dispatch macros:
//!
//! - [`with_samples!`](crate::with_samples) borrows the elements as `&[T]`
//! - [`with_samples_mut!`](crate::with_samples_mut) borrows a [`SamplesMut`]
//!   view as `&mut [T]`
//! - [`with_sample_pair!`](crate::with_sample_pair) pairs a mutable view and
//!   a shared buffer of the same kind
//!
//! Mutable access only ever goes through [`SamplesMut`], a fixed-length
//! slice view, so an image's element count cannot change behind its back.
//!
//! ```
//! use pixform_core::{PixelBuffer, SampleKind, with_samples};
//!
//! let buffer = PixelBuffer::zeroed(SampleKind::U16, 4).unwrap();
//! let total: f32 = with_samples!(&buffer, data => data.iter().map(|v| *v as f32).sum());
//! assert_eq!(total, 0.0);
//! ```

use crate::error::{Error, Result};
use crate::format::SampleKind;
use crate::sample::{alloc_samples, copy_samples};

/// Channel elements of an image, tagged by numeric kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

/// Mutable view of a [`PixelBuffer`]'s elements.
///
/// Values can be rewritten in place; the length and kind cannot change.
#[derive(Debug)]
pub enum SamplesMut<'a> {
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
    F32(&'a mut [f32]),
}

/// Borrow a [`PixelBuffer`]'s elements as a typed slice and evaluate `$body`
/// once per variant.
#[macro_export]
macro_rules! with_samples {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            $crate::PixelBuffer::U8(v) => {
                let $data: &[u8] = v;
                $body
            }
            $crate::PixelBuffer::U16(v) => {
                let $data: &[u16] = v;
                $body
            }
            $crate::PixelBuffer::F32(v) => {
                let $data: &[f32] = v;
                $body
            }
        }
    };
}

/// Mutable counterpart of [`with_samples!`], taking a [`SamplesMut`].
#[macro_export]
macro_rules! with_samples_mut {
    ($view:expr, $data:ident => $body:expr) => {
        match $view {
            $crate::SamplesMut::U8(v) => {
                let $data: &mut [u8] = v;
                $body
            }
            $crate::SamplesMut::U16(v) => {
                let $data: &mut [u16] = v;
                $body
            }
            $crate::SamplesMut::F32(v) => {
                let $data: &mut [f32] = v;
                $body
            }
        }
    };
}

/// Borrow a [`SamplesMut`] view and a shared [`PixelBuffer`] of the same
/// kind together.
///
/// Evaluates to `Some($body)`, or `None` when the kinds differ.
#[macro_export]
macro_rules! with_sample_pair {
    ($dst:expr, $src:expr, $d:ident, $s:ident => $body:expr) => {
        match ($dst, $src) {
            ($crate::SamplesMut::U8(a), $crate::PixelBuffer::U8(b)) => {
                let $d: &mut [u8] = a;
                let $s: &[u8] = b;
                Some($body)
            }
            ($crate::SamplesMut::U16(a), $crate::PixelBuffer::U16(b)) => {
                let $d: &mut [u16] = a;
                let $s: &[u16] = b;
                Some($body)
            }
            ($crate::SamplesMut::F32(a), $crate::PixelBuffer::F32(b)) => {
                let $d: &mut [f32] = a;
                let $s: &[f32] = b;
                Some($body)
            }
            _ => None,
        }
    };
}

impl PixelBuffer {
    /// Allocate `len` zeroed elements of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the allocator refuses the request.
    pub fn zeroed(kind: SampleKind, len: usize) -> Result<Self> {
        Ok(match kind {
            SampleKind::U8 => PixelBuffer::U8(alloc_samples(len)?),
            SampleKind::U16 => PixelBuffer::U16(alloc_samples(len)?),
            SampleKind::F32 => PixelBuffer::F32(alloc_samples(len)?),
        })
    }

    /// An empty buffer of the given kind.
    pub fn empty(kind: SampleKind) -> Self {
        match kind {
            SampleKind::U8 => PixelBuffer::U8(Vec::new()),
            SampleKind::U16 => PixelBuffer::U16(Vec::new()),
            SampleKind::F32 => PixelBuffer::F32(Vec::new()),
        }
    }

    /// Element kind held by this buffer.
    pub fn kind(&self) -> SampleKind {
        match self {
            PixelBuffer::U8(_) => SampleKind::U8,
            PixelBuffer::U16(_) => SampleKind::U16,
            PixelBuffer::F32(_) => SampleKind::F32,
        }
    }

    /// Borrow the elements through a fixed-length mutable view.
    pub fn as_samples_mut(&mut self) -> SamplesMut<'_> {
        match self {
            PixelBuffer::U8(v) => SamplesMut::U8(v),
            PixelBuffer::U16(v) => SamplesMut::U16(v),
            PixelBuffer::F32(v) => SamplesMut::F32(v),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        with_samples!(self, data => data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the elements in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * self.kind().bytes()
    }

    /// Element `index` widened to `f32`.
    #[inline]
    pub fn get_f32(&self, index: usize) -> Option<f32> {
        match self {
            PixelBuffer::U8(v) => v.get(index).map(|&s| s as f32),
            PixelBuffer::U16(v) => v.get(index).map(|&s| s as f32),
            PixelBuffer::F32(v) => v.get(index).copied(),
        }
    }

    /// Store `value` at `index`, rounding and clamping for integer kinds.
    ///
    /// Returns false if `index` is out of range.
    #[inline]
    pub fn set_f32(&mut self, index: usize, value: f32) -> bool {
        use crate::sample::Sample;
        with_samples_mut!(self.as_samples_mut(), data => match data.get_mut(index) {
            Some(slot) => {
                *slot = Sample::from_f32(value);
                true
            }
            None => false,
        })
    }

    /// Clone with a fallible allocation.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(match self {
            PixelBuffer::U8(v) => PixelBuffer::U8(copy_samples(v)?),
            PixelBuffer::U16(v) => PixelBuffer::U16(copy_samples(v)?),
            PixelBuffer::F32(v) => PixelBuffer::F32(copy_samples(v)?),
        })
    }

    /// Fail unless this buffer holds exactly `expected` elements.
    pub(crate) fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(Error::BufferLengthMismatch {
                expected,
                actual: self.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<u8>> for PixelBuffer {
    fn from(data: Vec<u8>) -> Self {
        PixelBuffer::U8(data)
    }
}

impl From<Vec<u16>> for PixelBuffer {
    fn from(data: Vec<u16>) -> Self {
        PixelBuffer::U16(data)
    }
}

impl From<Vec<f32>> for PixelBuffer {
    fn from(data: Vec<f32>) -> Self {
        PixelBuffer::F32(data)
    }
}
