//! Channel element types
//!
//! [`Sample`] is implemented for the three element types a [`PixelBuffer`]
//! can hold. Generic pixel loops work in `f32` and convert back with
//! [`Sample::from_f32`], which rounds and clamps integer kinds.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::format::SampleKind;

/// A channel element: `u8`, `u16` or `f32`.
pub trait Sample: Copy + Default + PartialEq + PartialOrd + std::fmt::Debug + 'static {
    /// Numeric kind of this element type.
    const KIND: SampleKind;

    /// Largest representable value (1.0 for floats).
    const MAX: f32;

    /// Widen to `f32` without scaling.
    fn to_f32(self) -> f32;

    /// Narrow from `f32`. Integer kinds round to nearest and clamp to
    /// `[0, MAX]`; floats are stored unchanged.
    fn from_f32(value: f32) -> Self;

    /// Wrap a vector of this element type in the matching buffer variant.
    fn into_buffer(data: Vec<Self>) -> PixelBuffer;

    /// Borrow the buffer's elements if it holds this element type.
    fn slice_of(buffer: &PixelBuffer) -> Option<&[Self]>;

    /// Mutably borrow the buffer's elements if it holds this element type.
    fn slice_of_mut(buffer: &mut PixelBuffer) -> Option<&mut [Self]>;

    /// Narrow from `f32` clamping to `[0, MAX]` for every kind, floats included.
    #[inline]
    fn from_f32_clamped(value: f32) -> Self {
        Self::from_f32(value.clamp(0.0, Self::MAX))
    }
}

impl Sample for u8 {
    const KIND: SampleKind = SampleKind::U8;
    const MAX: f32 = 255.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, 255.0) as u8
    }

    fn into_buffer(data: Vec<Self>) -> PixelBuffer {
        PixelBuffer::U8(data)
    }

    fn slice_of(buffer: &PixelBuffer) -> Option<&[Self]> {
        match buffer {
            PixelBuffer::U8(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    fn slice_of_mut(buffer: &mut PixelBuffer) -> Option<&mut [Self]> {
        match buffer {
            PixelBuffer::U8(data) => Some(data.as_mut_slice()),
            _ => None,
        }
    }
}

impl Sample for u16 {
    const KIND: SampleKind = SampleKind::U16;
    const MAX: f32 = 65535.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, 65535.0) as u16
    }

    fn into_buffer(data: Vec<Self>) -> PixelBuffer {
        PixelBuffer::U16(data)
    }

    fn slice_of(buffer: &PixelBuffer) -> Option<&[Self]> {
        match buffer {
            PixelBuffer::U16(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    fn slice_of_mut(buffer: &mut PixelBuffer) -> Option<&mut [Self]> {
        match buffer {
            PixelBuffer::U16(data) => Some(data.as_mut_slice()),
            _ => None,
        }
    }
}

impl Sample for f32 {
    const KIND: SampleKind = SampleKind::F32;
    const MAX: f32 = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }

    fn into_buffer(data: Vec<Self>) -> PixelBuffer {
        PixelBuffer::F32(data)
    }

    fn slice_of(buffer: &PixelBuffer) -> Option<&[Self]> {
        match buffer {
            PixelBuffer::F32(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    fn slice_of_mut(buffer: &mut PixelBuffer) -> Option<&mut [Self]> {
        match buffer {
            PixelBuffer::F32(data) => Some(data.as_mut_slice()),
            _ => None,
        }
    }
}

/// Allocate `len` zeroed samples, reporting failure instead of aborting.
pub fn alloc_samples<T: Sample>(len: usize) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed(len))?;
    data.resize(len, T::default());
    Ok(data)
}

/// Copy `src` into a freshly allocated vector, reporting allocation failure.
pub fn copy_samples<T: Sample>(src: &[T]) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(src.len())
        .map_err(|_| Error::AllocationFailed(src.len()))?;
    data.extend_from_slice(src);
    Ok(data)
}
