//! Pixel format table
//!
//! Every pixel format is described by exactly one [`FormatInfo`] row in
//! [`FORMAT_TABLE`]. All other code asks the table for channel counts,
//! element widths, numeric ranges and capabilities instead of matching on
//! [`PixelFormat`] directly.
//!
//! | Format | Channels | Bytes | Kind | Layout |
//! |---|---|---|---|---|
//! | `Gray8` | 1 | 1 | u8 | Gray |
//! | `Gray16` | 1 | 2 | u16 | Gray |
//! | `Rgb24` | 3 | 1 | u8 | Rgb |
//! | `Rgb48` | 3 | 2 | u16 | Rgb |
//! | `Rgba32` | 4 | 1 | u8 | Rgba |
//! | `Rgba64` | 4 | 2 | u16 | Rgba |
//! | `Float32` | 1 | 4 | f32 | Gray |
//! | `Float32Rgb` | 3 | 4 | f32 | Rgb |
//! | `Float32Rgba` | 4 | 4 | f32 | Rgba |
//! | `Indexed8` | 1 | 1 | u8 | Indexed |
//! | `Yuv24` | 3 | 1 | u8 | Yuv |

use std::fmt;

/// Numeric kind of one channel element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// 32-bit IEEE float, nominal range `[0, 1]`
    F32,
}

impl SampleKind {
    /// Width of one element in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            SampleKind::U8 => 1,
            SampleKind::U16 => 2,
            SampleKind::F32 => 4,
        }
    }

    /// Largest representable value (nominal for floats).
    #[inline]
    pub const fn max_value(self) -> f32 {
        match self {
            SampleKind::U8 => 255.0,
            SampleKind::U16 => 65535.0,
            SampleKind::F32 => 1.0,
        }
    }

    /// Center of the value range, used by contrast and emboss.
    #[inline]
    pub const fn midpoint(self) -> f32 {
        match self {
            SampleKind::U8 => 128.0,
            SampleKind::U16 => 32768.0,
            SampleKind::F32 => 0.5,
        }
    }

    /// Returns true for floating-point samples.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, SampleKind::F32)
    }

    /// Short type name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            SampleKind::U8 => "u8",
            SampleKind::U16 => "u16",
            SampleKind::F32 => "f32",
        }
    }
}

/// What the channels of a pixel mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// One intensity channel
    Gray,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
    /// One palette index per pixel
    Indexed,
    /// Luma followed by two chroma channels
    Yuv,
}

/// Pixel format: channel layout, element width and numeric kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Gray8,
    Gray16,
    Rgb24,
    Rgb48,
    Rgba32,
    Rgba64,
    Float32,
    Float32Rgb,
    Float32Rgba,
    Indexed8,
    Yuv24,
}

/// One row of the format table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub format: PixelFormat,
    pub name: &'static str,
    pub channels: u32,
    pub kind: SampleKind,
    pub layout: ChannelLayout,
    /// Samples are intensities that may be scaled, mixed and interpolated.
    /// False for palette indices.
    pub arithmetic: bool,
}

const fn row(
    format: PixelFormat,
    name: &'static str,
    channels: u32,
    kind: SampleKind,
    layout: ChannelLayout,
    arithmetic: bool,
) -> FormatInfo {
    FormatInfo {
        format,
        name,
        channels,
        kind,
        layout,
        arithmetic,
    }
}

/// The format table, indexed by `PixelFormat as usize`.
pub static FORMAT_TABLE: [FormatInfo; 11] = [
    row(PixelFormat::Gray8, "GRAY8", 1, SampleKind::U8, ChannelLayout::Gray, true),
    row(PixelFormat::Gray16, "GRAY16", 1, SampleKind::U16, ChannelLayout::Gray, true),
    row(PixelFormat::Rgb24, "RGB24", 3, SampleKind::U8, ChannelLayout::Rgb, true),
    row(PixelFormat::Rgb48, "RGB48", 3, SampleKind::U16, ChannelLayout::Rgb, true),
    row(PixelFormat::Rgba32, "RGBA32", 4, SampleKind::U8, ChannelLayout::Rgba, true),
    row(PixelFormat::Rgba64, "RGBA64", 4, SampleKind::U16, ChannelLayout::Rgba, true),
    row(PixelFormat::Float32, "FLOAT32", 1, SampleKind::F32, ChannelLayout::Gray, true),
    row(PixelFormat::Float32Rgb, "FLOAT32_RGB", 3, SampleKind::F32, ChannelLayout::Rgb, true),
    row(PixelFormat::Float32Rgba, "FLOAT32_RGBA", 4, SampleKind::F32, ChannelLayout::Rgba, true),
    row(PixelFormat::Indexed8, "INDEXED8", 1, SampleKind::U8, ChannelLayout::Indexed, false),
    row(PixelFormat::Yuv24, "YUV24", 3, SampleKind::U8, ChannelLayout::Yuv, true),
];

impl PixelFormat {
    /// All formats in table order.
    pub const ALL: [PixelFormat; 11] = [
        PixelFormat::Gray8,
        PixelFormat::Gray16,
        PixelFormat::Rgb24,
        PixelFormat::Rgb48,
        PixelFormat::Rgba32,
        PixelFormat::Rgba64,
        PixelFormat::Float32,
        PixelFormat::Float32Rgb,
        PixelFormat::Float32Rgba,
        PixelFormat::Indexed8,
        PixelFormat::Yuv24,
    ];

    /// Table row for this format.
    #[inline]
    pub fn info(self) -> &'static FormatInfo {
        &FORMAT_TABLE[self as usize]
    }

    /// Number of channels per pixel (1, 3 or 4).
    #[inline]
    pub fn channels(self) -> u32 {
        self.info().channels
    }

    /// Bytes per channel element (1, 2 or 4).
    #[inline]
    pub fn bytes_per_element(self) -> usize {
        self.info().kind.bytes()
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        self.channels() as usize * self.bytes_per_element()
    }

    #[inline]
    pub fn sample_kind(self) -> SampleKind {
        self.info().kind
    }

    #[inline]
    pub fn layout(self) -> ChannelLayout {
        self.info().layout
    }

    /// Largest representable element value.
    #[inline]
    pub fn max_value(self) -> f32 {
        self.info().kind.max_value()
    }

    #[inline]
    pub fn midpoint(self) -> f32 {
        self.info().kind.midpoint()
    }

    #[inline]
    pub fn is_float(self) -> bool {
        self.info().kind.is_float()
    }

    /// Whether samples may be scaled, mixed and interpolated.
    #[inline]
    pub fn supports_arithmetic(self) -> bool {
        self.info().arithmetic
    }

    /// Whether the first three channels are red, green and blue.
    #[inline]
    pub fn has_rgb(self) -> bool {
        matches!(self.layout(), ChannelLayout::Rgb | ChannelLayout::Rgba)
    }

    /// Index of the alpha channel, if any.
    #[inline]
    pub fn alpha_channel(self) -> Option<usize> {
        match self.layout() {
            ChannelLayout::Rgba => Some(3),
            _ => None,
        }
    }

    /// Number of leading channels that carry color or intensity (alpha excluded).
    #[inline]
    pub fn color_channels(self) -> usize {
        match self.alpha_channel() {
            Some(a) => a,
            None => self.channels() as usize,
        }
    }

    /// Single-channel format with the same element kind.
    pub fn gray_equivalent(self) -> PixelFormat {
        match self.sample_kind() {
            SampleKind::U8 => PixelFormat::Gray8,
            SampleKind::U16 => PixelFormat::Gray16,
            SampleKind::F32 => PixelFormat::Float32,
        }
    }

    /// Table name (e.g. `"RGB24"`).
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
