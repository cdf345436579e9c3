//! # Pixel Format Descriptor
//!
//! A [`PixelFormat`] describes how the bytes of one surface are laid out:
//! its bit depth, the channel masks of RGB formats, and whether pixels are
//! palette indices or 4x4 compressed blocks.
//!
//! The well-known layouts are available as constants:
//!
//! | constant | depth | masks (R/G/B) |
//! |---|---|---|
//! | [`PixelFormat::INDEXED8`] | 8 | palette |
//! | [`PixelFormat::RGB555`] | 16 | `0x7C00/0x03E0/0x001F` |
//! | [`PixelFormat::RGB565`] | 16 | `0xF800/0x07E0/0x001F` |
//! | [`PixelFormat::RGB888`] | 24 | `0xFF0000/0x00FF00/0x0000FF` |
//! | [`PixelFormat::XRGB8888`] | 32 | `0xFF0000/0x00FF00/0x0000FF` |

use crate::compressed_format::CompressedFormat;

/// What the bits of a pixel mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Channels are described by the masks.
    Rgb,
    /// Pixels are indices into a 256-entry palette.
    Indexed,
    /// The surface stores 4x4 blocks of the given encoding.
    Compressed(CompressedFormat),
}

/// Bit depth, channel masks and kind of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    /// Bits per pixel. Nominal for compressed formats.
    pub bits_per_pixel: u32,
    /// Mask of the red channel (RGB formats only).
    pub red_mask: u32,
    /// Mask of the green channel (RGB formats only).
    pub green_mask: u32,
    /// Mask of the blue channel (RGB formats only).
    pub blue_mask: u32,
    /// Mask of the alpha channel, zero when the format has none.
    pub alpha_mask: u32,
    /// Whether the pixels are RGB, indices or compressed blocks.
    pub kind: FormatKind,
}

impl PixelFormat {
    /// 1bpp palette indices.
    pub const INDEXED1: Self = Self::indexed(1);
    /// 4bpp palette indices.
    pub const INDEXED4: Self = Self::indexed(4);
    /// 8bpp palette indices.
    pub const INDEXED8: Self = Self::indexed(8);
    /// 15bpp colour stored in 16 bits.
    pub const RGB555: Self = Self::rgb(16, 0x7C00, 0x03E0, 0x001F, 0);
    /// 16bpp colour.
    pub const RGB565: Self = Self::rgb(16, 0xF800, 0x07E0, 0x001F, 0);
    /// Packed 24bpp colour, blue in the lowest byte.
    pub const RGB888: Self = Self::rgb(24, 0xFF_0000, 0x00_FF00, 0x00_00FF, 0);
    /// 32bpp colour with an unused top byte.
    pub const XRGB8888: Self = Self::rgb(32, 0xFF_0000, 0x00_FF00, 0x00_00FF, 0);
    /// 32bpp colour with alpha in the top byte.
    pub const ARGB8888: Self = Self::rgb(32, 0xFF_0000, 0x00_FF00, 0x00_00FF, 0xFF00_0000);

    /// Describes a palette-indexed format of the given depth.
    pub const fn indexed(bits_per_pixel: u32) -> Self {
        Self {
            bits_per_pixel,
            red_mask: 0,
            green_mask: 0,
            blue_mask: 0,
            alpha_mask: 0,
            kind: FormatKind::Indexed,
        }
    }

    /// Describes an RGB format with explicit channel masks.
    pub const fn rgb(
        bits_per_pixel: u32,
        red_mask: u32,
        green_mask: u32,
        blue_mask: u32,
        alpha_mask: u32,
    ) -> Self {
        Self {
            bits_per_pixel,
            red_mask,
            green_mask,
            blue_mask,
            alpha_mask,
            kind: FormatKind::Rgb,
        }
    }

    /// Describes a block-compressed format.
    pub fn compressed(format: CompressedFormat) -> Self {
        Self {
            bits_per_pixel: format.bits_per_texel(),
            red_mask: 0,
            green_mask: 0,
            blue_mask: 0,
            alpha_mask: 0,
            kind: FormatKind::Compressed(format),
        }
    }

    /// Returns `true` for palette-indexed formats.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.kind == FormatKind::Indexed
    }

    /// Returns the block encoding of compressed formats.
    #[inline]
    pub fn compressed_format(&self) -> Option<CompressedFormat> {
        match self.kind {
            FormatKind::Compressed(format) => Some(format),
            _ => None,
        }
    }

    /// Bytes per pixel for whole-byte uncompressed formats of 1 to 4 bytes.
    /// Sub-byte, compressed and oversized formats return [`None`].
    #[inline]
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match (self.kind, self.bits_per_pixel) {
            (FormatKind::Compressed(_), _) => None,
            (_, bits @ (8 | 16 | 24 | 32)) => Some(bits as usize / 8),
            _ => None,
        }
    }

    /// The mask applied to a pixel before it is compared with a colour key.
    ///
    /// One byte formats compare the whole byte; wider formats compare the
    /// RGB channel bits and ignore alpha or padding.
    #[inline]
    pub fn color_key_mask(&self) -> u32 {
        if self.bytes_per_pixel() == Some(1) {
            0xFF
        } else {
            self.red_mask | self.green_mask | self.blue_mask
        }
    }

    /// Number of bytes one row (or one row of blocks) of `width` pixels occupies.
    ///
    /// Saturates at `usize::MAX` on targets where the row does not fit.
    pub fn row_bytes(&self, width: u32) -> usize {
        match self.kind {
            FormatKind::Compressed(format) => {
                CompressedFormat::blocks_for(width).saturating_mul(format.block_byte_count())
            }
            _ => (width as usize)
                .saturating_mul(self.bits_per_pixel as usize)
                .div_ceil(8),
        }
    }

    /// Number of rows (or rows of blocks) a surface of `height` pixels has.
    pub fn row_count(&self, height: u32) -> usize {
        match self.kind {
            FormatKind::Compressed(_) => CompressedFormat::blocks_for(height),
            _ => height as usize,
        }
    }

    /// Smallest buffer able to hold `width` x `height` pixels at `pitch`.
    /// The last row only needs its own bytes, not a whole pitch.
    ///
    /// `None` when the layout does not fit in the address space.
    pub fn min_buffer_len(&self, width: u32, height: u32, pitch: usize) -> Option<usize> {
        match self.row_count(height) {
            0 => Some(0),
            rows => (rows - 1)
                .checked_mul(pitch)?
                .checked_add(self.row_bytes(width)),
        }
    }
}
