//! Borrowed views over caller-owned pixel buffers.
//!
//! A [`SurfaceView`] (read-only) or [`SurfaceViewMut`] (exclusive) pairs a byte
//! slice with a [`SurfaceDesc`]. Construction checks that the slice holds every
//! row of the surface at its pitch, so all scanline accesses made by the
//! blitter afterwards stay inside the slice.

use crate::error::SurfaceError;
use soft_blit_common::allocate::ScratchBuffer;
use soft_blit_common::palette::Palette;
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;

/// An inclusive range of raw pixel values treated as transparent.
///
/// Pixels are masked with [`PixelFormat::color_key_mask`] before the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorKey {
    /// Lowest keyed value.
    pub low: u32,
    /// Highest keyed value.
    pub high: u32,
}

impl ColorKey {
    /// A key covering `low..=high`.
    #[inline]
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// A key matching exactly one value.
    #[inline]
    pub const fn single(value: u32) -> Self {
        Self::new(value, value)
    }

    /// `true` when `value` lies within the key range.
    #[inline]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Geometry, layout and colour keys of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDesc {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes between the starts of consecutive scanlines (or rows of blocks).
    pub pitch: usize,
    /// Pixel layout.
    pub format: PixelFormat,
    /// Key applied to this surface when it is the source of a keyed blit.
    pub src_color_key: Option<ColorKey>,
    /// Key consulted for destination keying.
    pub dst_color_key: Option<ColorKey>,
}

impl SurfaceDesc {
    /// Describes a surface with an explicit pitch and no colour keys.
    pub const fn new(width: u32, height: u32, pitch: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pitch,
            format,
            src_color_key: None,
            dst_color_key: None,
        }
    }

    /// Describes a surface whose rows are packed without padding.
    pub fn packed(width: u32, height: u32, format: PixelFormat) -> Self {
        Self::new(width, height, format.row_bytes(width), format)
    }

    /// Sets the source colour key.
    pub const fn with_src_color_key(mut self, key: ColorKey) -> Self {
        self.src_color_key = Some(key);
        self
    }

    /// Sets the destination colour key.
    pub const fn with_dst_color_key(mut self, key: ColorKey) -> Self {
        self.dst_color_key = Some(key);
        self
    }

    /// The rectangle covering the whole surface.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::bounds(self.width, self.height)
    }

    /// Smallest buffer able to back this surface.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::LayoutTooLarge`] when the rows at this pitch do not
    /// fit in the address space.
    #[inline]
    pub fn min_buffer_len(&self) -> Result<usize, SurfaceError> {
        self.format
            .min_buffer_len(self.width, self.height, self.pitch)
            .ok_or(SurfaceError::LayoutTooLarge {
                height: self.height,
                pitch: self.pitch,
            })
    }

    /// Checks that `len` bytes can back this surface.
    pub fn validate(&self, len: usize) -> Result<(), SurfaceError> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::ZeroSized);
        }
        let min_pitch = self.format.row_bytes(self.width);
        if self.pitch < min_pitch {
            return Err(SurfaceError::PitchTooSmall {
                pitch: self.pitch,
                min_pitch,
            });
        }
        let needed = self.min_buffer_len()?;
        if len < needed {
            return Err(SurfaceError::BufferTooSmall {
                needed,
                actual: len,
            });
        }
        Ok(())
    }
}

/// Read-only view of a surface, borrowed for the duration of one blit.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    desc: SurfaceDesc,
    pixels: &'a [u8],
    palette: Option<&'a Palette>,
}

impl<'a> SurfaceView<'a> {
    /// Wraps `pixels`, checking that they can hold the surface described by `desc`.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit::{SurfaceDesc, SurfaceView};
    /// use soft_blit_common::pixel_format::PixelFormat;
    ///
    /// let pixels = [0u8; 4 * 4 * 2];
    /// let view = SurfaceView::new(&pixels, SurfaceDesc::packed(4, 4, PixelFormat::RGB565)).unwrap();
    /// assert_eq!(view.desc().pitch, 8);
    /// ```
    pub fn new(pixels: &'a [u8], desc: SurfaceDesc) -> Result<Self, SurfaceError> {
        desc.validate(pixels.len())?;
        Ok(Self {
            desc,
            pixels,
            palette: None,
        })
    }

    /// Attaches the palette used to expand indexed pixels.
    pub fn with_palette(mut self, palette: &'a Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Surface description.
    #[inline]
    pub fn desc(&self) -> &SurfaceDesc {
        &self.desc
    }

    /// Pixel layout.
    #[inline]
    pub fn format(&self) -> &PixelFormat {
        &self.desc.format
    }

    /// Raw pixel bytes.
    #[inline]
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Attached palette, if any.
    #[inline]
    pub fn palette(&self) -> Option<&'a Palette> {
        self.palette
    }
}

/// Exclusive view of a surface, borrowed for the duration of one blit.
#[derive(Debug)]
pub struct SurfaceViewMut<'a> {
    desc: SurfaceDesc,
    pixels: &'a mut [u8],
    palette: Option<&'a Palette>,
}

impl<'a> SurfaceViewMut<'a> {
    /// Wraps `pixels`, checking that they can hold the surface described by `desc`.
    pub fn new(pixels: &'a mut [u8], desc: SurfaceDesc) -> Result<Self, SurfaceError> {
        desc.validate(pixels.len())?;
        Ok(Self {
            desc,
            pixels,
            palette: None,
        })
    }

    /// Attaches the palette used to map RGB pixels onto indices.
    pub fn with_palette(mut self, palette: &'a Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Surface description.
    #[inline]
    pub fn desc(&self) -> &SurfaceDesc {
        &self.desc
    }

    /// Pixel layout.
    #[inline]
    pub fn format(&self) -> &PixelFormat {
        &self.desc.format
    }

    /// Raw pixel bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &*self.pixels
    }

    /// Raw pixel bytes, mutably.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut *self.pixels
    }

    /// Attached palette, if any.
    #[inline]
    pub fn palette(&self) -> Option<&'a Palette> {
        self.palette
    }

    /// Reborrows as a read-only view.
    #[inline]
    pub fn as_view(&self) -> SurfaceView<'_> {
        SurfaceView {
            desc: self.desc,
            pixels: &*self.pixels,
            palette: self.palette,
        }
    }
}

/// A surface owned by the engine for the duration of one call: converted,
/// decoded or snapshotted source pixels.
pub(crate) struct ScratchSurface {
    buffer: ScratchBuffer,
    desc: SurfaceDesc,
}

impl ScratchSurface {
    /// Allocates a zeroed, tightly packed surface.
    pub(crate) fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, soft_blit_common::allocate::AllocateError> {
        let desc = SurfaceDesc::packed(width, height, format);
        // An unrepresentable layout cannot be allocated either.
        let buffer = ScratchBuffer::new(desc.min_buffer_len().unwrap_or(usize::MAX))?;
        Ok(Self { buffer, desc })
    }

    #[inline]
    pub(crate) fn desc(&self) -> &SurfaceDesc {
        &self.desc
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Views the scratch pixels. The buffer was sized from the description, so
    /// no validation is needed.
    #[inline]
    pub(crate) fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            desc: self.desc,
            pixels: self.buffer.as_slice(),
            palette: None,
        }
    }
}
