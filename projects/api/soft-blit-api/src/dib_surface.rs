//! Surfaces backed by owned system memory.

use crate::backend::{LockedRect, SurfaceBackend};
use crate::error::BackendError;
use alloc::boxed::Box;
use core::fmt;
use log::{debug, trace};
use soft_blit::{
    blt, blt_fast, blt_self, BlitConfig, BlitError, BlitOutcome, BlitRequest, BltFastFlags,
    ColorKey, SurfaceDesc, SurfaceView, SurfaceViewMut,
};
use soft_blit_common::allocate::ScratchBuffer;
use soft_blit_common::palette::Palette;
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;

/// A surface whose pixels live in a 64-byte aligned buffer it owns.
///
/// The surface keeps the union of every rectangle written since the last
/// [`DibSurface::take_dirty`], so a presenter only has to copy what changed.
///
/// # Examples
///
/// ```
/// use soft_blit::BlitRequest;
/// use soft_blit_api::{DibSurface, SurfaceBackend};
/// use soft_blit_common::{pixel_format::PixelFormat, rect::Rect};
///
/// let mut surface = DibSurface::new(8, 8, PixelFormat::RGB565).unwrap();
/// let fill = BlitRequest::builder()
///     .dst_rect(Rect::new(2, 2, 4, 4))
///     .color_fill(0xF800)
///     .build();
/// surface.blt(None, &fill).unwrap();
/// assert_eq!(surface.take_dirty(), Some(Rect::new(2, 2, 4, 4)));
/// ```
pub struct DibSurface {
    desc: SurfaceDesc,
    pixels: ScratchBuffer,
    palette: Option<Palette>,
    locked: Option<Rect>,
    dirty: Option<Rect>,
    back_buffer: Option<Box<DibSurface>>,
    config: BlitConfig<'static>,
}

impl fmt::Debug for DibSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DibSurface")
            .field("desc", &self.desc)
            .field("locked", &self.locked)
            .field("dirty", &self.dirty)
            .field("has_palette", &self.palette.is_some())
            .field("has_back_buffer", &self.back_buffer.is_some())
            .finish()
    }
}

impl DibSurface {
    /// A zeroed, tightly packed surface.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Surface`] for a zero sized surface
    /// - [`BackendError::AllocationFailed`] when memory cannot be allocated
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, BackendError> {
        Self::with_desc(SurfaceDesc::packed(width, height, format))
    }

    /// A zeroed surface with the layout and colour keys of `desc`.
    ///
    /// # Errors
    ///
    /// As [`DibSurface::new`], plus [`BackendError::Surface`] when the pitch
    /// is shorter than a row.
    pub fn with_desc(desc: SurfaceDesc) -> Result<Self, BackendError> {
        let len = desc.min_buffer_len()?;
        desc.validate(len)?;
        Ok(Self {
            desc,
            pixels: ScratchBuffer::new(len)?,
            palette: None,
            locked: None,
            dirty: None,
            back_buffer: None,
            config: BlitConfig::default(),
        })
    }

    /// A surface holding a copy of `pixels`.
    ///
    /// # Errors
    ///
    /// As [`DibSurface::with_desc`], plus [`BackendError::Surface`] when
    /// `pixels` is too short for `desc`.
    pub fn from_pixels(desc: SurfaceDesc, pixels: &[u8]) -> Result<Self, BackendError> {
        desc.validate(pixels.len())?;
        let mut surface = Self::with_desc(desc)?;
        let len = surface.pixels.len();
        surface.pixels.as_mut_slice().copy_from_slice(&pixels[..len]);
        Ok(surface)
    }

    /// Replaces the blit configuration used by this surface.
    pub fn with_config(mut self, config: BlitConfig<'static>) -> Self {
        self.config = config;
        self
    }

    /// Sets the palette used to convert to and from palettized surfaces.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = Some(palette);
    }

    /// The palette, if one is set.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Sets or clears the source colour key.
    pub fn set_src_color_key(&mut self, key: Option<ColorKey>) {
        self.desc.src_color_key = key;
    }

    /// Sets or clears the destination colour key.
    pub fn set_dst_color_key(&mut self, key: Option<ColorKey>) {
        self.desc.dst_color_key = key;
    }

    /// The whole pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_slice()
    }

    /// `true` between [`SurfaceBackend::lock`] and [`SurfaceBackend::unlock`].
    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Returns and clears the union of the rectangles written so far.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    /// Attaches `back` as the buffer [`SurfaceBackend::flip`] exchanges with.
    ///
    /// # Errors
    ///
    /// [`BackendError::FlipMismatch`] when `back` differs in size, pitch or format.
    pub fn attach_back_buffer(&mut self, back: DibSurface) -> Result<(), BackendError> {
        if !self.same_layout(&back.desc) {
            return Err(BackendError::FlipMismatch {
                front: self.desc,
                back: back.desc,
            });
        }
        self.back_buffer = Some(Box::new(back));
        Ok(())
    }

    /// The attached back buffer.
    pub fn back_buffer(&self) -> Option<&DibSurface> {
        self.back_buffer.as_deref()
    }

    /// The attached back buffer, mutably.
    pub fn back_buffer_mut(&mut self) -> Option<&mut DibSurface> {
        self.back_buffer.as_deref_mut()
    }

    /// A read-only view of the surface, with its palette.
    ///
    /// # Errors
    ///
    /// [`BackendError::AlreadyLocked`] while the surface is locked.
    pub fn view(&self) -> Result<SurfaceView<'_>, BackendError> {
        if self.is_locked() {
            return Err(BackendError::AlreadyLocked);
        }
        let view = SurfaceView::new(self.pixels.as_slice(), self.desc)?;
        Ok(match &self.palette {
            Some(palette) => view.with_palette(palette),
            None => view,
        })
    }

    fn same_layout(&self, other: &SurfaceDesc) -> bool {
        self.desc.width == other.width
            && self.desc.height == other.height
            && self.desc.pitch == other.pitch
            && self.desc.format == other.format
    }

    /// Runs `op` on a mutable view of this surface and records the written rectangle.
    fn write_with<F>(&mut self, op: F) -> Result<BlitOutcome, BackendError>
    where
        F: FnOnce(&mut SurfaceViewMut, &BlitConfig) -> Result<BlitOutcome, BlitError>,
    {
        if self.is_locked() {
            return Err(BackendError::AlreadyLocked);
        }
        let outcome = {
            let view = SurfaceViewMut::new(self.pixels.as_mut_slice(), self.desc)?;
            let mut view = match &self.palette {
                Some(palette) => view.with_palette(palette),
                None => view,
            };
            op(&mut view, &self.config)?
        };
        if let BlitOutcome::Done(rect) = outcome {
            self.mark_dirty(rect);
        }
        Ok(outcome)
    }

    fn mark_dirty(&mut self, rect: Rect) {
        trace!("dirty {rect:?}");
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(&rect),
            None => rect,
        });
    }
}

impl SurfaceBackend for DibSurface {
    fn desc(&self) -> &SurfaceDesc {
        &self.desc
    }

    fn blt(&mut self, src: Option<&Self>, request: &BlitRequest) -> Result<BlitOutcome, BackendError> {
        let src = src.map(DibSurface::view).transpose()?;
        self.write_with(|dst, config| blt(dst, src.as_ref(), request, config))
    }

    fn blt_self(&mut self, request: &BlitRequest) -> Result<BlitOutcome, BackendError> {
        self.write_with(|surface, config| blt_self(surface, request, config))
    }

    fn blt_fast(
        &mut self,
        x: i32,
        y: i32,
        src: &Self,
        src_rect: Option<Rect>,
        flags: BltFastFlags,
    ) -> Result<BlitOutcome, BackendError> {
        let src = src.view()?;
        self.write_with(|dst, config| blt_fast(dst, x, y, &src, src_rect, flags, config))
    }

    fn lock(&mut self, rect: Option<Rect>) -> Result<LockedRect<'_>, BackendError> {
        if self.is_locked() {
            return Err(BackendError::AlreadyLocked);
        }
        let bounds = self.desc.bounds();
        let rect = rect.unwrap_or(bounds);
        if !rect.is_normalized() || !rect.is_within(&bounds) {
            return Err(BlitError::InvalidRect(rect).into());
        }

        let offset = match self.desc.format.bytes_per_pixel() {
            Some(bytes_per_pixel) => {
                rect.top as usize * self.desc.pitch + rect.left as usize * bytes_per_pixel
            }
            // Sub-byte and block formats can only be locked as a whole.
            None if rect == bounds => 0,
            None => {
                return Err(BlitError::UnsupportedBpp(self.desc.format.bits_per_pixel).into())
            }
        };

        debug!("lock {rect:?}");
        self.locked = Some(rect);
        Ok(LockedRect {
            rect,
            pitch: self.desc.pitch,
            pixels: &mut self.pixels.as_mut_slice()[offset..],
        })
    }

    fn unlock(&mut self) -> Result<(), BackendError> {
        let rect = self.locked.take().ok_or(BackendError::NotLocked)?;
        debug!("unlock {rect:?}");
        self.mark_dirty(rect);
        Ok(())
    }

    fn flip(&mut self) -> Result<(), BackendError> {
        if self.is_locked() {
            return Err(BackendError::AlreadyLocked);
        }
        let back = self
            .back_buffer
            .as_deref_mut()
            .ok_or(BackendError::NoBackBuffer)?;
        if back.is_locked() {
            return Err(BackendError::AlreadyLocked);
        }
        core::mem::swap(&mut self.pixels, &mut back.pixels);
        back.mark_dirty(back.desc.bounds());

        let bounds = self.desc.bounds();
        debug!("flip {bounds:?}");
        self.mark_dirty(bounds);
        Ok(())
    }
}
