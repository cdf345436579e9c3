//! The operations a surface implementation provides to its callers.

use crate::error::BackendError;
use soft_blit::{BlitOutcome, BlitRequest, BltFastFlags, SurfaceDesc};
use soft_blit_common::rect::Rect;

/// Direct access to the pixels of a locked rectangle.
///
/// `pixels` starts at the top left pixel of `rect`; row `y` of the rectangle
/// starts `y * pitch` bytes later.
#[derive(Debug)]
pub struct LockedRect<'a> {
    /// The locked rectangle.
    pub rect: Rect,
    /// Bytes between consecutive rows.
    pub pitch: usize,
    /// Surface memory from the first pixel of `rect` onwards.
    pub pixels: &'a mut [u8],
}

/// A surface that can be blitted to, locked and flipped.
///
/// Every operation that writes pixels records the written rectangle as dirty.
pub trait SurfaceBackend {
    /// Layout and colour keys of the surface.
    fn desc(&self) -> &SurfaceDesc;

    /// Blits from `src`, or from nothing for fills, onto this surface.
    ///
    /// # Errors
    ///
    /// - [`BackendError::AlreadyLocked`] if either surface is locked
    /// - [`BackendError::Blit`] when the engine rejects the request
    fn blt(&mut self, src: Option<&Self>, request: &BlitRequest) -> Result<BlitOutcome, BackendError>;

    /// Blits within this surface.
    ///
    /// # Errors
    ///
    /// As [`SurfaceBackend::blt`].
    fn blt_self(&mut self, request: &BlitRequest) -> Result<BlitOutcome, BackendError>;

    /// Copies `src_rect` of `src` (all of it when `None`) 1:1 to `(x, y)`.
    ///
    /// # Errors
    ///
    /// As [`SurfaceBackend::blt`].
    fn blt_fast(
        &mut self,
        x: i32,
        y: i32,
        src: &Self,
        src_rect: Option<Rect>,
        flags: BltFastFlags,
    ) -> Result<BlitOutcome, BackendError>;

    /// Locks `rect` (the whole surface when `None`) for direct pixel access.
    ///
    /// # Errors
    ///
    /// - [`BackendError::AlreadyLocked`] if the surface is locked
    /// - [`BackendError::Blit`] with an invalid rectangle when `rect` is not
    ///   inside the surface
    fn lock(&mut self, rect: Option<Rect>) -> Result<LockedRect<'_>, BackendError>;

    /// Ends the current lock and marks the locked rectangle dirty.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotLocked`] if the surface is not locked.
    fn unlock(&mut self) -> Result<(), BackendError>;

    /// Exchanges the contents of this surface with its attached back buffer.
    ///
    /// # Errors
    ///
    /// - [`BackendError::NoBackBuffer`] if no back buffer is attached
    /// - [`BackendError::AlreadyLocked`] if either buffer is locked
    fn flip(&mut self) -> Result<(), BackendError>;
}
