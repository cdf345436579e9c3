//! Error types for blit operations and surface construction.

use crate::request::BlitFlags;
use soft_blit_common::allocate::AllocateError;
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;
use thiserror::Error;

/// Errors that can occur during a blit.
///
/// A failed blit may already have written some destination scanlines. Those
/// rows hold valid pixels but the rectangle as a whole is not updated atomically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlitError {
    /// A rectangle supplied by the caller has `right < left` or `bottom < top`.
    #[error("Invalid rectangle: {0:?}")]
    InvalidRect(Rect),

    /// No conversion exists between the two formats, or the operation cannot
    /// run on them (compressed destinations, colour keys across formats).
    #[error("Unsupported format combination: {src:?} -> {dst:?}")]
    UnsupportedFormat {
        /// Format of the source (or of the destination for source-less operations).
        src: PixelFormat,
        /// Format of the destination.
        dst: PixelFormat,
    },

    /// The requested flags cannot be combined, or need a source or colour key
    /// that was not provided.
    #[error("Unsupported flag combination: {0:?}")]
    UnsupportedFlagCombination(BlitFlags),

    /// A surface uses a bit depth the rasterizer has no path for.
    #[error("Unsupported bit depth: {0} bits per pixel")]
    UnsupportedBpp(u32),

    /// The raster operation code is not one of the implemented codes.
    #[error("Unsupported raster operation: {0:#010x}")]
    UnsupportedRop(u32),

    /// A scratch surface could not be allocated.
    #[error("Memory allocation failed: {0}")]
    AllocationFailed(#[from] AllocateError),
}

/// Errors raised when a pixel buffer is wrapped in a surface view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The buffer does not hold `height` rows at the given pitch.
    #[error("Surface buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    BufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The pitch is shorter than one row of pixels.
    #[error("Pitch {pitch} is shorter than a row of {min_pitch} bytes.")]
    PitchTooSmall {
        /// The pitch supplied
        pitch: usize,
        /// Bytes in one row
        min_pitch: usize,
    },

    /// `height` rows at `pitch` bytes do not fit in the address space.
    #[error("Surface of {height} rows at pitch {pitch} is too large to address.")]
    LayoutTooLarge {
        /// Rows in the surface
        height: u32,
        /// The pitch supplied
        pitch: usize,
    },

    /// The surface has no pixels.
    #[error("Surface has zero width or height.")]
    ZeroSized,
}
