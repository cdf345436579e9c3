//! Error types for surface decoding.

use soft_blit_common::pixel_format::PixelFormat;
use thiserror::Error;

/// Errors raised while decoding a block-compressed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The destination is not a 16, 24 or 32 bit RGB format.
    #[error("Cannot decode into destination format {0:?}")]
    UnsupportedDestination(PixelFormat),

    /// The compressed source does not hold every block of the surface.
    #[error("Source buffer too small: needed {needed} bytes, got {actual}")]
    SourceTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes provided.
        actual: usize,
    },

    /// The destination cannot hold `width` x `height` pixels at its pitch.
    #[error("Destination buffer too small: needed {needed} bytes, got {actual}")]
    DestinationTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes provided.
        actual: usize,
    },

    /// The rows of a surface at this pitch do not fit in the address space.
    #[error("Surface rows at pitch {pitch} are too large to address")]
    LayoutTooLarge {
        /// The pitch supplied.
        pitch: usize,
    },

    /// A pitch is shorter than one row of blocks or pixels.
    #[error("Pitch {pitch} is shorter than a row of {min_pitch} bytes")]
    PitchTooSmall {
        /// The pitch supplied.
        pitch: usize,
        /// Bytes in one row.
        min_pitch: usize,
    },
}
