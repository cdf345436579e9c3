//! Scanline rasterizers: unscaled copies, stretches and fills.
//!
//! The generic rasterizers are written over [`Pixel`]; the functions in this
//! module pick the instantiation for a byte depth and are compiled for several
//! x86-64 feature levels, dispatched at runtime when `std` is available.

pub mod copy;
pub mod fill;
pub mod pixel;
pub mod stretch;

pub use copy::{copy_rows, copy_rows_self, CopyDirection};
pub use fill::fill_rect;
pub use pixel::{Pixel, P16, P24, P32, P8};
pub use stretch::stretch_rows;

use crate::error::BlitError;
use multiversion::multiversion;
use soft_blit_common::rect::Rect;

/// Stretches `src_rect` of `src` onto `dst_rect` of `dst` for a pixel of
/// `bytes_per_pixel` bytes.
///
/// # Errors
///
/// [`BlitError::UnsupportedBpp`] for depths other than 1 to 4 bytes.
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub fn stretch(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    dst_pitch: usize,
    dst_rect: &Rect,
    bytes_per_pixel: usize,
) -> Result<(), BlitError> {
    match bytes_per_pixel {
        1 => stretch_rows::<P8>(src, src_pitch, src_rect, dst, dst_pitch, dst_rect),
        2 => stretch_rows::<P16>(src, src_pitch, src_rect, dst, dst_pitch, dst_rect),
        3 => stretch_rows::<P24>(src, src_pitch, src_rect, dst, dst_pitch, dst_rect),
        4 => stretch_rows::<P32>(src, src_pitch, src_rect, dst, dst_pitch, dst_rect),
        other => return Err(BlitError::UnsupportedBpp(other as u32 * 8)),
    }
    Ok(())
}

/// Fills `rect` of `dst` with `color` for a pixel of `bytes_per_pixel` bytes.
///
/// # Errors
///
/// [`BlitError::UnsupportedBpp`] for depths other than 1 to 4 bytes.
pub fn fill(
    dst: &mut [u8],
    pitch: usize,
    rect: &Rect,
    bytes_per_pixel: usize,
    color: u32,
) -> Result<(), BlitError> {
    match bytes_per_pixel {
        1 => fill_rect::<P8>(dst, pitch, rect, color),
        2 => fill_rect::<P16>(dst, pitch, rect, color),
        3 => fill_rect::<P24>(dst, pitch, rect, color),
        4 => fill_rect::<P32>(dst, pitch, rect, color),
        other => return Err(BlitError::UnsupportedBpp(other as u32 * 8)),
    }
    Ok(())
}
