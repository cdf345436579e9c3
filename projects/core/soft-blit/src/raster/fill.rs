//! Solid rectangle fills.

use super::pixel::Pixel;
use soft_blit_common::rect::Rect;

/// Writes `color`, truncated to the pixel width, into every pixel of `rect`.
///
/// The first row is filled pixel by pixel; every further row is a copy of it.
pub fn fill_rect<P: Pixel>(dst: &mut [u8], pitch: usize, rect: &Rect, color: u32) {
    let row_bytes = rect.width() as usize * P::BYTES;
    let first = rect.top as usize * pitch + rect.left as usize * P::BYTES;
    let value = P::from_bits(color);

    for out in dst[first..first + row_bytes].chunks_exact_mut(P::BYTES) {
        value.store(out);
    }

    for row in 1..rect.height() as usize {
        dst.copy_within(first..first + row_bytes, first + row * pitch);
    }
}
