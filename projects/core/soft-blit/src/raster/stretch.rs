//! Nearest-neighbour scanline stretching.
//!
//! Source coordinates advance in 16.16 fixed point: `xinc = (src_w << 16) / dst_w`
//! and `yinc = (src_h << 16) / dst_h`. The integer part of the accumulator
//! selects the sample. With equal extents the increments are exactly `1 << 16`
//! and the stretch degenerates to a copy.

use super::pixel::Pixel;
use soft_blit_common::rect::Rect;

/// 16.16 fixed point step covering `src` samples in `dst` steps.
#[inline]
pub(crate) fn fixed_step(src: i64, dst: i64) -> u64 {
    ((src as u64) << 16) / dst as u64
}

/// Stretches `src_rect` of `src` onto `dst_rect` of `dst`.
///
/// When only the height differs, each destination row is a straight copy of
/// its source row. Otherwise rows are resampled, and a destination row whose
/// source row equals the previous one is copied from the row above instead.
pub fn stretch_rows<P: Pixel>(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    dst_pitch: usize,
    dst_rect: &Rect,
) {
    let dst_width = dst_rect.width() as usize;
    let dst_height = dst_rect.height() as usize;
    let xinc = fixed_step(src_rect.width(), dst_rect.width());
    let yinc = fixed_step(src_rect.height(), dst_rect.height());
    let row_bytes = dst_width * P::BYTES;
    let src_row_bytes = src_rect.width() as usize * P::BYTES;

    let src_offset = |row: usize| {
        (src_rect.top as usize + row) * src_pitch + src_rect.left as usize * P::BYTES
    };
    let dst_offset =
        |row: usize| (dst_rect.top as usize + row) * dst_pitch + dst_rect.left as usize * P::BYTES;

    if src_rect.width() == dst_rect.width() {
        let mut sy = 0u64;
        for y in 0..dst_height {
            let s = src_offset((sy >> 16) as usize);
            let d = dst_offset(y);
            dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
            sy += yinc;
        }
        return;
    }

    let mut last_src_row = None;
    let mut sy = 0u64;
    for y in 0..dst_height {
        let src_row = (sy >> 16) as usize;
        let d = dst_offset(y);

        if last_src_row == Some(src_row) {
            let previous = d - dst_pitch;
            dst.copy_within(previous..previous + row_bytes, d);
        } else {
            let s = src_offset(src_row);
            let line = &src[s..s + src_row_bytes];
            let mut sx = 0u64;
            for out in dst[d..d + row_bytes].chunks_exact_mut(P::BYTES) {
                P::load(&line[(sx >> 16) as usize * P::BYTES..]).store(out);
                sx += xinc;
            }
        }

        last_src_row = Some(src_row);
        sy += yinc;
    }
}
