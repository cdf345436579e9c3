//! Unscaled scanline copies, between surfaces and within one surface.

use log::debug;
use soft_blit_common::rect::Rect;

/// Order in which the rows of a same-surface copy are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDirection {
    /// First row first. Used when the destination is above the source or
    /// the rectangles share no columns.
    TopDown,
    /// Last row first. Used when the destination is below the source.
    BottomUp,
    /// Rows share scanlines; each row is moved with overlap-safe semantics.
    RowMove,
}

impl CopyDirection {
    /// Picks the direction for copying `src` onto `dst` within one surface.
    pub fn select(src: &Rect, dst: &Rect) -> Self {
        if dst.top < src.top || dst.right <= src.left || src.right <= dst.left {
            CopyDirection::TopDown
        } else if dst.top > src.top {
            CopyDirection::BottomUp
        } else {
            CopyDirection::RowMove
        }
    }
}

#[inline(always)]
fn row_offset(rect: &Rect, row: usize, pitch: usize, bytes_per_pixel: usize) -> usize {
    (rect.top as usize + row) * pitch + rect.left as usize * bytes_per_pixel
}

/// Copies `dst_rect.width()` x `dst_rect.height()` pixels from `src` to `dst`
/// one scanline at a time. Both rectangles must lie inside their surfaces and
/// have equal extents.
pub fn copy_rows(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    dst_pitch: usize,
    dst_rect: &Rect,
    bytes_per_pixel: usize,
) {
    let row_bytes = dst_rect.width() as usize * bytes_per_pixel;
    for row in 0..dst_rect.height() as usize {
        let s = row_offset(src_rect, row, src_pitch, bytes_per_pixel);
        let d = row_offset(dst_rect, row, dst_pitch, bytes_per_pixel);
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}

/// Copies `src_rect` onto `dst_rect` inside one surface.
///
/// The rows are walked in the order given by [`CopyDirection::select`] so
/// that no source row is overwritten before it is read; the result equals
/// copying through a temporary buffer.
pub fn copy_rows_self(
    pixels: &mut [u8],
    pitch: usize,
    src_rect: &Rect,
    dst_rect: &Rect,
    bytes_per_pixel: usize,
) -> CopyDirection {
    let direction = CopyDirection::select(src_rect, dst_rect);
    debug!("self copy {src_rect:?} -> {dst_rect:?} using {direction:?}");

    let row_bytes = dst_rect.width() as usize * bytes_per_pixel;
    let rows = dst_rect.height() as usize;
    let mut copy_row = |row: usize| {
        let s = row_offset(src_rect, row, pitch, bytes_per_pixel);
        let d = row_offset(dst_rect, row, pitch, bytes_per_pixel);
        pixels.copy_within(s..s + row_bytes, d);
    };

    match direction {
        CopyDirection::TopDown | CopyDirection::RowMove => (0..rows).for_each(&mut copy_row),
        CopyDirection::BottomUp => (0..rows).rev().for_each(&mut copy_row),
    }
    direction
}
