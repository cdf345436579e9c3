//! Clipping of blit rectangles against surface bounds.
//!
//! Clipping is only defined where source and destination pixels correspond
//! one to one. An axis that overflows its bounds is clipped by shrinking both
//! rectangles by the same amount on the overflowing side; an axis that would
//! need clipping while it is also stretched, or while any mirror or rotation
//! is requested, cannot be clipped.

use likely_stable::likely;
use soft_blit_common::rect::Rect;

/// Outcome of [`clip_rects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipResult {
    /// The clipped rectangles, both non-empty and inside their bounds.
    Visible {
        /// Clipped source rectangle.
        src: Rect,
        /// Clipped destination rectangle.
        dst: Rect,
    },
    /// Nothing remains after clipping.
    Empty,
    /// Clipping is required on a stretched axis or with geometry flags.
    Unclippable,
}

/// Clips a source/destination pair against the bounds of their surfaces.
///
/// `geometry` is `true` when a mirror or rotation is requested.
///
/// # Examples
///
/// ```
/// use soft_blit::clip::{clip_rects, ClipResult};
/// use soft_blit_common::rect::Rect;
///
/// let bounds = Rect::new(0, 0, 4, 4);
/// let result = clip_rects(&Rect::new(0, 0, 3, 3), &bounds, &Rect::new(2, 2, 5, 5), &bounds, false);
/// assert_eq!(
///     result,
///     ClipResult::Visible { src: Rect::new(0, 0, 2, 2), dst: Rect::new(2, 2, 4, 4) }
/// );
/// ```
pub fn clip_rects(
    src_rect: &Rect,
    src_bounds: &Rect,
    dst_rect: &Rect,
    dst_bounds: &Rect,
    geometry: bool,
) -> ClipResult {
    if src_rect.is_empty() || dst_rect.is_empty() {
        return ClipResult::Empty;
    }

    let clip_x = src_rect.left < src_bounds.left
        || src_rect.right > src_bounds.right
        || dst_rect.left < dst_bounds.left
        || dst_rect.right > dst_bounds.right;
    let clip_y = src_rect.top < src_bounds.top
        || src_rect.bottom > src_bounds.bottom
        || dst_rect.top < dst_bounds.top
        || dst_rect.bottom > dst_bounds.bottom;

    if likely(!clip_x && !clip_y) {
        return ClipResult::Visible {
            src: *src_rect,
            dst: *dst_rect,
        };
    }

    let stretch_x = src_rect.width() != dst_rect.width();
    let stretch_y = src_rect.height() != dst_rect.height();
    if geometry || (clip_x && stretch_x) || (clip_y && stretch_y) {
        return ClipResult::Unclippable;
    }

    let left = overflow(src_bounds.left, src_rect.left).max(overflow(dst_bounds.left, dst_rect.left));
    let top = overflow(src_bounds.top, src_rect.top).max(overflow(dst_bounds.top, dst_rect.top));
    let right =
        overflow(src_rect.right, src_bounds.right).max(overflow(dst_rect.right, dst_bounds.right));
    let bottom = overflow(src_rect.bottom, src_bounds.bottom)
        .max(overflow(dst_rect.bottom, dst_bounds.bottom));

    // Shrunk edges are computed in i64; a non-empty result lies inside both
    // bounds and so fits back into i32.
    let shrink = |rect: &Rect| {
        let edges = (
            i64::from(rect.left) + left,
            i64::from(rect.top) + top,
            i64::from(rect.right) - right,
            i64::from(rect.bottom) - bottom,
        );
        (edges.0 < edges.2 && edges.1 < edges.3)
            .then(|| Rect::new(edges.0 as i32, edges.1 as i32, edges.2 as i32, edges.3 as i32))
    };
    match (shrink(src_rect), shrink(dst_rect)) {
        (Some(src), Some(dst)) => ClipResult::Visible { src, dst },
        _ => ClipResult::Empty,
    }
}

/// Clips the destination of a source-less operation. `None` when nothing
/// remains.
pub fn clip_fill(dst_rect: &Rect, dst_bounds: &Rect) -> Option<Rect> {
    let clipped = dst_rect.intersect(dst_bounds);
    (!clipped.is_empty()).then_some(clipped)
}

/// How far `inner` lies past `outer`, or zero.
#[inline]
fn overflow(outer: i32, inner: i32) -> i64 {
    (i64::from(outer) - i64::from(inner)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    const BOUNDS: Rect = Rect::new(0, 0, 8, 8);

    #[rstest]
    // Destination hangs off the right and bottom edges.
    #[case(
        Rect::new(0, 0, 4, 4),
        Rect::new(6, 5, 10, 9),
        Rect::new(0, 0, 2, 3),
        Rect::new(6, 5, 8, 8)
    )]
    // Source hangs off the top left corner.
    #[case(
        Rect::new(-2, -1, 2, 3),
        Rect::new(1, 1, 5, 5),
        Rect::new(0, 0, 2, 3),
        Rect::new(3, 2, 5, 5)
    )]
    // Both overflow on the same side; the larger overflow wins.
    #[case(
        Rect::new(-1, 0, 3, 2),
        Rect::new(-3, 0, 1, 2),
        Rect::new(2, 0, 3, 2),
        Rect::new(0, 0, 1, 2)
    )]
    fn shrinks_both_rects_equally(
        #[case] src: Rect,
        #[case] dst: Rect,
        #[case] expected_src: Rect,
        #[case] expected_dst: Rect,
    ) {
        assert_eq!(
            clip_rects(&src, &BOUNDS, &dst, &BOUNDS, false),
            ClipResult::Visible {
                src: expected_src,
                dst: expected_dst
            }
        );
    }

    #[test]
    fn fully_outside_is_empty() {
        assert_eq!(
            clip_rects(
                &Rect::new(0, 0, 2, 2),
                &BOUNDS,
                &Rect::new(9, 0, 11, 2),
                &BOUNDS,
                false
            ),
            ClipResult::Empty
        );
    }

    #[test]
    fn zero_sized_request_is_empty() {
        assert_eq!(
            clip_rects(
                &Rect::new(1, 1, 1, 4),
                &BOUNDS,
                &Rect::new(0, 0, 2, 2),
                &BOUNDS,
                false
            ),
            ClipResult::Empty
        );
    }

    #[test]
    fn stretched_axis_cannot_be_clipped() {
        // Stretched horizontally, overflowing horizontally.
        assert_eq!(
            clip_rects(
                &Rect::new(0, 0, 2, 2),
                &BOUNDS,
                &Rect::new(6, 0, 10, 2),
                &BOUNDS,
                false
            ),
            ClipResult::Unclippable
        );
    }

    #[test]
    fn unstretched_axis_can_be_clipped_while_the_other_stretches() {
        // Stretched vertically, overflowing horizontally only.
        assert_eq!(
            clip_rects(
                &Rect::new(0, 0, 4, 2),
                &BOUNDS,
                &Rect::new(6, 0, 10, 4),
                &BOUNDS,
                false
            ),
            ClipResult::Visible {
                src: Rect::new(0, 0, 2, 2),
                dst: Rect::new(6, 0, 8, 4)
            }
        );
    }

    #[test]
    fn geometry_prevents_clipping() {
        assert_eq!(
            clip_rects(
                &Rect::new(0, 0, 4, 4),
                &BOUNDS,
                &Rect::new(6, 0, 10, 4),
                &BOUNDS,
                true
            ),
            ClipResult::Unclippable
        );
        // Inside the bounds geometry is fine.
        assert_eq!(
            clip_rects(
                &Rect::new(0, 0, 4, 4),
                &BOUNDS,
                &Rect::new(4, 4, 8, 8),
                &BOUNDS,
                true
            ),
            ClipResult::Visible {
                src: Rect::new(0, 0, 4, 4),
                dst: Rect::new(4, 4, 8, 8)
            }
        );
    }

    #[test]
    fn full_coordinate_range_clips_to_bounds() {
        let full = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(
            clip_rects(&full, &BOUNDS, &full, &BOUNDS, false),
            ClipResult::Visible {
                src: BOUNDS,
                dst: BOUNDS
            }
        );
    }

    #[test]
    fn far_offsets_do_not_wrap() {
        assert_eq!(
            clip_rects(
                &Rect::new(i32::MIN, 0, i32::MIN + 4, 2),
                &BOUNDS,
                &Rect::new(i32::MAX - 4, 0, i32::MAX, 2),
                &BOUNDS,
                false
            ),
            ClipResult::Empty
        );
    }

    #[rstest]
    #[case(Rect::new(-1, -1, 3, 3), Some(Rect::new(0, 0, 3, 3)))]
    #[case(Rect::new(6, 6, 12, 12), Some(Rect::new(6, 6, 8, 8)))]
    #[case(Rect::new(8, 0, 10, 4), None)]
    #[case(Rect::new(2, 2, 2, 5), None)]
    fn fills_intersect_with_bounds(#[case] rect: Rect, #[case] expected: Option<Rect>) {
        assert_eq!(clip_fill(&rect, &BOUNDS), expected);
    }
}
