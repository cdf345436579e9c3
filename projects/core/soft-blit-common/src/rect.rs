/// An axis aligned rectangle in pixel coordinates.
///
/// `right` and `bottom` are exclusive. Coordinates are signed so that
/// rectangles partially outside a surface can be described before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Leftmost column (inclusive).
    pub left: i32,
    /// Topmost row (inclusive).
    pub top: i32,
    /// Column past the right edge (exclusive).
    pub right: i32,
    /// Row past the bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle covering a whole `width` x `height` surface.
    #[inline]
    pub fn bounds(width: u32, height: u32) -> Self {
        let clamp = |extent: u32| i32::try_from(extent).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(width), clamp(height))
    }

    /// Horizontal extent; negative for malformed rectangles.
    ///
    /// Widened to `i64` since `right - left` can exceed `i32::MAX`.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    /// Vertical extent; negative for malformed rectangles.
    #[inline]
    pub const fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    /// `true` when `right >= left` and `bottom >= top`.
    #[inline]
    pub const fn is_normalized(&self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    /// `true` when the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// `true` when `self` lies entirely inside `outer`.
    #[inline]
    pub const fn is_within(&self, outer: &Rect) -> bool {
        self.left >= outer.left
            && self.top >= outer.top
            && self.right <= outer.right
            && self.bottom <= outer.bottom
    }

    /// The overlapping part of two rectangles; may be empty.
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// The smallest rectangle containing both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}
