//! Blit requests: flags, effect parameters and raster operations.

use crate::error::BlitError;
use crate::surface::ColorKey;
use derive_enum_all_values::AllValues;
use soft_blit_common::rect::Rect;

bitflags::bitflags! {
    /// Operation and effect flags of a [`BlitRequest`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlitFlags: u32 {
        /// Fill the destination rectangle with [`BlitFx::fill_color`].
        const COLOR_FILL = 1 << 0;
        /// Skip source pixels inside the source surface's source key.
        const KEY_SRC = 1 << 1;
        /// Only write where the destination pixel is inside the destination key.
        const KEY_DEST = 1 << 2;
        /// Like [`Self::KEY_SRC`], using [`BlitFx::src_color_key`].
        const KEY_SRC_OVERRIDE = 1 << 3;
        /// Like [`Self::KEY_DEST`], using [`BlitFx::dst_color_key`].
        const KEY_DEST_OVERRIDE = 1 << 4;
        /// Apply the raster operation in [`BlitFx::rop`].
        const ROP = 1 << 5;
        /// Depth buffer fill. Not implemented; ignored with a warning.
        const DEPTH_FILL = 1 << 6;
        /// Mirror around the vertical axis.
        const MIRROR_LEFT_RIGHT = 1 << 7;
        /// Mirror around the horizontal axis.
        const MIRROR_UP_DOWN = 1 << 8;
        /// Rotate 90 degrees clockwise.
        const ROTATE_90 = 1 << 9;
        /// Rotate 180 degrees.
        const ROTATE_180 = 1 << 10;
        /// Rotate 270 degrees clockwise.
        const ROTATE_270 = 1 << 11;
        /// Arithmetic Y stretching. Accepted and ignored.
        const ARITH_STRETCH_Y = 1 << 12;
        /// Tear-free blitting. Accepted and ignored.
        const NO_TEARING = 1 << 13;
        /// Z-buffer based destination. Accepted and ignored.
        const ZBUFFER_BASE_DEST = 1 << 14;
    }
}

impl BlitFlags {
    /// Every mirror and rotation flag.
    pub const GEOMETRY: Self = Self::MIRROR_LEFT_RIGHT
        .union(Self::MIRROR_UP_DOWN)
        .union(Self::ROTATE_90)
        .union(Self::ROTATE_180)
        .union(Self::ROTATE_270);

    /// Every colour key flag.
    pub const COLOR_KEYS: Self = Self::KEY_SRC
        .union(Self::KEY_DEST)
        .union(Self::KEY_SRC_OVERRIDE)
        .union(Self::KEY_DEST_OVERRIDE);

    /// Flags that are accepted but have no effect on the output.
    pub const INERT: Self = Self::ARITH_STRETCH_Y
        .union(Self::NO_TEARING)
        .union(Self::ZBUFFER_BASE_DEST);

    /// `true` when a mirror or rotation is requested.
    #[inline]
    pub const fn has_geometry(&self) -> bool {
        self.intersects(Self::GEOMETRY)
    }

    /// `true` when any colour key is requested.
    #[inline]
    pub const fn has_color_key(&self) -> bool {
        self.intersects(Self::COLOR_KEYS)
    }

    /// `true` when the output is transposed relative to the source: exactly
    /// one of the quarter-turn rotations is requested.
    #[inline]
    pub const fn transposes(&self) -> bool {
        self.contains(Self::ROTATE_90) != self.contains(Self::ROTATE_270)
    }
}

bitflags::bitflags! {
    /// Colour key flags of a fast blit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BltFastFlags: u32 {
        /// Skip source pixels inside the source surface's source key.
        const SRC_COLOR_KEY = 1 << 0;
        /// Only write where the destination pixel is inside the destination surface's destination key.
        const DEST_COLOR_KEY = 1 << 1;
    }
}

/// The implemented raster operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum Rop {
    /// Copy the source.
    SrcCopy,
    /// Fill with zero.
    Blackness,
    /// Fill with all bits set.
    Whiteness,
    /// Leave the destination untouched.
    Nop,
}

impl Rop {
    /// Numeric code of `SRCCOPY`.
    pub const SRCCOPY: u32 = 0x00CC_0020;
    /// Numeric code of `BLACKNESS`.
    pub const BLACKNESS: u32 = 0x0000_0042;
    /// Numeric code of `WHITENESS`.
    pub const WHITENESS: u32 = 0x00FF_0062;
    /// Numeric code of the destination-preserving no-op.
    pub const NOP: u32 = 0x00AA_0029;

    /// The numeric raster operation code.
    pub const fn code(&self) -> u32 {
        match self {
            Rop::SrcCopy => Self::SRCCOPY,
            Rop::Blackness => Self::BLACKNESS,
            Rop::Whiteness => Self::WHITENESS,
            Rop::Nop => Self::NOP,
        }
    }

    /// Resolves a numeric code.
    ///
    /// # Errors
    ///
    /// [`BlitError::UnsupportedRop`] for codes outside the implemented set.
    pub fn from_code(code: u32) -> Result<Self, BlitError> {
        Rop::all_values()
            .iter()
            .copied()
            .find(|rop| rop.code() == code)
            .ok_or(BlitError::UnsupportedRop(code))
    }

    /// `true` when the operation reads the source surface.
    pub const fn needs_source(&self) -> bool {
        matches!(self, Rop::SrcCopy)
    }
}

/// Parameters consumed by the operation flags of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitFx {
    /// Raw pixel value written by [`BlitFlags::COLOR_FILL`], truncated to the destination depth.
    pub fill_color: u32,
    /// Raster operation code used with [`BlitFlags::ROP`].
    pub rop: u32,
    /// Source key used with [`BlitFlags::KEY_SRC_OVERRIDE`].
    pub src_color_key: ColorKey,
    /// Destination key used with [`BlitFlags::KEY_DEST_OVERRIDE`].
    pub dst_color_key: ColorKey,
}

/// A single blit: rectangles, flags and effect parameters.
///
/// A missing source rectangle stands for the whole source surface, a missing
/// destination rectangle for the whole destination surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitRequest {
    /// Region of the source surface to read.
    pub src_rect: Option<Rect>,
    /// Region of the destination surface to write.
    pub dst_rect: Option<Rect>,
    /// Operation and effect flags.
    pub flags: BlitFlags,
    /// Parameters of the flags.
    pub fx: BlitFx,
}

impl BlitRequest {
    /// Starts building a request.
    pub fn builder() -> BlitRequestBuilder {
        BlitRequestBuilder::new()
    }
}

/// Builder for [`BlitRequest`] with convenient configuration methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlitRequestBuilder {
    request: BlitRequest,
}

impl BlitRequestBuilder {
    /// Create a new request builder describing a plain whole-surface copy.
    pub fn new() -> Self {
        Self {
            request: BlitRequest::default(),
        }
    }

    /// Set the source rectangle.
    pub fn src_rect(mut self, rect: Rect) -> Self {
        self.request.src_rect = Some(rect);
        self
    }

    /// Set the destination rectangle.
    pub fn dst_rect(mut self, rect: Rect) -> Self {
        self.request.dst_rect = Some(rect);
        self
    }

    /// Add flags.
    pub fn flags(mut self, flags: BlitFlags) -> Self {
        self.request.flags |= flags;
        self
    }

    /// Request a colour fill with the given raw pixel value.
    pub fn color_fill(mut self, color: u32) -> Self {
        self.request.flags |= BlitFlags::COLOR_FILL;
        self.request.fx.fill_color = color;
        self
    }

    /// Request a raster operation by its numeric code.
    pub fn rop_code(mut self, code: u32) -> Self {
        self.request.flags |= BlitFlags::ROP;
        self.request.fx.rop = code;
        self
    }

    /// Request one of the implemented raster operations.
    pub fn rop(self, rop: Rop) -> Self {
        self.rop_code(rop.code())
    }

    /// Key the source with an explicit range instead of the surface's key.
    pub fn src_color_key(mut self, key: ColorKey) -> Self {
        self.request.flags |= BlitFlags::KEY_SRC_OVERRIDE;
        self.request.fx.src_color_key = key;
        self
    }

    /// Key the destination with an explicit range instead of the surface's key.
    pub fn dst_color_key(mut self, key: ColorKey) -> Self {
        self.request.flags |= BlitFlags::KEY_DEST_OVERRIDE;
        self.request.fx.dst_color_key = key;
        self
    }

    /// Build the request.
    pub fn build(self) -> BlitRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(Rop::SrcCopy)]
    #[case(Rop::Blackness)]
    #[case(Rop::Whiteness)]
    #[case(Rop::Nop)]
    fn rop_codes_resolve(#[case] rop: Rop) {
        assert_eq!(Rop::from_code(rop.code()), Ok(rop));
    }

    #[test]
    fn unknown_rop_is_rejected() {
        // SRCINVERT
        assert_eq!(
            Rop::from_code(0x0066_0046),
            Err(BlitError::UnsupportedRop(0x0066_0046))
        );
    }

    #[test]
    fn builder_sets_flags_with_parameters() {
        let request = BlitRequest::builder()
            .dst_rect(Rect::new(1, 1, 3, 3))
            .color_fill(0x00FF_00FF)
            .build();
        assert_eq!(request.flags, BlitFlags::COLOR_FILL);
        assert_eq!(request.fx.fill_color, 0x00FF_00FF);
        assert_eq!(request.src_rect, None);
        assert_eq!(request.dst_rect, Some(Rect::new(1, 1, 3, 3)));

        let request = BlitRequest::builder()
            .src_color_key(ColorKey::single(5))
            .flags(BlitFlags::MIRROR_LEFT_RIGHT)
            .build();
        assert_eq!(
            request.flags,
            BlitFlags::KEY_SRC_OVERRIDE | BlitFlags::MIRROR_LEFT_RIGHT
        );
        assert!(request.flags.has_color_key());
        assert!(request.flags.has_geometry());
    }

    #[rstest]
    #[case(BlitFlags::ROTATE_90, true)]
    #[case(BlitFlags::ROTATE_270, true)]
    #[case(BlitFlags::ROTATE_180, false)]
    #[case(BlitFlags::ROTATE_90 | BlitFlags::ROTATE_270, false)]
    #[case(BlitFlags::ROTATE_90 | BlitFlags::MIRROR_UP_DOWN, true)]
    fn transposition(#[case] flags: BlitFlags, #[case] expected: bool) {
        assert_eq!(flags.transposes(), expected);
    }
}
