//! Placement of 8-bit channel samples into a mask-described pixel.
//!
//! Each channel mask of the destination format is reduced to a bit offset
//! (its trailing zeros) and a width (its population count). Samples are
//! truncated to the width and shifted into place; channels with an empty
//! mask are dropped.

use soft_blit_common::{color_8888::Color8888, pixel_format::PixelFormat};

/// Offset and width of one channel inside a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelField {
    /// Bit position of the channel's least significant bit.
    pub shift: u32,
    /// Number of bits the channel occupies. Zero for absent channels.
    pub bits: u32,
}

impl ChannelField {
    /// Derives the field of a contiguous channel mask.
    #[inline]
    pub const fn from_mask(mask: u32) -> Self {
        if mask == 0 {
            return Self { shift: 0, bits: 0 };
        }
        Self {
            shift: mask.trailing_zeros(),
            bits: mask.count_ones(),
        }
    }

    /// Scales an 8-bit sample to the field width and moves it into place.
    #[inline(always)]
    pub const fn place(&self, sample: u8) -> u32 {
        let sample = sample as u32;
        let scaled = match self.bits {
            0 => return 0,
            bits if bits >= 8 => sample << (bits - 8),
            bits => sample >> (8 - bits),
        };
        scaled << self.shift
    }
}

/// Channel placement for a whole destination format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelLayout {
    /// Red channel.
    pub red: ChannelField,
    /// Green channel.
    pub green: ChannelField,
    /// Blue channel.
    pub blue: ChannelField,
    /// Alpha channel; absent when the format has no alpha mask.
    pub alpha: ChannelField,
}

impl ChannelLayout {
    /// Builds the layout from the masks of `format`.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_bcn::channel_layout::ChannelLayout;
    /// use soft_blit_common::{color_8888::Color8888, pixel_format::PixelFormat};
    ///
    /// let layout = ChannelLayout::from_format(&PixelFormat::RGB565);
    /// assert_eq!(layout.pack(Color8888::new(255, 0, 255, 255)), 0xF81F);
    /// ```
    pub const fn from_format(format: &PixelFormat) -> Self {
        Self {
            red: ChannelField::from_mask(format.red_mask),
            green: ChannelField::from_mask(format.green_mask),
            blue: ChannelField::from_mask(format.blue_mask),
            alpha: ChannelField::from_mask(format.alpha_mask),
        }
    }

    /// Packs a decoded texel into a destination pixel value.
    #[inline(always)]
    pub const fn pack(&self, color: Color8888) -> u32 {
        self.red.place(color.r)
            | self.green.place(color.g)
            | self.blue.place(color.b)
            | self.alpha.place(color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelField;
    use crate::test_prelude::*;

    #[rstest]
    #[case(0xF800, 11, 5)]
    #[case(0x07E0, 5, 6)]
    #[case(0x00FF_0000, 16, 8)]
    #[case(0, 0, 0)]
    fn derives_fields_from_masks(#[case] mask: u32, #[case] shift: u32, #[case] bits: u32) {
        assert_eq!(ChannelField::from_mask(mask), ChannelField { shift, bits });
    }

    #[rstest]
    #[case(PixelFormat::RGB565, 0x0000_F800)]
    #[case(PixelFormat::RGB555, 0x0000_7C00)]
    #[case(PixelFormat::RGB888, 0x00FF_0000)]
    #[case(PixelFormat::XRGB8888, 0x00FF_0000)]
    #[case(PixelFormat::ARGB8888, 0x80FF_0000)]
    fn packs_red_with_half_alpha(#[case] format: PixelFormat, #[case] expected: u32) {
        let layout = ChannelLayout::from_format(&format);
        assert_eq!(layout.pack(Color8888::new(255, 0, 0, 128)), expected);
    }

    #[test]
    fn truncates_to_field_width() {
        let layout = ChannelLayout::from_format(&PixelFormat::RGB565);
        // 0x84 >> 3 = 0x10, 0x84 >> 2 = 0x21, 0x84 >> 3 = 0x10
        assert_eq!(
            layout.pack(Color8888::new(0x84, 0x84, 0x84, 0)),
            (0x10 << 11) | (0x21 << 5) | 0x10
        );
    }
}
