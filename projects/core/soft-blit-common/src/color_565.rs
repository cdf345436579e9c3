use crate::color_555::Color555;
use crate::color_8888::Color8888;

/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
/// As stored in 16bpp surfaces (masks `0xF800/0x07E0/0x001F`) and in the
/// colour endpoints of the BC1-style blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color565 {
    /// The underlying 16-bit RGB565 value
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color565`] from separate RGB components
    ///
    /// # Parameters
    ///
    /// - `r`: The red component (0-255)
    /// - `g`: The green component (0-255)
    /// - `b`: The blue component (0-255)
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.value
    }

    // Channels expand to 8 bits by replicating their top bits.

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Converts this [`Color565`] to a [`Color8888`] with full opacity (alpha=255)
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_common::color_565::Color565;
    ///
    /// let rgb565 = Color565::from_rgb(255, 0, 0);
    /// let rgba8888 = rgb565.to_color_8888();
    /// assert_eq!(rgba8888.r, 255);
    /// assert_eq!(rgba8888.g, 0);
    /// assert_eq!(rgba8888.b, 0);
    /// assert_eq!(rgba8888.a, 255);
    /// ```
    pub fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }

    /// Widens to a 32bpp `0x00RRGGBB` value by shifting each channel into
    /// the top of its new 8-bit field. The low bits are left zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_common::color_565::Color565;
    ///
    /// assert_eq!(Color565::from_raw(0xFFFF).to_xrgb8888(), 0x00F8FCF8);
    /// ```
    #[inline]
    pub fn to_xrgb8888(&self) -> u32 {
        let c = self.value as u32;
        ((c & 0xF800) << 8) | ((c & 0x07E0) << 5) | ((c & 0x001F) << 3)
    }

    /// Narrows a 32bpp `0x00RRGGBB` value by dropping the low bits of each channel.
    #[inline]
    pub fn from_xrgb8888(pixel: u32) -> Self {
        Self {
            value: (((pixel & 0x00F8_0000) >> 8)
                | ((pixel & 0x0000_FC00) >> 5)
                | ((pixel & 0x0000_00F8) >> 3)) as u16,
        }
    }

    /// Narrows to 15bpp by dropping the lowest green bit.
    #[inline]
    pub fn to_color_555(&self) -> Color555 {
        Color555::from_raw(((self.value & 0xFFC0) >> 1) | (self.value & 0x001F))
    }

    /// Widens a 15bpp colour; the new lowest green bit is zero.
    #[inline]
    pub fn from_color_555(color: Color555) -> Self {
        let c = color.raw_value();
        Self {
            value: ((c & 0x7FE0) << 1) | (c & 0x001F),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(0xF800, 255, 0, 0)]
    #[case(0x07E0, 0, 255, 0)]
    #[case(0x001F, 0, 0, 255)]
    #[case(0x8410, 132, 130, 132)]
    fn expands_channels_by_replicating_top_bits(
        #[case] raw: u16,
        #[case] r: u8,
        #[case] g: u8,
        #[case] b: u8,
    ) {
        let color = Color565::from_raw(raw);
        assert_eq!((color.red(), color.green(), color.blue()), (r, g, b));
    }

    #[test]
    fn widening_to_32bpp_is_reversible() {
        for raw in 0..=u16::MAX {
            let color = Color565::from_raw(raw);
            assert_eq!(Color565::from_xrgb8888(color.to_xrgb8888()), color);
        }
    }

    #[test]
    fn narrowing_to_555_drops_only_low_green_bit() {
        for raw in 0..=u16::MAX {
            let color = Color565::from_raw(raw);
            let back = Color565::from_color_555(color.to_color_555());
            assert_eq!(back.raw_value(), raw & !0x0020);
        }
    }
}
