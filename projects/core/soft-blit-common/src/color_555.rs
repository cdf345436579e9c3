use crate::color_8888::Color8888;

/// Represents a 15-bit RGB555 color stored in 16 bits
/// (masks `0x7C00/0x03E0/0x001F`, top bit unused).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color555 {
    value: u16,
}

impl Color555 {
    /// Creates a new [`Color555`] from the raw 16-bit value
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color555`] from 8-bit components by truncating each to 5 bits.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: ((r as u16 & 0xF8) << 7) | ((g as u16 & 0xF8) << 2) | (b as u16 >> 3),
        }
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.value
    }

    /// Converts to [`Color8888`] with the channels in the top of each byte.
    pub fn to_color_8888(&self) -> Color8888 {
        Color8888::new(
            ((self.value & 0x7C00) >> 7) as u8,
            ((self.value & 0x03E0) >> 2) as u8,
            ((self.value & 0x001F) << 3) as u8,
            255,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn from_rgb_truncates_to_five_bits() {
        let color = Color555::from_rgb(0xFF, 0x87, 0x07);
        assert_eq!(color.raw_value(), 0x7C00 | (0x10 << 5));
    }

    #[test]
    fn to_color_8888_round_trips_through_from_rgb() {
        for raw in 0..0x8000u16 {
            let c = Color555::from_raw(raw).to_color_8888();
            assert_eq!(Color555::from_rgb(c.r, c.g, c.b).raw_value(), raw);
        }
    }
}
