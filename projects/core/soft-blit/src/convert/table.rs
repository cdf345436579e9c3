//! The table of supported format conversions.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use soft_blit_common::pixel_format::PixelFormat;

/// A pixel transformation between two formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// 8bpp index to the destination RGB layout through the source palette.
    PaletteToRgb,
    /// RGB to the nearest entry of the destination palette.
    RgbToPalette,
    /// `((c & 0x7FE0) << 1) | (c & 0x1F)`; the new lowest green bit is zero.
    Rgb555ToRgb565,
    /// `((c & 0xFFC0) >> 1) | (c & 0x1F)`; drops the lowest green bit.
    Rgb565ToRgb555,
    /// Shifts each channel to the top of its byte; low bits are zero.
    Rgb565ToXrgb8888,
    /// Keeps the top 5/6/5 bits of each channel.
    Xrgb8888ToRgb565,
    /// Drops the padding byte: 32bpp to packed 24bpp.
    Xrgb8888ToRgb888,
    /// Pads packed 24bpp to 32bpp with a zero byte.
    Rgb888ToXrgb8888,
    /// Keeps the colour channels of a 32bpp pixel and sets the top byte to `0xFF`.
    OpaqueAlpha,
}

impl Conversion {
    /// Applies an arithmetic conversion to a raw pixel value.
    ///
    /// The palette conversions need a palette and are resolved elsewhere;
    /// they pass the value through unchanged here.
    #[inline(always)]
    pub fn apply(self, c: u32) -> u32 {
        match self {
            Conversion::Rgb555ToRgb565 => ((c & 0x7FE0) << 1) | (c & 0x1F),
            Conversion::Rgb565ToRgb555 => ((c & 0xFFC0) >> 1) | (c & 0x1F),
            Conversion::Rgb565ToXrgb8888 => {
                ((c & 0xF800) << 8) | ((c & 0x07E0) << 5) | ((c & 0x001F) << 3)
            }
            Conversion::Xrgb8888ToRgb565 => {
                ((c & 0xF8_0000) >> 8) | ((c & 0xFC00) >> 5) | ((c & 0xF8) >> 3)
            }
            Conversion::Xrgb8888ToRgb888 | Conversion::Rgb888ToXrgb8888 => c & 0xFF_FFFF,
            Conversion::OpaqueAlpha => 0xFF00_0000 | (c & 0xFF_FFFF),
            Conversion::PaletteToRgb | Conversion::RgbToPalette => c,
        }
    }
}

/// One row of a [`ConversionTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Emulation {
    /// Source format, matched exactly.
    pub from: PixelFormat,
    /// Destination format, matched exactly.
    pub to: PixelFormat,
    /// How pixels are transformed.
    pub conversion: Conversion,
}

impl Emulation {
    /// A table row.
    pub const fn new(from: PixelFormat, to: PixelFormat, conversion: Conversion) -> Self {
        Self {
            from,
            to,
            conversion,
        }
    }
}

const STANDARD_ENTRIES: [Emulation; 18] = [
    Emulation::new(PixelFormat::INDEXED8, PixelFormat::RGB555, Conversion::PaletteToRgb),
    Emulation::new(PixelFormat::INDEXED8, PixelFormat::RGB565, Conversion::PaletteToRgb),
    Emulation::new(PixelFormat::INDEXED8, PixelFormat::RGB888, Conversion::PaletteToRgb),
    Emulation::new(PixelFormat::INDEXED8, PixelFormat::XRGB8888, Conversion::PaletteToRgb),
    Emulation::new(PixelFormat::RGB555, PixelFormat::INDEXED8, Conversion::RgbToPalette),
    Emulation::new(PixelFormat::RGB565, PixelFormat::INDEXED8, Conversion::RgbToPalette),
    Emulation::new(PixelFormat::RGB888, PixelFormat::INDEXED8, Conversion::RgbToPalette),
    Emulation::new(PixelFormat::XRGB8888, PixelFormat::INDEXED8, Conversion::RgbToPalette),
    Emulation::new(PixelFormat::RGB555, PixelFormat::RGB565, Conversion::Rgb555ToRgb565),
    Emulation::new(PixelFormat::RGB565, PixelFormat::RGB555, Conversion::Rgb565ToRgb555),
    Emulation::new(PixelFormat::RGB565, PixelFormat::XRGB8888, Conversion::Rgb565ToXrgb8888),
    Emulation::new(PixelFormat::XRGB8888, PixelFormat::RGB565, Conversion::Xrgb8888ToRgb565),
    Emulation::new(PixelFormat::XRGB8888, PixelFormat::RGB888, Conversion::Xrgb8888ToRgb888),
    Emulation::new(PixelFormat::RGB888, PixelFormat::XRGB8888, Conversion::Rgb888ToXrgb8888),
    Emulation::new(PixelFormat::ARGB8888, PixelFormat::XRGB8888, Conversion::OpaqueAlpha),
    Emulation::new(PixelFormat::XRGB8888, PixelFormat::ARGB8888, Conversion::OpaqueAlpha),
    Emulation::new(PixelFormat::ARGB8888, PixelFormat::RGB565, Conversion::Xrgb8888ToRgb565),
    Emulation::new(PixelFormat::RGB565, PixelFormat::ARGB8888, Conversion::Rgb565ToXrgb8888),
];

/// The built-in conversions.
pub static STANDARD_CONVERSIONS: ConversionTable = ConversionTable::standard();

/// An immutable list of format conversions, searched by exact format match.
///
/// # Examples
///
/// ```
/// use soft_blit::{Conversion, ConversionTable};
/// use soft_blit_common::pixel_format::PixelFormat;
///
/// let table = ConversionTable::standard();
/// assert_eq!(
///     table.find(&PixelFormat::RGB555, &PixelFormat::RGB565),
///     Some(Conversion::Rgb555ToRgb565)
/// );
/// assert_eq!(table.find(&PixelFormat::RGB555, &PixelFormat::RGB888), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTable {
    entries: Cow<'static, [Emulation]>,
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConversionTable {
    /// The built-in table.
    pub const fn standard() -> Self {
        Self {
            entries: Cow::Borrowed(&STANDARD_ENTRIES),
        }
    }

    /// A caller-defined table. Earlier rows win when formats repeat.
    pub fn new(entries: Vec<Emulation>) -> Self {
        Self {
            entries: Cow::Owned(entries),
        }
    }

    /// All rows.
    pub fn entries(&self) -> &[Emulation] {
        &self.entries
    }

    /// The conversion from `from` to `to`, if the table has one.
    pub fn find(&self, from: &PixelFormat, to: &PixelFormat) -> Option<Conversion> {
        self.entries
            .iter()
            .find(|entry| entry.from == *from && entry.to == *to)
            .map(|entry| entry.conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(Conversion::Rgb555ToRgb565, 0x7FFF, 0xFFDF)]
    #[case(Conversion::Rgb555ToRgb565, 0x001F, 0x001F)]
    #[case(Conversion::Rgb565ToRgb555, 0xFFFF, 0x7FFF)]
    #[case(Conversion::Rgb565ToRgb555, 0x07E0, 0x03E0)]
    #[case(Conversion::Rgb565ToXrgb8888, 0xFFFF, 0x00F8_FCF8)]
    #[case(Conversion::Xrgb8888ToRgb565, 0x00FF_FFFF, 0xFFFF)]
    #[case(Conversion::Xrgb8888ToRgb565, 0x0080_4020, 0x8204)]
    #[case(Conversion::Xrgb8888ToRgb888, 0xAB12_3456, 0x0012_3456)]
    #[case(Conversion::OpaqueAlpha, 0x0012_3456, 0xFF12_3456)]
    fn arithmetic_conversions(#[case] conversion: Conversion, #[case] input: u32, #[case] expected: u32) {
        assert_eq!(conversion.apply(input), expected);
    }

    #[test]
    fn agrees_with_colour_helpers() {
        for raw in [0x0000u16, 0x1234, 0x7C00, 0x03E0, 0xF81F, 0xFFFF] {
            let c565 = Color565::from_raw(raw);
            assert_eq!(
                Conversion::Rgb565ToXrgb8888.apply(raw as u32),
                c565.to_xrgb8888()
            );
            assert_eq!(
                Conversion::Rgb565ToRgb555.apply(raw as u32),
                c565.to_color_555().raw_value() as u32
            );
        }
    }

    #[test]
    fn standard_table_has_both_directions() {
        let table = ConversionTable::standard();
        let formats = [
            PixelFormat::INDEXED8,
            PixelFormat::RGB555,
            PixelFormat::RGB565,
            PixelFormat::RGB888,
            PixelFormat::XRGB8888,
        ];
        for from in formats {
            assert!(
                from == PixelFormat::INDEXED8
                    || table.find(&from, &PixelFormat::INDEXED8).is_some()
            );
        }
        assert_eq!(
            table.find(&PixelFormat::XRGB8888, &PixelFormat::ARGB8888),
            Some(Conversion::OpaqueAlpha)
        );
        assert_eq!(table.find(&PixelFormat::RGB565, &PixelFormat::RGB565), None);
        assert_eq!(STANDARD_CONVERSIONS, table);
    }

    #[test]
    fn custom_tables_are_searched_in_order() {
        let table = ConversionTable::new(vec![
            Emulation::new(PixelFormat::RGB565, PixelFormat::RGB555, Conversion::Rgb565ToRgb555),
            Emulation::new(PixelFormat::RGB565, PixelFormat::RGB555, Conversion::Rgb555ToRgb565),
        ]);
        assert_eq!(
            table.find(&PixelFormat::RGB565, &PixelFormat::RGB555),
            Some(Conversion::Rgb565ToRgb555)
        );
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.find(&PixelFormat::RGB555, &PixelFormat::RGB565), None);
    }
}
