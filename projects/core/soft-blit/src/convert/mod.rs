//! Pixel format conversion.
//!
//! Formats are matched against a [`ConversionTable`]; the matching
//! [`Conversion`] is turned into a per-pixel map once and then run over the
//! rows of the source.

mod table;

pub use table::{Conversion, ConversionTable, Emulation, STANDARD_CONVERSIONS};

use alloc::boxed::Box;
use crate::error::BlitError;
use crate::raster::pixel::{load_le, store_le};
use crate::surface::{ScratchSurface, SurfaceView, SurfaceViewMut};
use log::{debug, warn};
use multiversion::multiversion;
use soft_blit_bcn::channel_layout::{ChannelField, ChannelLayout};
use soft_blit_common::color_8888::Color8888;
use soft_blit_common::palette::Palette;
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;

/// A [`Conversion`] with everything it needs to map single pixels.
#[derive(Debug, Clone)]
enum PixelMap {
    /// Index to packed RGB.
    Lookup(Box<[u32; 256]>),
    /// Packed RGB to the nearest palette index.
    Nearest {
        palette: Box<Palette>,
        layout: ChannelLayout,
        last: Option<(u32, u8)>,
    },
    /// Pure bit manipulation.
    Arithmetic(Conversion),
}

impl PixelMap {
    fn new(
        conversion: Conversion,
        from: &PixelFormat,
        to: &PixelFormat,
        src_palette: Option<&Palette>,
        dst_palette: Option<&Palette>,
    ) -> Result<Self, BlitError> {
        let missing_palette = || {
            warn!("{conversion:?} from {from:?} to {to:?} needs a palette, none attached");
            BlitError::UnsupportedFormat {
                src: *from,
                dst: *to,
            }
        };

        Ok(match conversion {
            Conversion::PaletteToRgb => {
                let palette = src_palette.ok_or_else(missing_palette)?;
                let layout = ChannelLayout::from_format(to);
                let mut table = Box::new([0u32; 256]);
                for (slot, entry) in table.iter_mut().zip(palette.entries()) {
                    *slot = layout.pack(entry.to_color_8888());
                }
                PixelMap::Lookup(table)
            }
            Conversion::RgbToPalette => {
                let palette = dst_palette.ok_or_else(missing_palette)?;
                PixelMap::Nearest {
                    palette: Box::new(palette.clone()),
                    layout: ChannelLayout::from_format(from),
                    last: None,
                }
            }
            other => PixelMap::Arithmetic(other),
        })
    }

    #[inline(always)]
    fn apply(&mut self, value: u32) -> u32 {
        match self {
            PixelMap::Lookup(table) => table[(value & 0xFF) as usize],
            PixelMap::Nearest {
                palette,
                layout,
                last,
            } => match *last {
                Some((previous, index)) if previous == value => index as u32,
                _ => {
                    let index = palette.nearest_index(unpack(layout, value));
                    *last = Some((value, index));
                    index as u32
                }
            },
            PixelMap::Arithmetic(conversion) => conversion.apply(value),
        }
    }
}

/// Expands a packed pixel into 8-bit channels; narrower channels land in
/// the top bits of their byte.
fn unpack(layout: &ChannelLayout, value: u32) -> Color8888 {
    #[inline(always)]
    fn channel(field: &ChannelField, value: u32) -> u8 {
        if field.bits == 0 {
            return 0;
        }
        let raw = (value >> field.shift) & ((1u64 << field.bits) - 1) as u32;
        if field.bits >= 8 {
            (raw >> (field.bits - 8)) as u8
        } else {
            (raw << (8 - field.bits)) as u8
        }
    }

    Color8888::new(
        channel(&layout.red, value),
        channel(&layout.green, value),
        channel(&layout.blue, value),
        255,
    )
}

#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
#[allow(clippy::too_many_arguments)]
fn convert_rows(
    map: &mut PixelMap,
    src: &[u8],
    src_pitch: usize,
    src_bpp: usize,
    dst: &mut [u8],
    dst_pitch: usize,
    dst_bpp: usize,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let s = y * src_pitch;
        let d = y * dst_pitch;
        let src_row = &src[s..s + width * src_bpp];
        let dst_row = &mut dst[d..d + width * dst_bpp];
        for (input, output) in src_row
            .chunks_exact(src_bpp)
            .zip(dst_row.chunks_exact_mut(dst_bpp))
        {
            store_le(map.apply(load_le(input)), output);
        }
    }
}

fn depth_of(format: &PixelFormat) -> Result<usize, BlitError> {
    format
        .bytes_per_pixel()
        .ok_or(BlitError::UnsupportedBpp(format.bits_per_pixel))
}

/// Converts the pixels of `src` into `dst` using the matching entry of
/// `conversions`.
///
/// The top left `min(width)` x `min(height)` pixels of the two surfaces are
/// converted. Indexed sources read the palette attached to `src`; indexed
/// destinations map onto the palette attached to `dst`.
///
/// # Errors
///
/// - [`BlitError::UnsupportedFormat`] when the table has no entry for the
///   pair, or a palette the conversion needs is not attached.
/// - [`BlitError::UnsupportedBpp`] for formats without a whole-byte depth.
pub fn convert_surface(
    conversions: &ConversionTable,
    src: &SurfaceView,
    dst: &mut SurfaceViewMut,
) -> Result<(), BlitError> {
    let from = *src.format();
    let to = *dst.format();
    let conversion = conversions
        .find(&from, &to)
        .ok_or(BlitError::UnsupportedFormat { src: from, dst: to })?;
    let src_bpp = depth_of(&from)?;
    let dst_bpp = depth_of(&to)?;
    let mut map = PixelMap::new(conversion, &from, &to, src.palette(), dst.palette())?;
    debug!("converting {from:?} -> {to:?} with {conversion:?}");

    let width = src.desc().width.min(dst.desc().width) as usize;
    let height = src.desc().height.min(dst.desc().height) as usize;
    let dst_pitch = dst.desc().pitch;
    convert_rows(
        &mut map,
        src.pixels(),
        src.desc().pitch,
        src_bpp,
        dst.pixels_mut(),
        dst_pitch,
        dst_bpp,
        width,
        height,
    );
    Ok(())
}

/// Converts `src_rect` of `src` into a new packed surface of format `to`,
/// whose origin corresponds to the top left of `src_rect`.
pub(crate) fn convert_to_scratch(
    conversion: Conversion,
    src: &SurfaceView,
    src_rect: &Rect,
    to: PixelFormat,
    dst_palette: Option<&Palette>,
) -> Result<ScratchSurface, BlitError> {
    let from = *src.format();
    let src_bpp = depth_of(&from)?;
    let dst_bpp = depth_of(&to)?;
    let mut map = PixelMap::new(conversion, &from, &to, src.palette(), dst_palette)?;
    debug!("converting {src_rect:?} of {from:?} -> {to:?} with {conversion:?}");

    let width = src_rect.width() as u32;
    let height = src_rect.height() as u32;
    let mut scratch = ScratchSurface::new(width, height, to)?;
    let dst_pitch = scratch.desc().pitch;
    let src_pitch = src.desc().pitch;
    let origin = src_rect.top as usize * src_pitch + src_rect.left as usize * src_bpp;
    convert_rows(
        &mut map,
        &src.pixels()[origin..],
        src_pitch,
        src_bpp,
        scratch.pixels_mut(),
        dst_pitch,
        dst_bpp,
        width as usize,
        height as usize,
    );
    Ok(scratch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn grey_ramp() -> Palette {
        let entries: Vec<PaletteEntry> = (0..=255u8).map(|i| PaletteEntry::new(i, i, i)).collect();
        Palette::from_entries(&entries)
    }

    #[test]
    fn palette_expands_into_each_rgb_layout() {
        let palette = Palette::from_entries(&[
            PaletteEntry::new(255, 0, 0),
            PaletteEntry::new(0, 255, 0),
            PaletteEntry::new(0, 0, 255),
            PaletteEntry::new(255, 255, 255),
        ]);
        let pixels = [0u8, 1, 2, 3];
        let src = SurfaceView::new(&pixels, SurfaceDesc::packed(2, 2, PixelFormat::INDEXED8))
            .unwrap()
            .with_palette(&palette);

        let mut out = [0u8; 8];
        let mut dst =
            SurfaceViewMut::new(&mut out, SurfaceDesc::packed(2, 2, PixelFormat::RGB565)).unwrap();
        convert_surface(&STANDARD_CONVERSIONS, &src, &mut dst).unwrap();
        assert_eq!(out, [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF, 0xFF]);

        let mut out = [0u8; 8];
        let mut dst =
            SurfaceViewMut::new(&mut out, SurfaceDesc::packed(2, 2, PixelFormat::RGB555)).unwrap();
        convert_surface(&STANDARD_CONVERSIONS, &src, &mut dst).unwrap();
        assert_eq!(out, [0x00, 0x7C, 0xE0, 0x03, 0x1F, 0x00, 0xFF, 0x7F]);

        let mut out = [0u8; 16];
        let mut dst =
            SurfaceViewMut::new(&mut out, SurfaceDesc::packed(2, 2, PixelFormat::XRGB8888))
                .unwrap();
        convert_surface(&STANDARD_CONVERSIONS, &src, &mut dst).unwrap();
        assert_eq!(
            out,
            [0, 0, 0xFF, 0, 0, 0xFF, 0, 0, 0xFF, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0]
        );
    }

    #[test]
    fn rgb_maps_to_nearest_palette_entry() {
        let palette = grey_ramp();
        // Three XRGB pixels: pure grey, near grey, and a repeat of the first.
        let pixels: Vec<u8> = [0x0040_4040u32, 0x0081_7F80, 0x0040_4040]
            .iter()
            .flat_map(|p| p.to_le_bytes())
            .collect();
        let src =
            SurfaceView::new(&pixels, SurfaceDesc::packed(3, 1, PixelFormat::XRGB8888)).unwrap();
        let mut out = [0u8; 3];
        let mut dst = SurfaceViewMut::new(&mut out, SurfaceDesc::packed(3, 1, PixelFormat::INDEXED8))
            .unwrap()
            .with_palette(&palette);
        convert_surface(&STANDARD_CONVERSIONS, &src, &mut dst).unwrap();
        assert_eq!(out, [0x40, 0x80, 0x40]);
    }

    #[test]
    fn round_trip_through_the_palette_is_lossless_for_palette_colours() {
        let palette = grey_ramp();
        let indices: Vec<u8> = (0..=255u8).collect();
        let src = SurfaceView::new(&indices, SurfaceDesc::packed(16, 16, PixelFormat::INDEXED8))
            .unwrap()
            .with_palette(&palette);
        let mut rgb = vec![0u8; 16 * 16 * 4];
        let mut rgb_view =
            SurfaceViewMut::new(&mut rgb, SurfaceDesc::packed(16, 16, PixelFormat::XRGB8888))
                .unwrap();
        convert_surface(&STANDARD_CONVERSIONS, &src, &mut rgb_view).unwrap();

        let mut back = vec![0u8; 256];
        let mut back_view =
            SurfaceViewMut::new(&mut back, SurfaceDesc::packed(16, 16, PixelFormat::INDEXED8))
                .unwrap()
                .with_palette(&palette);
        convert_surface(&STANDARD_CONVERSIONS, &rgb_view.as_view(), &mut back_view).unwrap();
        assert_eq!(back, indices);
    }

    #[test]
    fn missing_palette_is_unsupported() {
        let pixels = [0u8; 4];
        let src =
            SurfaceView::new(&pixels, SurfaceDesc::packed(2, 2, PixelFormat::INDEXED8)).unwrap();
        let mut out = [0u8; 8];
        let mut dst =
            SurfaceViewMut::new(&mut out, SurfaceDesc::packed(2, 2, PixelFormat::RGB565)).unwrap();
        assert_eq!(
            convert_surface(&STANDARD_CONVERSIONS, &src, &mut dst),
            Err(BlitError::UnsupportedFormat {
                src: PixelFormat::INDEXED8,
                dst: PixelFormat::RGB565
            })
        );
    }

    #[test]
    fn unknown_pair_is_unsupported() {
        let pixels = [0u8; 8];
        let src = SurfaceView::new(&pixels, SurfaceDesc::packed(2, 2, PixelFormat::RGB555)).unwrap();
        let mut out = [0u8; 12];
        let mut dst =
            SurfaceViewMut::new(&mut out, SurfaceDesc::packed(2, 2, PixelFormat::RGB888)).unwrap();
        assert!(matches!(
            convert_surface(&STANDARD_CONVERSIONS, &src, &mut dst),
            Err(BlitError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn scratch_conversion_covers_only_the_rect() {
        // 3x2 RGB888 surface with a 1 byte pad per row.
        let mut pixels = vec![0u8; 10 * 2];
        for (i, px) in [0x11_2233u32, 0x44_5566, 0x77_8899].iter().enumerate() {
            pixels[10 + i * 3..10 + i * 3 + 3].copy_from_slice(&px.to_le_bytes()[..3]);
        }
        let src = SurfaceView::new(&pixels, SurfaceDesc::new(3, 2, 10, PixelFormat::RGB888)).unwrap();
        let scratch = convert_to_scratch(
            Conversion::Rgb888ToXrgb8888,
            &src,
            &Rect::new(1, 1, 3, 2),
            PixelFormat::XRGB8888,
            None,
        )
        .unwrap();
        assert_eq!(scratch.desc().width, 2);
        assert_eq!(scratch.desc().height, 1);
        assert_eq!(
            scratch.view().pixels(),
            &[0x66, 0x55, 0x44, 0x00, 0x99, 0x88, 0x77, 0x00]
        );
    }

    #[rstest]
    #[case(0x7C00, PixelFormat::RGB555, (0xF8, 0, 0))]
    #[case(0x07E0, PixelFormat::RGB565, (0, 0xFC, 0))]
    #[case(0x0012_3456, PixelFormat::XRGB8888, (0x12, 0x34, 0x56))]
    fn unpacks_channels_to_the_top_of_each_byte(
        #[case] value: u32,
        #[case] format: PixelFormat,
        #[case] expected: (u8, u8, u8),
    ) {
        let color = unpack(&ChannelLayout::from_format(&format), value);
        assert_eq!((color.r, color.g, color.b), expected);
    }
}
