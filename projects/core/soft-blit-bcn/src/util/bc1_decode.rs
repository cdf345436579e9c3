//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures>

use super::{colour_dictionary, colour_indices};
use soft_blit_common::decoded_4x4_block::Decoded4x4Block;

/// Decodes a BC1 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC1 block (8 bytes)
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels. Texels using the
/// transparent entry of a 3-colour block have an alpha of 0.
///
/// # Example
///
/// ```
/// use soft_blit_bcn::util::decode_bc1_block;
///
/// let bc1_block = [0u8; 8]; // Compressed BC1 block
/// let decoded = decode_bc1_block(&bc1_block);
/// let pixel_at_0_0 = decoded.pixel(0, 0);
/// ```
#[inline]
pub fn decode_bc1_block(src: &[u8; 8]) -> Decoded4x4Block {
    let dict = colour_dictionary(src, true);
    let idx = colour_indices(src);

    let mut result = Decoded4x4Block::new(dict[0]);
    let mut index_pos = 0;
    for y in 0..4 {
        for x in 0..4 {
            let pixel_idx = (idx >> index_pos) & 0x3;
            result.set_pixel(x, y, dict[pixel_idx as usize]);
            index_pos += 2;
        }
    }
    result
}

/// Decodes a BC1 block held at the start of a slice.
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc1_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    let block: &[u8; 8] = src.get(..8)?.try_into().ok()?;
    Some(decode_bc1_block(block))
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;
    use crate::util::decode_bc1_block_from_slice;

    #[test]
    fn can_decode_solid_bc1_block() {
        let decoded = decode_bc1_block(&SOLID_RED_BC1);
        for pixel in decoded.pixels.iter() {
            assert_eq!(*pixel, Color8888::new(255, 0, 0, 255));
        }
        assert!(decoded.has_identical_alpha());
    }

    #[test]
    fn three_colour_mode_has_transparent_black() {
        let bc1_block = [
            0x00, 0x00, // c0 = black
            0xFF, 0xFF, // c1 = white, c0 <= c1 selects 3 colour mode
            0b11_10_01_00, 0, 0, 0, // first row uses indices 0, 1, 2, 3
        ];
        let decoded = decode_bc1_block(&bc1_block);
        assert_eq!(decoded.pixel(0, 0), Color8888::new(0, 0, 0, 255));
        assert_eq!(decoded.pixel(1, 0), Color8888::new(255, 255, 255, 255));
        assert_eq!(decoded.pixel(2, 0), Color8888::new(127, 127, 127, 255));
        assert_eq!(decoded.pixel(3, 0), Color8888::new(0, 0, 0, 0));
        assert!(!decoded.has_identical_alpha());
    }

    #[test]
    fn four_colour_mode_interpolates_thirds() {
        let bc1_block = [
            0xFF, 0xFF, // c0 = white
            0x00, 0x00, // c1 = black
            0b11_10_01_00, 0, 0, 0,
        ];
        let decoded = decode_bc1_block(&bc1_block);
        assert_eq!(decoded.pixel(2, 0), Color8888::new(170, 170, 170, 255));
        assert_eq!(decoded.pixel(3, 0), Color8888::new(85, 85, 85, 255));
    }

    #[test]
    fn from_slice_rejects_short_input() {
        assert!(decode_bc1_block_from_slice(&SOLID_RED_BC1[..7]).is_none());
        assert!(decode_bc1_block_from_slice(&SOLID_RED_BC1).is_some());
    }
}
