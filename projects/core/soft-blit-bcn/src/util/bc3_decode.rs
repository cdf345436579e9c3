//! BC3 (DXT4/DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use super::{colour_dictionary, colour_indices, split_alpha_and_colour};
use soft_blit_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Builds the 8 entry alpha lookup table of a BC3/BC4 alpha block.
#[allow(clippy::identity_op)]
fn alpha_table(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let (a0, a1) = (alpha0 as u16, alpha1 as u16);
    let mut alpha_values = [0u8; 8];
    alpha_values[0] = alpha0; // bit code 000
    alpha_values[1] = alpha1; // bit code 001

    // In BC4/BC3, if alpha0 > alpha1, we have 8 interpolated values
    // Otherwise we have 6 interpolated values plus transparent and opaque
    if alpha0 > alpha1 {
        alpha_values[2] = ((6 * a0 + 1 * a1) / 7) as u8; // bit code 010
        alpha_values[3] = ((5 * a0 + 2 * a1) / 7) as u8; // bit code 011
        alpha_values[4] = ((4 * a0 + 3 * a1) / 7) as u8; // bit code 100
        alpha_values[5] = ((3 * a0 + 4 * a1) / 7) as u8; // bit code 101
        alpha_values[6] = ((2 * a0 + 5 * a1) / 7) as u8; // bit code 110
        alpha_values[7] = ((1 * a0 + 6 * a1) / 7) as u8; // bit code 111
    } else {
        alpha_values[2] = ((4 * a0 + 1 * a1) / 5) as u8; // bit code 010
        alpha_values[3] = ((3 * a0 + 2 * a1) / 5) as u8; // bit code 011
        alpha_values[4] = ((2 * a0 + 3 * a1) / 5) as u8; // bit code 100
        alpha_values[5] = ((1 * a0 + 4 * a1) / 5) as u8; // bit code 101
        alpha_values[6] = 0; // Transparent (bit code 110)
        alpha_values[7] = 255; // Opaque (bit code 111)
    }
    alpha_values
}

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC3 block (16 bytes); an 8 byte alpha block followed by a colour block
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels with alpha
///
/// # Example
///
/// ```
/// use soft_blit_bcn::util::decode_bc3_block;
///
/// let bc3_block = [0u8; 16];
/// let decoded = decode_bc3_block(&bc3_block);
/// assert_eq!(decoded.pixel(3, 3).a, 0);
/// ```
#[inline]
pub fn decode_bc3_block(src: &[u8; 16]) -> Decoded4x4Block {
    let (alpha_src, colour) = split_alpha_and_colour(src);

    // BC3 always uses the 4-color mode (no transparency from color section)
    let dict = colour_dictionary(&colour, false);
    let idx = colour_indices(&colour);

    let alpha_values = alpha_table(alpha_src[0], alpha_src[1]);

    // 3 bits per index, 48 bits total for 16 pixels, stored little endian.
    let alpha_indices = u64::from_le_bytes([
        alpha_src[2],
        alpha_src[3],
        alpha_src[4],
        alpha_src[5],
        alpha_src[6],
        alpha_src[7],
        0,
        0,
    ]);

    let mut result = Decoded4x4Block::new(Color8888::default());
    let mut index_pos = 0;
    let mut alpha_bit_pos = 0;

    for y in 0..4 {
        for x in 0..4 {
            let pixel_idx = (idx >> index_pos) & 0x3;
            let mut pixel = dict[pixel_idx as usize];

            let alpha_idx = (alpha_indices >> alpha_bit_pos) & 0b111;
            pixel.a = alpha_values[alpha_idx as usize];

            result.set_pixel(x, y, pixel);

            index_pos += 2;
            alpha_bit_pos += 3;
        }
    }

    result
}

/// Decodes a BC3 block held at the start of a slice.
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc3_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    let block: &[u8; 16] = src.get(..16)?.try_into().ok()?;
    Some(decode_bc3_block(block))
}

#[cfg(test)]
mod tests {
    use super::alpha_table;
    use crate::test_prelude::*;
    use crate::util::decode_bc3_block_from_slice;

    #[test]
    fn can_decode_bc3_block() {
        let bc3_block = [
            // Alpha data: a0 = 0, a1 = 0, index 0b111 for every texel after the first 2
            0, 0, 0xC0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            // Color data (BC1-style format)
            255, 255, // c0 = white
            255, 255, // c1 = white
            0, 0, 0, 0, // All pixels use index 0
        ];

        let decoded = decode_bc3_block_from_slice(&bc3_block).unwrap();
        assert_eq!(decoded.pixel(0, 0), Color8888::new(255, 255, 255, 0));
        assert_eq!(decoded.pixel(1, 0), Color8888::new(255, 255, 255, 0));
        // Index 0b111 is fully opaque in the 6 value mode.
        for i in 2..16 {
            assert_eq!(decoded.pixels[i].a, 255, "texel {i}");
        }
    }

    #[rstest]
    #[case(255, 0, [255, 0, 218, 182, 145, 109, 72, 36])]
    #[case(0, 255, [0, 255, 51, 102, 153, 204, 0, 255])]
    fn alpha_table_modes(#[case] a0: u8, #[case] a1: u8, #[case] expected: [u8; 8]) {
        assert_eq!(alpha_table(a0, a1), expected);
    }
}
