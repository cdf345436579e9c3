//! BC2 (DXT2/DXT3) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc2>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use super::{colour_dictionary, colour_indices, split_alpha_and_colour};
use soft_blit_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Decodes a BC2 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC2 block (16 bytes); 8 bytes of explicit alpha followed by a colour block
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels with alpha
///
/// # Example
///
/// ```
/// use soft_blit_bcn::util::decode_bc2_block;
///
/// let bc2_block = [0u8; 16];
/// let decoded = decode_bc2_block(&bc2_block);
/// assert_eq!(decoded.pixel(0, 0).a, 0);
/// ```
#[inline]
pub fn decode_bc2_block(src: &[u8; 16]) -> Decoded4x4Block {
    let (alpha_bytes, colour) = split_alpha_and_colour(src);

    // BC2 always uses the 4-color mode (no transparency from color section)
    let dict = colour_dictionary(&colour, false);
    let idx = colour_indices(&colour);

    let mut result = Decoded4x4Block::new(Color8888::default());
    let mut index_pos = 0;
    let mut alpha_bit_pos = 0;

    for y in 0..4 {
        for x in 0..4 {
            let pixel_idx = (idx >> index_pos) & 0x3;
            let mut pixel = dict[pixel_idx as usize];

            // Get 4-bit alpha value (0-15), low nibble first
            let shift_amount = (alpha_bit_pos & 0x1) * 4;
            let alpha_value = (alpha_bytes[alpha_bit_pos >> 1] >> shift_amount) & 0x0F;

            // Scale 4-bit alpha (0-15) to 8-bit (0-255): multiply by 17 (255/15 ≈ 17)
            pixel.a = alpha_value * 17;

            result.set_pixel(x, y, pixel);

            index_pos += 2;
            alpha_bit_pos += 1;
        }
    }

    result
}

/// Decodes a BC2 block held at the start of a slice.
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc2_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    let block: &[u8; 16] = src.get(..16)?.try_into().ok()?;
    Some(decode_bc2_block(block))
}
