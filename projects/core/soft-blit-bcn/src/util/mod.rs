//! Single block decoders for the supported formats.

mod bc1_decode;
mod bc2_decode;
mod bc3_decode;

pub use bc1_decode::*;
pub use bc2_decode::*;
pub use bc3_decode::*;

use soft_blit_common::{color_565::Color565, color_8888::Color8888};

/// Reads the two endpoints of a BC1-style colour block and builds its 4 entry dictionary.
///
/// With `three_colour_mode_allowed` (DXT1 only), `c0 <= c1` selects the 3 colour
/// mode whose last entry is transparent black. DXT3/DXT5 always use 4 colours.
#[inline(always)]
pub(crate) fn colour_dictionary(block: &[u8; 8], three_colour_mode_allowed: bool) -> [Color8888; 4] {
    let c0_raw = u16::from_le_bytes([block[0], block[1]]);
    let c1_raw = u16::from_le_bytes([block[2], block[3]]);
    let c0 = Color565::from_raw(c0_raw);
    let c1 = Color565::from_raw(c1_raw);

    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    let mut dict = [c0.to_color_8888(), c1.to_color_8888(), Color8888::default(), Color8888::default()];
    if !three_colour_mode_allowed || c0_raw > c1_raw {
        // Four-color block
        dict[2] = Color8888::new(
            ((2 * r0 + r1) / 3) as u8,
            ((2 * g0 + g1) / 3) as u8,
            ((2 * b0 + b1) / 3) as u8,
            255,
        );
        dict[3] = Color8888::new(
            ((r0 + 2 * r1) / 3) as u8,
            ((g0 + 2 * g1) / 3) as u8,
            ((b0 + 2 * b1) / 3) as u8,
            255,
        );
    } else {
        // Three-color block
        dict[2] = Color8888::new(
            ((r0 + r1) / 2) as u8,
            ((g0 + g1) / 2) as u8,
            ((b0 + b1) / 2) as u8,
            255,
        );
        dict[3] = Color8888::new(0, 0, 0, 0); // Transparent black
    }
    dict
}

/// The 2-bit colour indices of a BC1-style colour block, row-major, LSB first.
#[inline(always)]
pub(crate) fn colour_indices(block: &[u8; 8]) -> u32 {
    u32::from_le_bytes([block[4], block[5], block[6], block[7]])
}

/// Splits a 16 byte block into its alpha half and its colour half.
#[inline(always)]
pub(crate) fn split_alpha_and_colour(block: &[u8; 16]) -> ([u8; 8], [u8; 8]) {
    (
        core::array::from_fn(|i| block[i]),
        core::array::from_fn(|i| block[8 + i]),
    )
}
